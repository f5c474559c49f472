use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::artifact::{Artifact, ArtifactClass, Delivery, ExportFile};
use crate::error::TargetError;

use super::ExportTarget;

/// Target that keeps every artifact in memory.
///
/// Used by tests and by embedders that stream artifacts elsewhere. Selected
/// delivery channels can be refused to simulate a denied clipboard or a
/// blocked print window.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    delivered: Mutex<Vec<Artifact>>,
    refused: HashSet<ArtifactClass>,
}

impl MemoryTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every artifact of the given class.
    #[must_use]
    pub fn refusing(mut self, class: ArtifactClass) -> Self {
        self.refused.insert(class);
        self
    }

    /// All delivered artifacts, oldest first.
    #[must_use]
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recently delivered artifact.
    #[must_use]
    pub fn last(&self) -> Option<Artifact> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Delivered files.
    #[must_use]
    pub fn files(&self) -> Vec<ExportFile> {
        self.artifacts()
            .into_iter()
            .filter_map(|artifact| match artifact {
                Artifact::File(file) => Some(file),
                _ => None,
            })
            .collect()
    }

    /// Last clipboard text, if any.
    #[must_use]
    pub fn clipboard_text(&self) -> Option<String> {
        self.artifacts()
            .into_iter()
            .rev()
            .find_map(|artifact| match artifact {
                Artifact::Clipboard { text } => Some(text),
                _ => None,
            })
    }

    /// Last print document, if any.
    #[must_use]
    pub fn printed_html(&self) -> Option<String> {
        self.artifacts()
            .into_iter()
            .rev()
            .find_map(|artifact| match artifact {
                Artifact::Print { html, .. } => Some(html),
                _ => None,
            })
    }
}

impl ExportTarget for MemoryTarget {
    fn deliver(&self, artifact: &Artifact) -> Result<Delivery, TargetError> {
        let class = artifact.class();
        if self.refused.contains(&class) {
            return Err(TargetError::Refused {
                artifact: class.label(),
            });
        }
        self.delivered
            .lock()
            .map_err(|_| TargetError::Poisoned)?
            .push(artifact.clone());
        Ok(Delivery::Captured)
    }
}
