//! Export targets: where artifacts end up.
//!
//! Writers only produce bytes and text. A target decides what "download",
//! "copy" and "print" mean for the host, which keeps formatting testable
//! without a desktop session.

mod host;
mod memory;

pub use host::{CommandSpec, HostTarget};
pub use memory::MemoryTarget;

use crate::artifact::{Artifact, Delivery};
use crate::error::TargetError;

/// Destination for export artifacts.
pub trait ExportTarget {
    /// Deliver one artifact. Called once per export operation.
    fn deliver(&self, artifact: &Artifact) -> Result<Delivery, TargetError>;
}

impl<T: ExportTarget + ?Sized> ExportTarget for Box<T> {
    fn deliver(&self, artifact: &Artifact) -> Result<Delivery, TargetError> {
        (**self).deliver(artifact)
    }
}
