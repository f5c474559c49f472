use chrono::{Local, NaiveDateTime};

use sagnay_model::ExportSettings;

use crate::pdf::PdfReport;

/// PDF report options. Unset fields fall back to [`ExportSettings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub title: Option<String>,
    pub company_name: Option<String>,
    /// Timestamp printed under the title; defaults to the local time of the call.
    pub generated_at: Option<NaiveDateTime>,
}

impl ReportOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub(crate) fn resolve<'a>(&'a self, settings: &'a ExportSettings) -> PdfReport<'a> {
        PdfReport {
            title: non_empty(self.title.as_deref()).unwrap_or(settings.default_title.as_str()),
            company_name: non_empty(self.company_name.as_deref())
                .unwrap_or(settings.company_name.as_str()),
            generated_at: self
                .generated_at
                .unwrap_or_else(|| Local::now().naive_local()),
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
