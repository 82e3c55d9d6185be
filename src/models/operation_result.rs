//! The outcome of one export invocation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ExportError};

/// A recorded error, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportIssue {
    /// Classification of the error.
    pub kind: ErrorKind,
    /// Zero-based index of the record the error belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl ExportIssue {
    /// Creates an issue tied to a record position.
    pub fn for_record(index: usize, error: &ExportError) -> Self {
        Self {
            kind: error.kind(),
            record_index: Some(index),
            message: error.to_string(),
        }
    }
}

impl From<&ExportError> for ExportIssue {
    fn from(error: &ExportError) -> Self {
        Self {
            kind: error.kind(),
            record_index: error.record_index(),
            message: error.to_string(),
        }
    }
}

impl From<ExportError> for ExportIssue {
    fn from(error: ExportError) -> Self {
        Self::from(&error)
    }
}

impl fmt::Display for ExportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Statistics and diagnostics for one export.
///
/// `success` is false only when a fatal error stopped the export before
/// records were processed, or when the finished workbook could not be
/// persisted. Per-record failures are listed in `errors` without
/// flipping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the export completed.
    pub success: bool,
    /// Kind of the fatal error when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ErrorKind>,
    /// Records written to the sheet.
    pub records_processed: usize,
    /// Cells blanked before writing.
    pub cells_cleared: usize,
    /// Cells written.
    pub cells_updated: usize,
    /// Existing notes removed before writing.
    pub comments_cleared: usize,
    /// Notes attached.
    pub comments_added: usize,
    /// Wall-clock time spent in the export.
    pub processing_time_ms: u64,
    /// Fatal and per-record errors.
    pub errors: Vec<ExportIssue>,
    /// Non-fatal observations.
    pub warnings: Vec<String>,
    /// Zero-based row offset of the matched date row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_row_index: Option<u32>,
    /// The date string that was searched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

impl OperationResult {
    /// Returns the plain message of every recorded error.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Returns the kind of the fatal error, if the export failed.
    pub fn failure_kind(&self) -> Option<ErrorKind> {
        if self.success { None } else { self.failure }
    }

    /// Returns true if any recorded error has the given kind.
    pub fn has_error_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Marks a finished result as failed, e.g. when persisting it failed.
    pub fn mark_failed(&mut self, error: ExportError) {
        self.success = false;
        self.failure = Some(error.kind());
        self.errors.push(error.into());
    }

    /// Renders a one-line summary of a successful export.
    ///
    /// Returns `None` for failed exports.
    pub fn summary(&self) -> Option<String> {
        if !self.success {
            return None;
        }
        let date = self.target_date.as_deref().unwrap_or("the target date");
        let row = self
            .date_row_index
            .map(|r| format!(" at row {}", r + 1))
            .unwrap_or_default();
        let mut summary = format!(
            "Exported {} record(s) for {}{}: {} cells updated, {} cleared, {} notes added",
            self.records_processed,
            date,
            row,
            self.cells_updated,
            self.cells_cleared,
            self.comments_added
        );
        if !self.errors.is_empty() {
            summary.push_str(&format!(" ({} error(s))", self.errors.len()));
        }
        Some(summary)
    }
}
