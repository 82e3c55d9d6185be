//! Error types for the SRS export engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report, plus the closed [`ErrorKind`]
//! classification callers branch on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of export failures.
///
/// Every [`ExportError`] maps to exactly one kind, so callers can decide
/// what to do without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller input was structurally unusable (missing workbook, bad date, bad type).
    InvalidInput,
    /// The target date does not appear in the template's search range.
    DateNotFound,
    /// Nothing survived filtering and validation.
    NoExportableRecords,
    /// A single record failed validation and was excluded.
    InvalidRecord,
    /// The layout tables are missing an entry the data refers to.
    FatalConfig,
    /// A single cell could not be written.
    CellWriteFailed,
    /// The file transport refused or failed the upload.
    UploadFailed,
    /// The file transport could not provide or encode the workbook.
    Transport,
}

/// The main error type for the SRS export engine.
///
/// # Example
///
/// ```
/// use srs_export::error::{ErrorKind, ExportError};
///
/// let error = ExportError::DateNotFound {
///     date: "15/01/2026".to_string(),
/// };
/// assert_eq!(error.to_string(), "Date '15/01/2026' not found in the template");
/// assert_eq!(error.kind(), ErrorKind::DateNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable layout.
    #[error("Invalid template layout: {message}")]
    InvalidLayout {
        /// What is wrong with the layout.
        message: String,
    },

    /// No workbook was supplied to the export.
    #[error("No workbook supplied")]
    MissingWorkbook,

    /// The workbook bytes could not be read as a spreadsheet.
    #[error("Workbook could not be read: {message}")]
    UnreadableWorkbook {
        /// The reader's error message.
        message: String,
    },

    /// The expected worksheet is not in the workbook.
    #[error("Worksheet '{name}' not found in workbook")]
    MissingWorksheet {
        /// The worksheet name from the template configuration.
        name: String,
    },

    /// The target date string was empty.
    #[error("Target date is empty")]
    EmptyDate,

    /// The sheet type selector is not 2 or 3.
    #[error("Invalid sheet type {value}: expected 2 or 3")]
    InvalidSheetType {
        /// The rejected value.
        value: u8,
    },

    /// The caller supplied no records at all.
    #[error("No records supplied for export")]
    EmptyRecordList,

    /// No file path was supplied to the document pipeline.
    #[error("No file path supplied")]
    MissingFilePath,

    /// The target date does not appear in the search range.
    #[error("Date '{date}' not found in the template")]
    DateNotFound {
        /// The formatted date that was searched for.
        date: String,
    },

    /// All records were filtered out or rejected.
    #[error("No exportable records")]
    NoExportableRecords,

    /// A record failed validation.
    #[error("Record {index} excluded: {message}")]
    InvalidRecord {
        /// Zero-based index of the record in the submitted list.
        index: usize,
        /// Every failed check, joined.
        message: String,
    },

    /// No column mapping exists for a (type, contract) pair.
    #[error("No column mapping for sheet type {sheet_type} contract {contract}")]
    MissingLayout {
        /// The sheet type.
        sheet_type: u8,
        /// The contract number.
        contract: u8,
    },

    /// The extended-leave band has no column for a leave id.
    #[error(
        "No extended leave column for leave type {leave_type_id} (sheet type {sheet_type}, contract {contract})"
    )]
    MissingLeaveColumn {
        /// The sheet type.
        sheet_type: u8,
        /// The contract number.
        contract: u8,
        /// The leave type id that could not be placed.
        leave_type_id: u8,
    },

    /// A single cell write failed.
    #[error("Failed to write cell {cell}: {message}")]
    CellWriteFailed {
        /// The A1 address of the cell.
        cell: String,
        /// Why the write failed.
        message: String,
    },

    /// The workbook could not be downloaded.
    #[error("Failed to download '{path}': {message}")]
    DownloadFailed {
        /// The document path.
        path: String,
        /// The transport's error message.
        message: String,
    },

    /// The workbook could not be encoded back to bytes.
    #[error("Failed to encode workbook: {message}")]
    EncodeFailed {
        /// The writer's error message.
        message: String,
    },

    /// The workbook could not be uploaded.
    #[error("Failed to upload '{path}': {message}")]
    UploadFailed {
        /// The document path.
        path: String,
        /// The transport's error message.
        message: String,
    },
}

impl ExportError {
    /// Returns the closed classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::MissingWorkbook
            | ExportError::UnreadableWorkbook { .. }
            | ExportError::MissingWorksheet { .. }
            | ExportError::EmptyDate
            | ExportError::InvalidSheetType { .. }
            | ExportError::EmptyRecordList
            | ExportError::MissingFilePath => ErrorKind::InvalidInput,
            ExportError::DateNotFound { .. } => ErrorKind::DateNotFound,
            ExportError::NoExportableRecords => ErrorKind::NoExportableRecords,
            ExportError::InvalidRecord { .. } => ErrorKind::InvalidRecord,
            ExportError::ConfigNotFound { .. }
            | ExportError::ConfigParseError { .. }
            | ExportError::InvalidLayout { .. }
            | ExportError::MissingLayout { .. }
            | ExportError::MissingLeaveColumn { .. } => ErrorKind::FatalConfig,
            ExportError::CellWriteFailed { .. } => ErrorKind::CellWriteFailed,
            ExportError::UploadFailed { .. } => ErrorKind::UploadFailed,
            ExportError::DownloadFailed { .. } | ExportError::EncodeFailed { .. } => {
                ErrorKind::Transport
            }
        }
    }

    /// Returns the record index this error is tied to, if any.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            ExportError::InvalidRecord { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// A type alias for Results that return ExportError.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = ExportError::ConfigNotFound {
            path: "/missing/columns.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/columns.yaml"
        );
        assert_eq!(error.kind(), ErrorKind::FatalConfig);
    }

    #[test]
    fn test_invalid_record_displays_index_and_message() {
        let error = ExportError::InvalidRecord {
            index: 2,
            message: "contract 3 is not 1 or 2".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Record 2 excluded: contract 3 is not 1 or 2"
        );
        assert_eq!(error.record_index(), Some(2));
        assert_eq!(error.kind(), ErrorKind::InvalidRecord);
    }

    #[test]
    fn test_missing_leave_column_is_config_error() {
        let error = ExportError::MissingLeaveColumn {
            sheet_type: 2,
            contract: 1,
            leave_type_id: 19,
        };
        assert_eq!(error.kind(), ErrorKind::FatalConfig);
        assert!(error.to_string().contains("leave type 19"));
    }

    #[test]
    fn test_input_errors_are_invalid_input() {
        let errors = [
            ExportError::MissingWorkbook,
            ExportError::EmptyDate,
            ExportError::EmptyRecordList,
            ExportError::InvalidSheetType { value: 4 },
            ExportError::MissingWorksheet {
                name: "Timesheet".to_string(),
            },
        ];
        for error in errors {
            assert_eq!(error.kind(), ErrorKind::InvalidInput, "{error}");
            assert_eq!(error.record_index(), None);
        }
    }

    #[test]
    fn test_transport_errors_are_classified() {
        let upload = ExportError::UploadFailed {
            path: "srs/jan.xlsx".to_string(),
            message: "conflict".to_string(),
        };
        assert_eq!(upload.kind(), ErrorKind::UploadFailed);

        let download = ExportError::DownloadFailed {
            path: "srs/jan.xlsx".to_string(),
            message: "missing".to_string(),
        };
        assert_eq!(download.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::NoExportableRecords).unwrap();
        assert_eq!(json, "\"no_exportable_records\"");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ExportError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_date_not_found() -> ExportResult<()> {
            Err(ExportError::DateNotFound {
                date: "01/01/2026".to_string(),
            })
        }

        fn propagates_error() -> ExportResult<()> {
            returns_date_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
