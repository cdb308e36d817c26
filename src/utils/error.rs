use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required argument: {field}")]
    MissingArgumentError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("File {path} does not exist")]
    FileNotFoundError { path: String },

    #[error("CSV file {path} has no header row")]
    MissingHeaderError { path: String },

    #[error("Duplicate header field '{field}'")]
    DuplicateHeaderError { field: String },

    #[error("Record handoff closed before the reader finished")]
    HandoffClosedError,

    #[error("Pipeline task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

/// Recoverable, per-row failures. The offending row is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Mismatch of row length with header length on line {line}: expected {expected} fields, found {found}")]
    LengthMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Validation,
    Input,
    Output,
    Internal,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MissingArgumentError { .. } => ErrorCategory::Usage,
            ConvertError::InvalidConfigValueError { .. } | ConvertError::FileNotFoundError { .. } => {
                ErrorCategory::Validation
            }
            ConvertError::CsvError(_)
            | ConvertError::MissingHeaderError { .. }
            | ConvertError::DuplicateHeaderError { .. } => ErrorCategory::Input,
            ConvertError::IoError(_) | ConvertError::SerializationError(_) => ErrorCategory::Output,
            ConvertError::HandoffClosedError | ConvertError::TaskError(_) => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::MissingArgumentError { field } => format!("{} missing", field),
            ConvertError::InvalidConfigValueError { field, value, reason } => {
                format!("{} is not valid for {} ({})", value, field, reason)
            }
            ConvertError::FileNotFoundError { path } => format!("File {} does not exist", path),
            ConvertError::MissingHeaderError { path } => {
                format!("{} is empty, a header row is required", path)
            }
            ConvertError::DuplicateHeaderError { field } => {
                format!("The header row names '{}' more than once", field)
            }
            ConvertError::CsvError(e) => format!("Could not read the CSV file: {}", e),
            ConvertError::IoError(e) => format!("File operation failed: {}", e),
            ConvertError::SerializationError(e) => format!("Could not encode a record: {}", e),
            ConvertError::HandoffClosedError | ConvertError::TaskError(_) => {
                format!("Conversion aborted: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Usage => "Run with --help to see the expected arguments",
            ErrorCategory::Validation => "Pass the path of an existing file ending in .csv",
            ErrorCategory::Input => "Check that the file is readable and starts with a header row",
            ErrorCategory::Output => "Check that the output directory is writable and has free space",
            ErrorCategory::Internal => "Re-run the conversion; the output file may be incomplete",
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = ConvertError::FileNotFoundError {
            path: "missing.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.exit_code(), 1);

        let err = ConvertError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert!(err.user_friendly_message().contains("disk full"));
    }

    #[test]
    fn test_row_error_message() {
        let err = RowError::LengthMismatch {
            line: 4,
            expected: 2,
            found: 1,
        };
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("expected 2"));
    }
}
