use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Match score references unknown job {job_id} or candidate {candidate_id}")]
    DanglingReference { job_id: u64, candidate_id: u64 },
}

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    Storage,
}

/// 錯誤嚴重程度，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::ConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            MatchError::CsvError(_) | MatchError::ZipError(_) => ErrorCategory::Input,
            MatchError::ProcessingError { .. } | MatchError::DanglingReference { .. } => {
                ErrorCategory::Processing
            }
            MatchError::IoError(_) | MatchError::SerializationError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MatchError::ZipError(_) => "Check that the résumé archive is a valid ZIP file",
            MatchError::CsvError(_) => {
                "Check that the jobs file is a CSV with 'Job Title' and 'Job Description' columns"
            }
            MatchError::IoError(_) => "Check that the input paths exist and the output path is writable",
            MatchError::SerializationError(_) => {
                "The stored match snapshot may be corrupt; delete it and re-run"
            }
            MatchError::ConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            MatchError::ProcessingError { .. } => "Re-run with --verbose to see which document failed",
            MatchError::DanglingReference { .. } => {
                "Scores must be recomputed from the same jobs and candidates they are stored with"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Could not read input documents: {}", self),
            ErrorCategory::Processing => format!("Matching failed: {}", self),
            ErrorCategory::Storage => format!("Could not store results: {}", self),
        }
    }

    /// 依嚴重程度對應的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = MatchError::InvalidConfigValueError {
            field: "source.jobs_path".to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("source.jobs_path"));
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: MatchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.exit_code(), 3);
    }
}
