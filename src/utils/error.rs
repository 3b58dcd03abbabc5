use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("Payload decode failed: {message}")]
    DecodeError { message: String },

    #[error("Malformed input{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    SchemaError { line: Option<u64>, message: String },

    #[error("Inference failed: {message}")]
    InferenceError { message: String },

    #[error("Deadline exceeded: {message}")]
    TimeoutError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Inference,
    Timeout,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChurnError {
    pub fn schema(line: Option<u64>, message: impl Into<String>) -> Self {
        ChurnError::SchemaError {
            line,
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        ChurnError::InferenceError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChurnError::DecodeError { .. } | ChurnError::SchemaError { .. } => ErrorCategory::Input,
            ChurnError::InferenceError { .. } => ErrorCategory::Inference,
            ChurnError::TimeoutError { .. } => ErrorCategory::Timeout,
            ChurnError::ConfigError { .. } | ChurnError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ChurnError::IoError(_) | ChurnError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Timeout => ErrorSeverity::Medium,
            ErrorCategory::Inference | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Only malformed input is answered to the caller; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            ErrorCategory::Timeout => 504,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChurnError::DecodeError { .. } => {
                "The request body could not be decoded as base64 text".to_string()
            }
            ChurnError::SchemaError { .. } => format!("The CSV payload is not valid: {}", self),
            ChurnError::InferenceError { .. } => {
                "The scoring model could not produce predictions for this batch".to_string()
            }
            ChurnError::TimeoutError { .. } => {
                "Scoring did not finish before the request deadline".to_string()
            }
            ChurnError::ConfigError { .. } | ChurnError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            ChurnError::IoError(e) => format!("File access failed: {}", e),
            ChurnError::SerializationError(e) => format!("Report serialization failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Send a headerless CSV with exactly 100 comma-separated fields per line"
            }
            ErrorCategory::Inference => {
                "Check that the inference endpoint is in service and accepts text/csv"
            }
            ErrorCategory::Timeout => "Retry with a smaller file or a longer deadline",
            ErrorCategory::Configuration => "Review the CLI flags, TOML file or environment variables",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChurnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message_includes_line() {
        let err = ChurnError::schema(Some(3), "expected 100 fields, found 99");
        assert_eq!(
            err.to_string(),
            "Malformed input at line 3: expected 100 fields, found 99"
        );

        let err = ChurnError::schema(None, "empty record");
        assert_eq!(err.to_string(), "Malformed input: empty record");
    }

    #[test]
    fn test_only_input_errors_are_client_errors() {
        let decode = ChurnError::DecodeError {
            message: "bad padding".to_string(),
        };
        assert!(decode.is_client_error());
        assert_eq!(decode.status_code(), 400);

        let inference = ChurnError::inference("connection refused");
        assert!(!inference.is_client_error());
        assert_eq!(inference.status_code(), 500);

        let timeout = ChurnError::TimeoutError {
            message: "chunk 2".to_string(),
        };
        assert_eq!(timeout.category(), ErrorCategory::Timeout);
        assert_eq!(timeout.status_code(), 504);
    }

    #[test]
    fn test_configuration_errors_are_server_faults() {
        let err = ChurnError::InvalidConfigValueError {
            field: "BATCH_SIZE".to_string(),
            value: "lots".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.status_code(), 500);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
