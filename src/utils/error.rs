use crate::domain::model::BoxStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsolidationError {
    #[error("Invalid argument '{field}' = {value}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot {operation} a box in status '{status}'")]
    InvalidState { operation: String, status: BoxStatus },

    #[error("Item '{item_id}' is not in this box")]
    ItemNotFound { item_id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = {value}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lifecycle,
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

impl ConsolidationError {
    pub fn invalid_argument(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_state(operation: &str, status: BoxStatus) -> Self {
        Self::InvalidState {
            operation: operation.to_string(),
            status,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::ItemNotFound { .. } | Self::CsvError(_) => {
                ErrorCategory::Input
            }
            Self::InvalidState { .. } => ErrorCategory::Lifecycle,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Lifecycle => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidArgument { field, .. } => {
                format!("Provide a non-negative, finite value for '{}' within the supported range", field)
            }
            Self::InvalidState { operation, status } => {
                let next = match status {
                    BoxStatus::Open => "add or correct items, or close it",
                    BoxStatus::Closed => "ship it",
                    BoxStatus::Shipped => "record its delivery",
                    BoxStatus::Delivered => "nothing; the box is final",
                };
                format!(
                    "A box that is {} cannot {}. Allowed next step: {}",
                    status, operation, next
                )
            }
            Self::ItemNotFound { .. } => "Check the item id against the box contents".to_string(),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => "Check the configuration file against the documented keys".to_string(),
            Self::CsvError(_) => {
                "Check the events file has a header row and one item per line".to_string()
            }
            Self::IoError(_) => "Check the file path exists and is readable".to_string(),
            Self::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { field, reason, .. } => {
                format!("The value given for {} is not usable: {}", field, reason)
            }
            Self::InvalidState { operation, status } => {
                format!("This box is {} and cannot be asked to {}", status, operation)
            }
            Self::ItemNotFound { item_id } => format!("No item {} in this box", item_id),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsolidationError>;
