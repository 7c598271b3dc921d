use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// 表單欄位錯誤 (欄位名稱 -> 訊息)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        // 同一欄位只保留第一個錯誤
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 沒有錯誤時回傳 Ok，否則轉為 `TravelError::Validation`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TravelError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum TravelError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Unknown catalog item: {id}")]
    UnknownItem { id: String },

    #[error("Unknown option '{value}' for filter '{dimension}'")]
    UnknownFilterOption { dimension: String, value: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Submission rejected ({status}): {message}")]
    Submission { status: u16, message: String },

    #[error("Notification failed ({status}): {message}")]
    Notification { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Backend,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TravelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TravelError::ConfigValidationError { .. }
            | TravelError::InvalidConfigValueError { .. }
            | TravelError::MissingConfigError { .. }
            | TravelError::CatalogError { .. } => ErrorCategory::Configuration,
            TravelError::UnknownItem { .. }
            | TravelError::UnknownFilterOption { .. }
            | TravelError::Validation(_) => ErrorCategory::Input,
            TravelError::HttpError(_)
            | TravelError::Submission { .. }
            | TravelError::Notification { .. } => ErrorCategory::Backend,
            TravelError::CsvError(_)
            | TravelError::IoError(_)
            | TravelError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息；後端錯誤訊息原樣呈現
    pub fn user_friendly_message(&self) -> String {
        match self {
            TravelError::Validation(errors) => {
                format!("Please correct the highlighted fields: {}", errors)
            }
            TravelError::Submission { message, .. } => message.clone(),
            TravelError::Notification { .. } => {
                "Booking failed. The notification could not be delivered.".to_string()
            }
            TravelError::HttpError(_) => {
                "Could not reach the booking service. Please try again.".to_string()
            }
            TravelError::UnknownItem { id } => {
                format!("The selected trip '{}' is not available", id)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TravelError::Validation(_) => "Fix the listed fields and submit again",
            TravelError::UnknownItem { .. } => "Run `search` to list valid item ids",
            TravelError::UnknownFilterOption { .. } => {
                "Use one of the filter options listed for this page"
            }
            TravelError::Submission { .. } | TravelError::HttpError(_) => {
                "Check the backend URL and key, then retry manually"
            }
            TravelError::Notification { .. } => "Check the webhook URL in [notifications]",
            TravelError::ConfigValidationError { .. }
            | TravelError::InvalidConfigValueError { .. }
            | TravelError::MissingConfigError { .. } => {
                "Review travelco.toml or the SUPABASE_* environment variables"
            }
            TravelError::CatalogError { .. } => "Check the catalog file for duplicate ids or bad ranges",
            TravelError::CsvError(_)
            | TravelError::IoError(_)
            | TravelError::SerializationError(_) => "Check file permissions and disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, TravelError>;
