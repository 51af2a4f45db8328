//! Error handling for site-i18n
//!
//! This module defines the error type shared by the translation store,
//! the page model, the persisted language slot and configuration loading.

use thiserror::Error;

/// Main error type for site-i18n
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation resource {url} answered with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid translation table: {0}")]
    InvalidTable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Markup error: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("Language storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl From<quick_xml::events::attributes::AttrError> for I18nError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        I18nError::Markup(err.into())
    }
}

/// Result type alias for site-i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

impl I18nError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors are the ones the store masks with the embedded
    /// fallback table or the binder logs and moves past.
    pub fn is_recoverable(&self) -> bool {
        match self {
            I18nError::Config(_) => false,
            I18nError::ConfigLoad(_) => false,
            I18nError::Http(_) => true,
            I18nError::HttpStatus { .. } => true,
            I18nError::InvalidTable(_) => true,
            I18nError::Serialization(_) => true,
            I18nError::Markup(_) => true,
            I18nError::Storage(_) => true,
            I18nError::Io(_) => true,
            I18nError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            I18nError::Config(_) => ErrorSeverity::Critical,
            I18nError::ConfigLoad(_) => ErrorSeverity::Critical,
            I18nError::UrlParse(_) => ErrorSeverity::Critical,
            I18nError::Markup(_) => ErrorSeverity::Warning,
            I18nError::Storage(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
