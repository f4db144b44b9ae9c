//! Error types for category-feed
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Upstream faults are converted into these variants at the proxy boundary;
//! the HTTP layer maps them to a status code and a public message with
//! [`Error::status_code`] and [`Error::public_message`].

use thiserror::Error;

/// The main error type for category-feed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Upstream / HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Proxy Errors (seen by clients of the pagination proxy)
    // ============================================================================
    #[error("Proxy returned {status}: {message}")]
    Proxy { status: u16, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a proxy error
    pub fn proxy(status: u16, message: impl Into<String>) -> Self {
        Self::Proxy {
            status,
            message: message.into(),
        }
    }

    /// Check if this error means the proxy is missing upstream credentials
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Error::MissingConfigField { .. } | Error::Config { .. })
    }

    /// HTTP status the proxy answers with for this error
    ///
    /// Upstream statuses are propagated so callers can tell rate limiting
    /// apart from hard failures; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::HttpStatus { status, .. } if (400..=599).contains(status) => *status,
            _ => 500,
        }
    }

    /// Message placed in the proxy's `{message}` failure body
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::MissingConfigField { .. } | Error::Config { .. } => "Server misconfiguration",
            Error::HttpStatus { .. } => "Failed to fetch images from upstream",
            _ => "Internal server error",
        }
    }
}

/// Result type alias for category-feed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
