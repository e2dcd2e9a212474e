//! Result and error types for Comprar.

use std::time::Duration;
use thiserror::Error;

/// Result type for Comprar operations
pub type ComprarResult<T> = Result<T, ComprarError>;

/// Errors that can occur in Comprar
#[derive(Debug, Error)]
pub enum ComprarError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An element never became ready within the wait bound
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout {
        /// Description of what was waited for
        what: String,
        /// Time spent waiting
        waited: Duration,
    },

    /// Page interaction error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input failed on {target}: {message}")]
    InputError {
        /// The element being driven
        target: String,
        /// Error message
        message: String,
    },

    /// Screenshot capture error (always swallowed by the reporter)
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// HTTP transport failure (DNS, TLS, connection). Application-level
    /// errors from the API are data, not errors.
    #[error("API transport error: {0}")]
    Api(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_names_the_target() {
        let err = ComprarError::Timeout {
            what: "login button".to_string(),
            waited: Duration::from_secs(10),
        };
        let text = err.to_string();
        assert!(text.contains("login button"));
        assert!(text.contains("10s"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ComprarError = io.into();
        assert!(matches!(err, ComprarError::Io(_)));
    }
}
