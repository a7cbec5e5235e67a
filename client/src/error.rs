//! Error types for the Kirai client.
//!
//! This module defines the error hierarchy shared by every layer:
//!
//! - [`FormError`] - Form binding and required-field validation
//! - [`ApiError`] - Transport and record store failures
//! - [`SessionError`] - Stored login state
//! - [`ConfigError`] - Environment configuration
//! - [`SubmitError`] - Outcome of a failed form submission
//! - [`ClientError`] - Top-level error used by the CLI
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Form Errors
// =============================================================================

/// Errors raised while binding user input to a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// The KL number is empty or missing.
    #[error("KL Number is required")]
    MissingKlNo,

    /// The path does not name a registered field.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A numeric input could not be read as a decimal.
    #[error("Invalid number for '{field}': {value}")]
    InvalidNumber { field: String, value: String },

    /// A date input is not in YYYY-MM-DD form.
    #[error("Invalid date for '{field}': {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// The bound inputs did not form a record.
    #[error("Could not bind form: {0}")]
    Unbindable(String),
}

// =============================================================================
// Store / Transport Errors
// =============================================================================

/// Errors from the remote auth service or record store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or completed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestFailed(e.to_string())
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors from the persisted login session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No stored access token.
    #[error("Not logged in. Run 'kirai login' first")]
    NotLoggedIn,

    /// No configuration directory to place the session file in.
    #[error("Could not determine a configuration directory")]
    NoConfigDir,

    /// IO error.
    #[error("Session IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Session JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but holds an unusable value.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Why a form submission did not produce a saved record.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Blocked locally; the save call was not made.
    #[error("{0}")]
    Validation(#[from] FormError),

    /// The store rejected or failed the save.
    #[error("Failed to save kirai details: {0}")]
    Store(#[from] ApiError),
}

// =============================================================================
// Client Errors (top-level)
// =============================================================================

/// Top-level error returned by CLI commands.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Submit(#[from] SubmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No record matched the requested KL number.
    #[error("No kirai record found for KL Number '{0}'")]
    RecordNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for form binding.
pub type FormResult<T> = Result<T, FormError>;

/// Result type for store calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for CLI commands.
pub type ClientResult<T> = Result<T, ClientError>;
