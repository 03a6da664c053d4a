//! Error types for stock-locator services.

use thiserror::Error;

/// Result type alias using LocatorError.
pub type LocatorResult<T> = Result<T, LocatorError>;

/// Primary error type for preview rendering operations.
#[derive(Debug, Error)]
pub enum LocatorError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    // === Upstream Errors ===
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Rasterizer unavailable: {0}")]
    RasterizerUnavailable(String),

    // === Storage Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl LocatorError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            LocatorError::MissingParameter(_)
            | LocatorError::InvalidParameter { .. }
            | LocatorError::NotImplemented(_) => 400,

            LocatorError::StoreNotFound(_) => 404,

            LocatorError::RasterizerUnavailable(_) => 503,

            _ => 500,
        }
    }
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::Internal(format!("JSON error: {}", err))
    }
}
