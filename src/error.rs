//! Error types shared by every handler.

use thiserror::Error;

use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::open_meteo::WeatherError;
use crate::store::StoreError;

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Everything an operation can fail with.
///
/// The `Display` output is what ends up in the `{"error": ...}` body, so the
/// validation messages are kept short and client-facing.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No route matches the request's method and path.
    #[error("Unsupported route")]
    UnsupportedRoute,

    /// Missing fields, bad formats, absent references or a broken invariant.
    #[error("{0}")]
    Validation(String),

    /// The request body is not JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Config(_) => 500,
            _ => 400,
        }
    }
}
