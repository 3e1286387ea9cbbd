//! Unified error handling for repositories and the auth gateway.
//!
//! Every fallible operation returns [`AppResult`]. The variants follow the
//! failure taxonomy of the record layer:
//! - not-found: the requested key has no backing document
//! - store / blob failure: the backing service rejected the call
//! - identity failures: missing session or rejected identity token

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Identity
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid identity token: {0}")]
    InvalidToken(String),

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Backing services
    #[error("Store error: {0}")]
    Store(String),

    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "jwt")]
    #[error("Identity token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for the consumer
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Blob(_) => "BLOB_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "INVALID_TOKEN",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is the not-found condition rather than a service failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for caller errors
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(_) | AppError::Unauthorized => self.to_string(),

            AppError::InvalidToken(reason) => {
                tracing::warn!("Identity token rejected: {}", reason);
                "Sign-in failed: invalid or expired token".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                "Sign-in failed: invalid or expired token".to_string()
            }

            // Hide details for service failures
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                "Could not reach your records, please try again".to_string()
            }
            AppError::Blob(msg) => {
                tracing::error!("Blob store error: {}", msg);
                "Could not store the file, please try again".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "A stored record could not be read".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::Store(msg.into())
    }

    pub fn blob(msg: impl Into<String>) -> Self {
        AppError::Blob(msg.into())
    }

    pub fn invalid_token(reason: impl Into<String>) -> Self {
        AppError::InvalidToken(reason.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
