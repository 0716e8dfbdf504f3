//! Error types for authorization decisions and the HTTP edge.
//!
//! [`AuthError`] is the taxonomy returned by the authorization core and the
//! session context. [`LookupError`] is what the admin directory gateway
//! reports. [`AppError`] wraps either into an HTTP status for controllers.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Generic message for failed logins and restores.
///
/// Unknown and inactive identities share it so a caller cannot probe which
/// admins exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials or session";

/// Failure reported by the admin directory gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No admin matches the requested id or credentials.
    #[error("Admin not found")]
    NotFound,

    /// The call timed out or the backend refused the connection.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("Identity service error: {0}")]
    Internal(String),
}

/// Authorization and session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials or session")]
    NotFound,

    #[error("Invalid credentials or session")]
    Inactive,

    /// A management action failed its gate. The session stays valid.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The identity lookup could not complete. Retrying is up to the caller.
    #[error("Identity lookup unavailable: {0}")]
    Unavailable(String),

    /// A newer login or a logout replaced this attempt before it resolved.
    #[error("Session transition superseded by a newer request")]
    Superseded,

    /// An admin record violates a structural invariant.
    #[error("Invalid admin record: {0}")]
    InvalidRecord(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord(reason.into())
    }

    /// True for the two errors that surface as "invalid credentials".
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::NotFound | Self::Inactive)
    }
}

impl From<LookupError> for AuthError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => AuthError::NotFound,
            LookupError::Unavailable(reason) => AuthError::Unavailable(reason),
            LookupError::Internal(reason) => AuthError::Internal(reason),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::NotFound | AuthError::Inactive => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Superseded => StatusCode::CONFLICT,
            AuthError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}
