//! Auth-specific error types.

use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Errors raised while resolving a [`JwtConfig`](crate::JwtConfig).
///
/// These are programmer errors: they surface at start-up and never reach clients.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No signing key was configured.
    #[error("jwt middleware requires a signing key")]
    MissingSigningKey,

    /// The signing method is unknown or not an HMAC algorithm.
    #[error("unsupported signing method '{0}'")]
    UnsupportedSigningMethod(String),

    /// The token lookup is not of the form `<source>:<name>`.
    #[error("invalid token lookup '{0}': expected '<source>:<name>'")]
    InvalidTokenLookup(String),
}

/// Errors raised when no credential can be pulled out of a request.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// Header missing, wrong scheme, or nothing after the scheme.
    #[error("empty or invalid credential in authorization header")]
    InvalidHeader,

    /// Query parameter missing or empty.
    #[error("empty credential in query parameter")]
    EmptyQuery,
}

/// Errors raised while verifying a credential.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The token header declares an algorithm other than the configured one.
    #[error("unexpected signing method={0}")]
    UnexpectedSigningMethod(String),

    /// Malformed token, bad signature, expired, not yet valid, ...
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Parsed, but not marked valid.
    #[error("token is not valid")]
    Invalid,
}

/// A rejected request, as seen by the HTTP framework.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credential could not be extracted (400).
    #[error("{0}")]
    BadRequest(#[from] ExtractError),

    /// Credential failed verification (401). The reason is never sent to the client.
    #[error("Unauthorized")]
    Unauthorized(#[from] VerifyError),
}

impl AuthError {
    /// HTTP status for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AuthError::BadRequest(_) => "bad_request",
            AuthError::Unauthorized(_) => "authentication",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "category": self.category(),
                "message": self.to_string(),
            }
        });

        let mut response = (
            self.status(),
            [(http::header::CONTENT_TYPE, "application/json")],
            serde_json::to_string(&body).unwrap_or_default(),
        )
            .into_response();

        if matches!(self, AuthError::Unauthorized(_)) {
            response.headers_mut().insert(
                http::header::WWW_AUTHENTICATE,
                http::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
