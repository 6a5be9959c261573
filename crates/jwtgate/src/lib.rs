//! JWT bearer authentication middleware.
//!
//! Provides:
//! - [`JwtConfig`] — Signing key, signing method, context key and token lookup
//! - [`Extractor`] — Pulls the raw credential from a header or query parameter
//! - [`Verifier`] — Checks the declared algorithm, then the signature and time claims
//! - [`JwtAuth`] — Handler decorator plus the [`JwtLayer`] / [`JwtService`] tower pair
//! - [`RequestContext`] — The request capabilities the middleware relies on
//!
//! Missing or malformed credentials are rejected with `400 Bad Request`; tokens that
//! fail verification get `401 Unauthorized`. The `Bearer` scheme is matched
//! case-sensitively, which is stricter than RFC 6750 allows.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use jwtgate::JwtAuth;
//!
//! # fn main() -> Result<(), jwtgate::ConfigError> {
//! let auth = JwtAuth::new("secret")?;
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hello" }))
//!     .layer(auth.layer());
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod error;
mod extractor;
mod middleware;
mod verifier;

pub use config::{
    JwtConfig, ResolvedConfig, DEFAULT_CONTEXT_KEY, DEFAULT_SIGNING_METHOD, DEFAULT_TOKEN_LOOKUP,
};
pub use context::{token_from_parts, Attachments, RequestContext};
pub use error::{AuthError, ConfigError, ExtractError, VerifyError};
pub use extractor::{Extractor, BEARER};
pub use middleware::{JwtAuth, JwtLayer, JwtService};
pub use verifier::{Token, Verifier};
