//! Credential extraction from a request context.

use crate::{ExtractError, RequestContext};

/// Scheme expected in front of header credentials.
pub const BEARER: &str = "Bearer";

/// Where to find the credential on a request. Resolved once per middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// `<name>: Bearer <token>`
    Header(String),
    /// `?<name>=<token>`
    Query(String),
}

impl Extractor {
    /// Pull the raw credential out of `ctx`.
    pub fn extract<C: RequestContext + ?Sized>(&self, ctx: &C) -> Result<String, ExtractError> {
        match self {
            Extractor::Header(name) => ctx
                .header(name)
                .and_then(strip_bearer)
                .map(str::to_string)
                .ok_or(ExtractError::InvalidHeader),
            Extractor::Query(name) => ctx
                .query_param(name)
                .filter(|token| !token.is_empty())
                .ok_or(ExtractError::EmptyQuery),
        }
    }
}

/// Accepts `value` iff it is longer than `"Bearer "` and starts with `"Bearer"`.
/// The byte after the scheme is skipped unchecked; matching is case-sensitive.
fn strip_bearer(value: &str) -> Option<&str> {
    let l = BEARER.len();
    if value.len() > l + 1 && value.as_bytes().starts_with(BEARER.as_bytes()) {
        value.get(l + 1..)
    } else {
        None
    }
}
