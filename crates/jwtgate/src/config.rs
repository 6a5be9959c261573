//! Middleware configuration and its resolution into a ready-to-use form.

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Deserializer};

use crate::{ConfigError, Extractor, Verifier};

/// Default signing method.
pub const DEFAULT_SIGNING_METHOD: &str = "HS256";

/// Default key under which the verified token is attached.
pub const DEFAULT_CONTEXT_KEY: &str = "user";

/// Default credential location.
pub const DEFAULT_TOKEN_LOOKUP: &str = "header:Authorization";

/// Configuration for the JWT middleware.
///
/// Empty fields are filled with defaults by [`JwtConfig::resolve`].
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JwtConfig {
    /// Key used to validate token signatures. Required.
    #[serde(deserialize_with = "key_from_str")]
    pub signing_key: Vec<u8>,

    /// Algorithm tokens must declare. Default `HS256`.
    pub signing_method: String,

    /// Key under which the verified token is attached to the request. Default `user`.
    pub context_key: String,

    /// `<source>:<name>` where source is `header` or `query`.
    /// Default `header:Authorization`.
    pub token_lookup: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signing_key: Vec::new(),
            signing_method: DEFAULT_SIGNING_METHOD.to_string(),
            context_key: DEFAULT_CONTEXT_KEY.to_string(),
            token_lookup: DEFAULT_TOKEN_LOOKUP.to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("signing_key", &"<redacted>")
            .field("signing_method", &self.signing_method)
            .field("context_key", &self.context_key)
            .field("token_lookup", &self.token_lookup)
            .finish()
    }
}

fn key_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    String::deserialize(deserializer).map(String::into_bytes)
}

impl JwtConfig {
    /// Default configuration with the given signing key.
    pub fn with_key(key: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_key: key.into(),
            ..Self::default()
        }
    }

    /// Validate, fill defaults and bind the extractor and verifier.
    pub fn resolve(mut self) -> Result<ResolvedConfig, ConfigError> {
        if self.signing_key.is_empty() {
            return Err(ConfigError::MissingSigningKey);
        }
        if self.signing_method.is_empty() {
            self.signing_method = DEFAULT_SIGNING_METHOD.to_string();
        }
        if self.context_key.is_empty() {
            self.context_key = DEFAULT_CONTEXT_KEY.to_string();
        }
        if self.token_lookup.is_empty() {
            self.token_lookup = DEFAULT_TOKEN_LOOKUP.to_string();
        }

        let algorithm = hmac_algorithm(&self.signing_method)?;
        let extractor = parse_token_lookup(&self.token_lookup)?;

        Ok(ResolvedConfig {
            verifier: Verifier::new(algorithm, &self.signing_key),
            extractor,
            context_key: self.context_key,
        })
    }
}

/// Configuration after defaults and validation; shared by every request.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Bound credential extractor.
    pub extractor: Extractor,
    /// Verifier for the configured key and method.
    pub verifier: Verifier,
    /// Key the verified token is attached under.
    pub context_key: String,
}

fn hmac_algorithm(method: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(method) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedSigningMethod(method.to_string())),
    }
}

fn parse_token_lookup(lookup: &str) -> Result<Extractor, ConfigError> {
    let invalid = || ConfigError::InvalidTokenLookup(lookup.to_string());

    let (source, name) = lookup.split_once(':').ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }

    match source {
        "query" => Ok(Extractor::Query(name.to_string())),
        other => {
            if other != "header" {
                log::warn!("Unknown token lookup source '{other}', reading header '{name}'");
            }
            http::HeaderName::from_str(name).map_err(|_| invalid())?;
            Ok(Extractor::Header(name.to_string()))
        }
    }
}
