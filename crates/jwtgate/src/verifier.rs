//! JWT verification on top of `jsonwebtoken`.
//!
//! The declared `alg` is checked against the configured signing method before
//! any key material is touched, so a token can never pick its own algorithm.

use std::collections::HashSet;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::VerifyError;

/// A verified token, as attached to the request context.
#[derive(Debug, Clone)]
pub struct Token {
    /// The original compact-serialized credential.
    pub raw: String,
    /// The decoded JOSE header.
    pub header: Header,
    /// The claims payload.
    pub claims: Map<String, Value>,
    /// Signing method the token was verified with (e.g. `HS256`).
    pub method: String,
    /// Whether the token passed verification.
    pub valid: bool,
}

impl Token {
    /// The `sub` claim, if it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }

    /// A single claim by name.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(claims: Map<String, Value>) -> Self {
        Self {
            raw: String::new(),
            header: Header::default(),
            claims,
            method: "HS256".to_string(),
            valid: true,
        }
    }
}

/// Verifies credentials against one key and one algorithm.
#[derive(Clone)]
pub struct Verifier {
    method: String,
    key: DecodingKey,
    validation: Validation,
}

impl Verifier {
    /// Build a verifier for `algorithm` with raw HMAC key bytes.
    pub fn new(algorithm: Algorithm, key: &[u8]) -> Self {
        let mut validation = Validation::new(algorithm);
        // exp/nbf are enforced when present but never required.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            method: algorithm_name(algorithm),
            key: DecodingKey::from_secret(key),
            validation,
        }
    }

    /// The signing method this verifier accepts.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Verify `raw` and return the token on success.
    pub fn verify(&self, raw: &str) -> Result<Token, VerifyError> {
        let header = decode_header(raw)?;
        let declared = algorithm_name(header.alg);
        if declared != self.method {
            return Err(VerifyError::UnexpectedSigningMethod(declared));
        }

        let data = decode::<Map<String, Value>>(raw, &self.key, &self.validation)?;

        Ok(Token {
            raw: raw.to_string(),
            header: data.header,
            claims: data.claims,
            method: declared,
            valid: true,
        })
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// The JOSE name of an algorithm (`HS256`, `RS256`, ...).
pub(crate) fn algorithm_name(alg: Algorithm) -> String {
    format!("{alg:?}")
}
