//! Request context capabilities and the per-request token store.

use std::collections::HashMap;

use crate::Token;

/// The minimum a request must offer for the middleware to authenticate it.
///
/// Implemented for [`http::Request`]; tests and other frameworks can supply their own.
pub trait RequestContext {
    /// Value of the named request header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Decoded value of the first query parameter called `name`.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Store a verified token under `key` for downstream handlers.
    fn attach(&mut self, key: &str, token: Token);
}

/// Verified tokens attached to a request, keyed by context key.
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    tokens: HashMap<String, Token>,
}

impl Attachments {
    /// Token stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.get(key)
    }

    /// Store `token` under `key`, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, token: Token) {
        self.tokens.insert(key.into(), token);
    }

    /// Whether no token has been attached.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<B> RequestContext for http::Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let query = self.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    fn attach(&mut self, key: &str, token: Token) {
        let extensions = self.extensions_mut();
        match extensions.get_mut::<Attachments>() {
            Some(attachments) => attachments.insert(key, token),
            None => {
                let mut attachments = Attachments::default();
                attachments.insert(key, token);
                extensions.insert(attachments);
            }
        }
    }
}

/// Extract the token stored under `key` from HTTP request `Parts`, if present.
pub fn token_from_parts<'a>(parts: &'a http::request::Parts, key: &str) -> Option<&'a Token> {
    parts.extensions.get::<Attachments>()?.get(key)
}
