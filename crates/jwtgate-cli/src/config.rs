//! File configuration for the `jwtgate` binary.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use jwtgate::JwtConfig;
use serde::Deserialize;

/// Default listen address for `jwtgate serve`.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Top-level config file layout.
///
/// ```toml
/// [auth]
/// signing_key = "secret"
/// token_lookup = "header:Authorization"
///
/// [server]
/// addr = "127.0.0.1:8080"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub auth: JwtConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .with_context(|| format!("invalid listen address '{}'", self.addr))
    }
}

impl FileConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Replace the signing key when one is given on the command line or environment.
    pub fn with_signing_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key {
            self.auth.signing_key = key.into_bytes();
        }
        self
    }
}
