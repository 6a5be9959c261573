//! jwtgate CLI
//!
//! Runs a demo server behind the JWT middleware and checks tokens offline.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jwtgate::JwtAuth;
use tracing_subscriber::EnvFilter;

use crate::config::FileConfig;

/// jwtgate - JWT bearer authentication middleware
#[derive(Parser, Debug)]
#[command(name = "jwtgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Signing key, overriding the config file
    #[arg(long, env = "JWTGATE_SIGNING_KEY", hide_env_values = true, global = true)]
    signing_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve /health and a protected /whoami
    Serve {
        /// Listen address, overriding the config file
        #[arg(long)]
        addr: Option<String>,
    },
    /// Verify a token and print its claims
    Verify {
        /// The compact-serialized JWT
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = FileConfig::load(args.config.as_deref())?.with_signing_key(args.signing_key);
    let auth = JwtAuth::with_config(config.auth.clone()).context("invalid auth configuration")?;

    match args.command {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            let addr = config.server.socket_addr()?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!(%addr, lookup = %config.auth.token_lookup, "jwtgate listening");
            axum::serve(listener, server::router(auth)).await?;
        }
        Command::Verify { token } => {
            let verified = auth
                .config()
                .verifier
                .verify(&token)
                .context("token verification failed")?;
            println!("{}", serde_json::to_string_pretty(&verified.claims)?);
        }
    }

    Ok(())
}
