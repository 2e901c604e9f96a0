// ABOUTME: Verbum admin CLI for token key generation and token inspection
// ABOUTME: Decodes tokens under the configured key without revealing why a token is rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a key for VERBUM_TOKEN_KEY
//! verbum-admin generate-key
//!
//! # Show the claims inside an auth token
//! verbum-admin inspect --kind auth <TOKEN>
//! ```

use std::env;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use verbum_core::constants::env_config;
use verbum_server::crypto::TokenKey;
use verbum_server::logging::LoggingConfig;
use verbum_server::tokens::{AuthClaims, ClaimsSchema, ResetClaims, TokenCodec};

#[derive(Parser)]
#[command(
    name = "verbum-admin",
    about = "Verbum server administration CLI",
    long_about = "Generates token keys and inspects issued tokens under the configured key."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Token key override (base64 encoded); defaults to VERBUM_TOKEN_KEY
    #[arg(long, global = true)]
    token_key: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a fresh base64 token key
    GenerateKey,

    /// Decode a token and print its claims
    Inspect {
        /// Which claims type the token carries
        #[arg(long, value_enum, default_value_t = TokenKind::Auth)]
        kind: TokenKind,

        /// Token string
        token: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TokenKind {
    Auth,
    Reset,
}

fn load_key(override_key: Option<String>) -> Result<TokenKey> {
    let encoded = override_key
        .or_else(|| env::var(env_config::TOKEN_KEY).ok())
        .ok_or_else(|| anyhow!("{} is not set and no --token-key given", env_config::TOKEN_KEY))?;
    TokenKey::from_base64(&encoded)
}

fn render<C: ClaimsSchema + Serialize>(codec: &TokenCodec, token: &str) -> Result<String> {
    match codec.decode::<C>(token) {
        Ok(claims) => Ok(serde_json::to_string_pretty(&claims)?),
        Err(failure) => {
            debug!(reason = %failure, "Token did not decode");
            Ok("invalid token".to_owned())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.into(),
        ..LoggingConfig::default()
    };
    logging.init()?;

    match cli.command {
        Command::GenerateKey => {
            println!("{}", TokenKey::generate().to_base64());
        }
        Command::Inspect { kind, token } => {
            let key = load_key(cli.token_key)?;
            let codec = TokenCodec::with_default_lifetime(&key);
            let output = match kind {
                TokenKind::Auth => render::<AuthClaims>(&codec, token.trim())?,
                TokenKind::Reset => render::<ResetClaims>(&codec, token.trim())?,
            };
            println!("{output}");
        }
    }

    Ok(())
}
