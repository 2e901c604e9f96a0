// ABOUTME: Main library entry point for the Verbum social backend core
// ABOUTME: Token issuance and validation, account flows, and cursor-paged listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Verbum Server
//!
//! Core of a social network for sharing quotes: posts, comments, likes,
//! follows, and search. The endpoint layer sits on top of this crate.
//!
//! ## Architecture
//!
//! - **Tokens**: encrypted auth and reset tokens under one process key
//! - **Auth**: validation of tokens against live account state
//! - **Services**: sign-up, sign-in lockout, password reset, list ordering, search
//! - **Pagination**: cursor windowing shared by every list endpoint
//! - **Config**: environment-driven configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use verbum_server::config::ServerConfig;
//! use verbum_server::context::AuthContext;
//! use verbum_server::database::InMemoryAccountStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let auth = AuthContext::from_config(&config, Arc::new(InMemoryAccountStore::new()));
//!
//!     let grant = auth
//!         .accounts()
//!         .sign_up("Ada", "ada@example.com", "a long passphrase")
//!         .await?;
//!     let principal = auth.validator().validate_auth(&grant.auth_token).await;
//!     assert!(principal.is_some());
//!     Ok(())
//! }
//! ```

/// Token validation against live account state
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Dependency injection contexts
pub mod context;

/// Token keys and password hashing
pub mod crypto;

/// Account storage abstraction
pub mod database;

/// Unified error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Cursor pagination primitives
pub mod pagination;

/// Account flows, listing rules, and search helpers
pub mod services;

/// Encrypted token codec and claims
pub mod tokens;
