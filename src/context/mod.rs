// ABOUTME: Dependency injection contexts for request handling
// ABOUTME: Groups the shared services an endpoint layer needs behind cheap clones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Focused dependency injection contexts
//!
//! - `AuthContext`: token codec, validator, and account flows

/// Authentication context
pub mod auth;

pub use auth::AuthContext;
