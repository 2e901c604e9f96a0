// ABOUTME: Configuration module root for the Verbum server
// ABOUTME: Re-exports environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management

/// Environment variable loading and validation
pub mod environment;

pub use environment::{Environment, ServerConfig};
