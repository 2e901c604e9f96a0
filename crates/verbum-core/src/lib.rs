// ABOUTME: Core types and constants for the Verbum social backend
// ABOUTME: Foundation crate with error handling, cursor pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Verbum Core
//!
//! Foundation crate providing shared types and constants for the Verbum
//! social backend. It has no I/O and no async runtime dependency, so the
//! server crate and its tools can share one definition of errors and paging.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Cursor windowing over already-ordered listings

/// Unified error handling system with standard error codes and HTTP statuses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Cursor-based pagination over ordered listings
pub mod pagination;
