// ABOUTME: Domain service layer for account flows and list endpoints
// ABOUTME: Transport-agnostic business rules consumed by the endpoint layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the business rules that sit between the token validator
//! and the endpoint layer, so every entry point applies them the same way.

/// Sign-up, sign-in lockout, password reset, and credential changes
pub mod accounts;

/// Per-endpoint ordering and anchoring for paged lists
pub mod listing;

/// Search query normalization and result merging
pub mod search;

pub use accounts::{AccountService, SessionGrant};
pub use listing::{ListItem, ListOrder, Listing};
pub use search::{merge_unique, normalize_query};
