// ABOUTME: Client-input errors raised while parsing pagination parameters
// ABOUTME: Malformed page sizes, conflicting cursors, and malformed range strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;

use super::{AppError, ErrorCode};

/// Invalid pagination input supplied by a caller
///
/// These are caller bugs rather than security-relevant failures, so they are
/// reported distinctly instead of being collapsed into an empty page.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size text is not a positive decimal integer
    #[error("Invalid span type: '{input}'")]
    InvalidPageSize {
        /// The rejected input, trimmed
        input: String,
    },

    /// Both `after` and `before` were supplied
    #[error("Cursors 'after' and 'before' are mutually exclusive")]
    ConflictingCursors,

    /// Range text is not `<size>` or `<size>,<index>`
    #[error("Invalid range: '{input}'")]
    InvalidRange {
        /// The rejected input
        input: String,
    },
}

impl PaginationError {
    /// Query parameter the error refers to
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidPageSize { .. } => "span",
            Self::ConflictingCursors => "after,before",
            Self::InvalidRange { .. } => "range",
        }
    }
}

impl From<PaginationError> for AppError {
    fn from(error: PaginationError) -> Self {
        Self::new(ErrorCode::InvalidInput, error.to_string())
            .with_details(json!({ "parameter": error.parameter() }))
            .with_source(error)
    }
}
