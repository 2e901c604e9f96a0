// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Token lifetimes, token purposes, pagination defaults, and account limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Token issuance constants
pub mod tokens {
    /// Lifetime of every issued token, in days
    pub const TOKEN_LIFETIME_DAYS: i64 = 30;

    /// Size of the symmetric token key in bytes (AES-256)
    pub const TOKEN_KEY_BYTES: usize = 32;

    /// Size of the AES-GCM nonce prepended to each token
    pub const NONCE_BYTES: usize = 12;

    /// Size of the AES-GCM authentication tag appended to each ciphertext
    pub const TAG_BYTES: usize = 16;
}

/// Purposes carried by reset tokens
pub mod token_purposes {
    /// Reset token authorizing a password change without the old password
    pub const PASSWORD_RESET: &str = "password_reset";

    /// Reset token authorizing an email address change
    pub const EMAIL_CHANGE: &str = "email_change";
}

/// Pagination defaults
pub mod pagination {
    /// Page size used when the request carries no span parameter
    pub const DEFAULT_PAGE_SIZE: usize = 12;
}

/// Account field limits and sign-in policy defaults
pub mod accounts {
    /// Maximum length of a display name, in characters
    pub const MAX_NAME_CHARS: usize = 64;

    /// Minimum password length (exclusive) after trimming whitespace
    pub const MIN_PASSWORD_CHARS: usize = 8;

    /// Failed sign-in attempts tolerated before an account is locked
    pub const DEFAULT_MAX_SIGNIN_ATTEMPTS: u32 = 5;
}

/// Service identifiers used in logs
pub mod service_names {
    /// Name of the backend service
    pub const VERBUM_SERVER: &str = "verbum-server";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Base64-encoded 32-byte token key
    pub const TOKEN_KEY: &str = "VERBUM_TOKEN_KEY";

    /// Failed sign-in attempts tolerated before lockout
    pub const MAX_SIGNIN_ATTEMPTS: &str = "VERBUM_MAX_SIGNIN_ATTEMPTS";

    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";

    /// Bind host for the transport layer
    pub const HOST: &str = "HOST";

    /// Bind port for the transport layer
    pub const HTTP_PORT: &str = "HTTP_PORT";
}

/// Network defaults
pub mod network {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
}
