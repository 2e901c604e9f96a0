// ABOUTME: Integration tests for environment-driven server and logging configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::sync::Arc;

use serial_test::serial;
use verbum_server::config::{Environment, ServerConfig};
use verbum_server::context::AuthContext;
use verbum_server::crypto::TokenKey;
use verbum_server::database::InMemoryAccountStore;
use verbum_server::logging::{LogFormat, LoggingConfig};

const VARIABLES: [&str; 8] = [
    "VERBUM_TOKEN_KEY",
    "VERBUM_MAX_SIGNIN_ATTEMPTS",
    "ENVIRONMENT",
    "HOST",
    "HTTP_PORT",
    "RUST_LOG",
    "LOG_FORMAT",
    "SERVICE_NAME",
];

fn clear_environment() {
    for name in VARIABLES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_server_config_from_env() {
    clear_environment();
    let key = TokenKey::generate();
    env::set_var("VERBUM_TOKEN_KEY", key.to_base64());
    env::set_var("VERBUM_MAX_SIGNIN_ATTEMPTS", "3");
    env::set_var("HOST", "127.0.0.1");
    env::set_var("HTTP_PORT", "8088");
    env::set_var("ENVIRONMENT", "production");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.max_signin_attempts, 3);
    assert_eq!(config.bind_address(), "127.0.0.1:8088");
    assert_eq!(config.token_key.as_bytes(), key.as_bytes());

    clear_environment();
}

#[test]
#[serial]
fn test_production_requires_token_key() {
    clear_environment();
    env::set_var("ENVIRONMENT", "production");

    let error = ServerConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("VERBUM_TOKEN_KEY"));

    clear_environment();
}

#[test]
#[serial]
fn test_development_generates_token_key() {
    clear_environment();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.max_signin_attempts, 5);
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_environment();

    env::set_var("VERBUM_TOKEN_KEY", "c2hvcnQ");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("VERBUM_TOKEN_KEY");

    env::set_var("VERBUM_MAX_SIGNIN_ATTEMPTS", "many");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("VERBUM_MAX_SIGNIN_ATTEMPTS", "0");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("VERBUM_MAX_SIGNIN_ATTEMPTS");

    env::set_var("HTTP_PORT", "70000");
    assert!(ServerConfig::from_env().is_err());

    clear_environment();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_environment();
    env::set_var("RUST_LOG", "debug");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "verbum-test");

    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.service_name, "verbum-test");
    assert!(config.include_location);

    env::set_var("LOG_FORMAT", "compact");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);

    clear_environment();
}

#[tokio::test]
#[serial]
async fn test_auth_context_from_config() {
    clear_environment();
    env::set_var("VERBUM_MAX_SIGNIN_ATTEMPTS", "1");
    let config = ServerConfig::from_env().unwrap();
    clear_environment();

    let store = Arc::new(InMemoryAccountStore::new());
    let context = AuthContext::from_config(&config, store.clone());

    let grant = context
        .accounts()
        .sign_up("Cato", "cato@example.com", "utica-forever")
        .await
        .unwrap();
    assert!(context.validator().validate_auth(&grant.auth_token).await.is_some());
    assert_eq!(context.codec().lifetime().num_days(), 30);

    assert!(context
        .accounts()
        .sign_in("cato@example.com", "wrong-password")
        .await
        .is_err());
    assert!(context.validator().validate_auth(&grant.auth_token).await.is_none());
    assert!(!store.get(&grant.user_id).unwrap().is_active);
}
