// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Configuration
//!
//! Loads the handful of knobs the CLI binary needs beyond what's on argv:
//! log verbosity and an optional override of a mechanism's key-size bounds.
//! Layered `file < env < CLI flag`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Verbosity knob, translated to a `tracing::Level` by [`super::logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// One `ALLOWED_MECHANISMS`-shaped override: a mechanism's key-size bounds
/// as deployed, rather than the catalog default. Keyed by the CLI/wire
/// mechanism name (`mechanism_names::mechanism_by_name`), not `MechanismId`,
/// since `serde` has no business depending on `token-core-domain`'s enum
/// layout.
#[derive(Debug, Clone, Deserialize)]
pub struct KeySizeOverride {
    pub mechanism: String,
    pub min_bits_or_bytes: u32,
    pub max_bits_or_bytes: u32,
}

/// The deployable subset of `token-core`'s behavior: what a config file (or
/// `TOKEN_CORE_*` environment variables) may adjust without a recompile.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TokenConfig {
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub key_size_overrides: Vec<KeySizeOverride>,
}

impl TokenConfig {
    pub fn builder() -> TokenConfigBuilder {
        TokenConfigBuilder::default()
    }

    /// Loads `TokenConfig` from an optional TOML file plus `TOKEN_CORE_*`
    /// environment variables, the environment taking precedence. Absent
    /// both, returns the all-defaults config rather than erroring — the CLI
    /// is meant to run with zero setup.
    pub fn load(path: Option<&Path>) -> Result<TokenConfig, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix("TOKEN_CORE").separator("_"));
        let built = builder.build().map_err(|e| ConfigError::Load(e.to_string()))?;
        built.try_deserialize().map_err(|e| ConfigError::Load(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct TokenConfigBuilder {
    log_level: Option<LogLevel>,
    key_size_overrides: Vec<KeySizeOverride>,
}

impl TokenConfigBuilder {
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn key_size_override(mut self, over: KeySizeOverride) -> Self {
        self.key_size_overrides.push(over);
        self
    }

    pub fn build(self) -> TokenConfig {
        TokenConfig { log_level: self.log_level.unwrap_or_default(), key_size_overrides: self.key_size_overrides }
    }
}

/// Config-loading failure. Kept separate from [`token_core_domain::error::CoreError`]:
/// a bad config file is an operator error discovered before any session
/// exists, not a Cryptoki status the façade could ever return.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(String),
}
