// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling: structure and security validation, kept
//! free of any Cryptoki/domain knowledge. `token-core`'s application layer
//! is responsible for turning `--attr NAME=VALUE` strings into typed
//! `AttrId`/`AttributeValue` pairs; this module only guarantees the shape
//! clap handed back is well-formed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  1. Cli::parse()                    │  Parse CLI with clap
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  2. validate_cli()                  │  Security validation
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  3. Cli (validated)                 │  Safe, validated config
//! └─────────────────────────────────────┘
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

/// Raw CLI surface.
#[derive(Parser, Debug, Clone)]
#[command(name = "token-core", about = "PKCS#11 token core demo", version)]
pub struct Cli {
    /// Open the demo session read-write.
    #[arg(long, global = true)]
    pub read_write: bool,

    /// Log in as this role before running the command (
    /// "Security Officer", "Public session").
    #[arg(long, value_enum, global = true)]
    pub login: Option<LoginRole>,

    /// Raise log verbosity (maps to `tracing`'s `DEBUG` level).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Optional config file overriding mechanism-catalog bounds/log level.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRole {
    User,
    SecurityOfficer,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every mechanism this token advertises as supported.
    Mechanisms,

    /// Show the catalog entry for one mechanism.
    MechanismInfo {
        /// Mechanism name, e.g. `AES_KEY_GEN`.
        mechanism: String,
    },

    /// Import (`CREATE_OBJECT`) an object from `--attr NAME=VALUE` pairs.
    CreateObject {
        #[arg(long = "attr")]
        attrs: Vec<String>,
    },

    /// Generate a secret key (`GENERATE_KEY`).
    GenerateKey {
        /// Mechanism name, e.g. `AES_KEY_GEN`.
        mechanism: String,
        #[arg(long = "attr")]
        attrs: Vec<String>,
    },

    /// Generate a public/private key pair (`GENERATE_KEY_PAIR`).
    GeneratePair {
        /// Mechanism name, e.g. `RSA_PKCS_KEY_PAIR_GEN`.
        mechanism: String,
        #[arg(long = "pub-attr")]
        public_attrs: Vec<String>,
        #[arg(long = "priv-attr")]
        private_attrs: Vec<String>,
    },

    /// List every object handle currently in the token's object table.
    ListObjects,

    /// Print every exportable attribute of one object.
    ShowObject {
        /// Object handle, printed by `create-object`/`generate-key`/`list-objects`.
        handle: String,
    },
}

/// CLI validation failure: reject malformed arguments before they reach
/// the façade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid value for --{arg}: {reason}")]
    InvalidValue { arg: String, reason: String },
}

/// Parses argv with clap, then applies the shape checks this layer owns
/// (domain-specific parsing of `--attr` strings is the application layer's
/// job, since it requires the Cryptoki attribute catalog).
pub fn parse_and_validate() -> Result<Cli, ParseError> {
    let cli = Cli::parse();
    validate_cli(&cli)?;
    Ok(cli)
}

fn validate_cli(cli: &Cli) -> Result<(), ParseError> {
    let attr_lists: Vec<&[String]> = match &cli.command {
        Commands::CreateObject { attrs } => vec![attrs.as_slice()],
        Commands::GenerateKey { attrs, .. } => vec![attrs.as_slice()],
        Commands::GeneratePair { public_attrs, private_attrs, .. } => {
            vec![public_attrs.as_slice(), private_attrs.as_slice()]
        }
        Commands::Mechanisms | Commands::MechanismInfo { .. } | Commands::ListObjects | Commands::ShowObject { .. } => {
            Vec::new()
        }
    };
    for attrs in attr_lists {
        for raw in attrs {
            validate_attr_arg(raw)?;
        }
    }
    Ok(())
}

/// `--attr` must be `NAME=VALUE` with a non-empty name; the value grammar
/// itself (`bool:`/`u32:`/`hex:` prefixes) is validated by the application
/// layer, which knows the attribute catalog.
fn validate_attr_arg(raw: &str) -> Result<(), ParseError> {
    match raw.split_once('=') {
        Some((name, _)) if !name.is_empty() => Ok(()),
        _ => Err(ParseError::InvalidValue {
            arg: "attr".to_string(),
            reason: format!("{raw:?} is not NAME=VALUE"),
        }),
    }
}
