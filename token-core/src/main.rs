// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `token-core` CLI
//!
//! One-shot demo binary over the [`Token`] façade: opens a single session
//! per invocation, runs one command, prints the result, exits. There is no
//! long-lived server process or wire transport here.

use std::process::ExitCode as ProcessExitCode;
use std::sync::Arc;

use token_core::application::{attr_catalog, mechanism_names, Token};
use token_core::infrastructure::config::TokenConfig;
use token_core::infrastructure::logging;
use token_core::infrastructure::repositories::{InMemoryObjectRepository, InMemorySessionRepository, RandPrimitiveEngine};
use token_core_bootstrap::cli::Commands;
use token_core_bootstrap::logger::{BootstrapLogger, ConsoleLogger};
use token_core_bootstrap::{bootstrap_cli, ExitCode};
use token_core_domain::error::CoreError;
use token_core_domain::value_objects::SessionRole;

fn main() -> ProcessExitCode {
    let logger = ConsoleLogger::new();

    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(err) => {
            logger.error(&err.to_string());
            return ProcessExitCode::from(ExitCode::UsageError.as_i32() as u8);
        }
    };

    let config = match TokenConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            logger.error(&err.to_string());
            return ProcessExitCode::from(ExitCode::DataError.as_i32() as u8);
        }
    };

    let level = logging::effective_level(config.log_level.to_tracing_level(), cli.verbose);
    if let Err(err) = logging::init_tracing(level) {
        logger.warn(&format!("tracing already initialized: {err}"));
    }

    match run(cli, &config, &logger) {
        Ok(()) => ProcessExitCode::SUCCESS,
        Err(err) => {
            logger.error(&err.to_string());
            let exit = ExitCode::from_error_category(err.category());
            ProcessExitCode::from(exit.as_i32() as u8)
        }
    }
}

fn run(
    cli: token_core_bootstrap::cli::Cli,
    config: &TokenConfig,
    logger: &dyn BootstrapLogger,
) -> Result<(), CoreError> {
    let overrides = config.key_size_overrides.iter().filter_map(|over| {
        match mechanism_names::mechanism_by_name(&over.mechanism) {
            Ok(id) => Some((id, over.min_bits_or_bytes, over.max_bits_or_bytes)),
            Err(_) => {
                logger.warn(&format!("ignoring key-size override for unknown mechanism {:?}", over.mechanism));
                None
            }
        }
    });
    let token = Token::new(
        Arc::new(InMemoryObjectRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(RandPrimitiveEngine::new()),
    )
    .with_key_size_overrides(overrides);

    let session_id = token.open_session(cli.read_write)?;
    if let Some(role) = cli.login {
        let role = match role {
            token_core_bootstrap::cli::LoginRole::User => SessionRole::User,
            token_core_bootstrap::cli::LoginRole::SecurityOfficer => SessionRole::SecurityOfficer,
        };
        token.login(session_id, role)?;
        logger.debug(&format!("logged in as {role:?}"));
    }

    match cli.command {
        Commands::Mechanisms => {
            for mechanism in token.mechanism_list() {
                println!("{}", mechanism_names::name_of_mechanism(mechanism));
            }
        }
        Commands::MechanismInfo { mechanism } => {
            let id = mechanism_names::mechanism_by_name(&mechanism)?;
            let info = token.mechanism_info(id)?;
            println!("mechanism:        {}", mechanism_names::name_of_mechanism(info.mechanism));
            println!("allowed_functions: {:#x}", info.allowed_functions);
            println!("token_supported:   {:#x}", info.token_supported_functions);
            println!("one_shot_only:     {}", info.one_shot_only);
            match info.key_size_bounds {
                Some((min, max)) => println!("key_size_bounds:   {min}..={max}"),
                None => println!("key_size_bounds:   n/a"),
            }
        }
        Commands::CreateObject { attrs } => {
            let attrs = attrs.iter().map(|raw| attr_catalog::parse_attr_arg(raw)).collect::<Result<Vec<_>, _>>()?;
            let handle = token.create_object(session_id, attrs)?;
            println!("{handle}");
        }
        Commands::GenerateKey { mechanism, attrs } => {
            let mechanism = mechanism_names::mechanism_by_name(&mechanism)?;
            let attrs = attrs.iter().map(|raw| attr_catalog::parse_attr_arg(raw)).collect::<Result<Vec<_>, _>>()?;
            let handle = token.generate_key(session_id, mechanism, attrs)?;
            println!("{handle}");
        }
        Commands::GeneratePair { mechanism, public_attrs, private_attrs } => {
            let mechanism = mechanism_names::mechanism_by_name(&mechanism)?;
            let public_attrs =
                public_attrs.iter().map(|raw| attr_catalog::parse_attr_arg(raw)).collect::<Result<Vec<_>, _>>()?;
            let private_attrs =
                private_attrs.iter().map(|raw| attr_catalog::parse_attr_arg(raw)).collect::<Result<Vec<_>, _>>()?;
            let (public, private) = token.generate_key_pair(session_id, mechanism, public_attrs, private_attrs)?;
            println!("public:  {public}");
            println!("private: {private}");
        }
        Commands::ListObjects => {
            for handle in token.list_objects()? {
                println!("{handle}");
            }
        }
        Commands::ShowObject { handle } => {
            let handle = handle
                .parse()
                .map_err(|_| CoreError::AttributeValueInvalid(format!("{handle:?} is not a valid object handle")))?;
            for (id, value) in token.show_object(session_id, handle)? {
                match attr_catalog::name_of_attr(id) {
                    Some(name) => println!("{name} = {value:?}"),
                    None => println!("{:#x} = {value:?}", id.0),
                }
            }
        }
    }

    Ok(())
}
