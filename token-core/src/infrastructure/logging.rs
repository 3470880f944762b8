// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Tracing Setup
//!
//! Installs the process-wide `tracing` subscriber the CLI binary runs
//! under. A plain `FmtSubscriber` init, with no Prometheus wiring since
//! this crate's synchronous, single-token-per-process model has no use
//! for one.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs a global `tracing` subscriber at `level`. Must be called at
/// most once per process; `main` is the only caller.
pub fn init_tracing(level: Level) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_target(true).finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// `--verbose` forces `DEBUG` regardless of what the config file says:
/// the CLI flag always overrides the config value.
pub fn effective_level(configured: Level, verbose: bool) -> Level {
    if verbose && configured < Level::DEBUG {
        Level::DEBUG
    } else {
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_info_to_debug() {
        assert_eq!(effective_level(Level::INFO, true), Level::DEBUG);
    }

    #[test]
    fn verbose_does_not_lower_trace() {
        assert_eq!(effective_level(Level::TRACE, true), Level::TRACE);
    }

    #[test]
    fn non_verbose_keeps_configured_level() {
        assert_eq!(effective_level(Level::WARN, false), Level::WARN);
    }
}
