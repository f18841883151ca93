// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Tracing setup for the bacheca binary.
//!
//! Usage:
//!   bacheca --debug                 # Debug logging
//!   RUST_LOG=bacheca=trace bacheca  # Fine-grained log control
//!
//! Logs go to stderr so the terminal dialogue on stdout stays readable.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options.
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug if RUST_LOG is not set).
    pub debug: bool,
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
