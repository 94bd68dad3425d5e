#![allow(clippy::must_use_candidate)]

//! Configuration for the trade aggregator
//!
//! Loaded from a TOML file whose values may reference environment
//! variables through `{{ env.VAR }}` placeholders.

pub mod customer_service;
mod env;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use customer_service::CustomerServiceConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level aggregator configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote customer service connection
    pub customer_service: CustomerServiceConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
