//! Layered runtime configuration.
//!
//! Defaults, then an optional TOML file, then `FLOWSCOPE_*` environment
//! variables; command-line flags are applied on top by `main`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::monitor::Cadences;

/// Runtime settings for the overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the monitoring endpoint.
    pub endpoint: String,
    /// Pipe/store throughput polling cadence, in milliseconds.
    pub pipe_cadence_ms: u64,
    /// Process resource-usage polling cadence, in milliseconds.
    pub process_cadence_ms: u64,
    /// Record sample truncation threshold, in characters.
    pub record_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/".to_string(),
            pipe_cadence_ms: 500,
            process_cadence_ms: 3000,
            record_limit: 500,
        }
    }
}

impl Settings {
    /// Load settings from the optional config file and environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("pipe_cadence_ms", defaults.pipe_cadence_ms as i64)?
            .set_default("process_cadence_ms", defaults.process_cadence_ms as i64)?
            .set_default("record_limit", defaults.record_limit as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("FLOWSCOPE").try_parsing(true));

        let settings = builder
            .build()
            .context("loading configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        Ok(settings)
    }

    /// The endpoint base as a parsed URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint)
            .with_context(|| format!("invalid endpoint URL: {}", self.endpoint))
    }

    /// Polling cadences derived from the settings.
    pub fn cadences(&self) -> Cadences {
        Cadences {
            pipe: Duration::from_millis(self.pipe_cadence_ms),
            process: Duration::from_millis(self.process_cadence_ms),
        }
    }
}
