//! Layered service configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `DELIVERY_*` environment variables, the plain `PORT` variable and
//! finally the `--port` command-line flag.

use config::{Config, Environment, File, FileFormat};
use delivery_core::{Catalog, Facility, SolverConfig};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const ENV_PREFIX: &str = "DELIVERY";

/// Errors raised while assembling the service configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error(transparent)]
    Catalog(#[from] delivery_core::Error),
}

/// Keeps the environment entries whose key and value are valid UTF-8
pub fn utf8_vars<I>(vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Interface to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Transport cost per unit of distance
    pub cost_per_distance_unit: u64,

    /// Facility catalog; the reference catalog is used when empty
    #[serde(default)]
    pub facilities: Vec<Facility>,
}

impl ServiceConfig {
    /// Loads configuration from all sources.
    ///
    /// `env` stands in for the process environment so callers decide
    /// what is visible.
    pub fn load(
        file: Option<&Path>,
        env: &config::Map<String, String>,
        cli_port: Option<u16>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("cost_per_distance_unit", 2_i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        if let Some(raw) = env.get("PORT").filter(|raw| !raw.is_empty()) {
            let port: u16 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
            builder = builder.set_override("port", i64::from(port))?;
        }

        if let Some(port) = cli_port {
            builder = builder.set_override("port", i64::from(port))?;
        }

        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Builds the facility catalog this service plans against
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        if self.facilities.is_empty() {
            return Ok(Catalog::default());
        }
        Ok(Catalog::new(self.facilities.clone())?)
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            cost_per_distance_unit: self.cost_per_distance_unit,
        }
    }

    /// `host:port` string to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
