//! Configuration loading and validation for the crypto API service.
//!
//! Sources, later wins: built-in defaults, `CRYPTO_API_*` environment
//! variables, command-line flags. The process exits with a clear error message
//! if the merged result is invalid.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::crypto::KeyMaterial;

/// Prefix stripped from environment variable names (`CRYPTO_API_PORT` → `port`).
pub const ENV_PREFIX: &str = "CRYPTO_API";

/// Command-line flags. Every flag is optional and overrides the environment.
#[derive(Default, Parser)]
#[command(name = "crypto-api", about = "JSON field encryption and signing service", version)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,

    /// Field cipher: `base64` (default) or `aesgcm`.
    #[arg(long = "encrypt-alg")]
    pub encrypt_alg: Option<String>,

    /// Key used for field encryption and signing.
    #[arg(long = "encrypt-key")]
    pub encrypt_key: Option<String>,

    /// Tracing log level (e.g. `info`, `debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Key for the field cipher and the signer. Redacted in `Debug`.
    #[serde(default = "default_encryption_key")]
    pub encryption_key: KeyMaterial,

    /// Requested field cipher. Unrecognised names fall back to `base64` at startup.
    #[serde(default = "default_encryption_algorithm")]
    pub encryption_algorithm: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP/gRPC endpoint for span export. Unset disables export.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3000
}
fn default_encryption_key() -> KeyMaterial {
    KeyMaterial::new("secret")
}
fn default_encryption_algorithm() -> String {
    "base64".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from the process environment and `cli`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or fails validation.
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::from_sources(cli, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(cli: &Cli, env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .set_override_option("port", cli.port.map(i64::from))
            .and_then(|b| b.set_override_option("encryption_algorithm", cli.encrypt_alg.clone()))
            .and_then(|b| b.set_override_option("encryption_key", cli.encrypt_key.clone()))
            .and_then(|b| b.set_override_option("log_level", cli.log_level.clone()))
            .context("failed to apply command-line overrides")?
            .build()
            .context("failed to build configuration")?;

        let mut c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.otel_exporter_otlp_endpoint = c
            .otel_exporter_otlp_endpoint
            .take()
            .filter(|endpoint| !endpoint.trim().is_empty());

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("CRYPTO_API_PORT must be a non-zero port");
        }
        if self.encryption_key.is_empty() {
            anyhow::bail!("CRYPTO_API_ENCRYPTION_KEY is required and must not be empty");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("CRYPTO_API_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_are_correct() {
        let cfg = Config::from_sources(&Cli::default(), env(&[])).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.encryption_key.as_bytes(), b"secret");
        assert_eq!(cfg.encryption_algorithm, "base64");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.otel_exporter_otlp_endpoint.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::from_sources(
            &Cli::default(),
            env(&[
                ("CRYPTO_API_PORT", "8080"),
                ("CRYPTO_API_ENCRYPTION_ALGORITHM", "aesgcm"),
                ("CRYPTO_API_ENCRYPTION_KEY", "0123456789abcdef"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.encryption_algorithm, "aesgcm");
        assert_eq!(cfg.encryption_key.as_bytes().len(), 16);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from(["crypto-api", "--port", "9090", "--encrypt-alg", "base64"]);
        let cfg = Config::from_sources(
            &cli,
            env(&[
                ("CRYPTO_API_PORT", "8080"),
                ("CRYPTO_API_ENCRYPTION_ALGORITHM", "aesgcm"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.encryption_algorithm, "base64");
    }

    #[test]
    fn empty_otlp_endpoint_is_unset() {
        let cfg = Config::from_sources(
            &Cli::default(),
            env(&[("CRYPTO_API_OTEL_EXPORTER_OTLP_ENDPOINT", " ")]),
        )
        .unwrap();
        assert!(cfg.otel_exporter_otlp_endpoint.is_none());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let cli = Cli {
            port: Some(0),
            ..Cli::default()
        };
        assert!(Config::from_sources(&cli, env(&[])).is_err());
    }

    #[test]
    fn validate_rejects_empty_key() {
        let cli = Cli {
            encrypt_key: Some(String::new()),
            ..Cli::default()
        };
        assert!(Config::from_sources(&cli, env(&[])).is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config::from_sources(&Cli::default(), env(&[])).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("secret"));
    }
}
