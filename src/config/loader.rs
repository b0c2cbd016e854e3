//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `upstream.base_url`.
pub const ENV_UPSTREAM_URL: &str = "EMPLOYEE_GATEWAY_UPSTREAM_URL";
/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "EMPLOYEE_GATEWAY_BIND";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from an optional TOML file.
///
/// A missing path yields the defaults. The result is not validated yet so
/// that overrides can still be applied.
pub fn read_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(GatewayConfig::default()),
    }
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub upstream_url: Option<String>,
    pub bind_address: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            upstream_url: non_blank(ENV_UPSTREAM_URL),
            bind_address: non_blank(ENV_BIND_ADDRESS),
        }
    }

    /// Combine with a higher-precedence set; its values win where present.
    pub fn merge(self, higher: ConfigOverrides) -> Self {
        Self {
            upstream_url: higher.upstream_url.or(self.upstream_url),
            bind_address: higher.bind_address.or(self.bind_address),
        }
    }

    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(url) = &self.upstream_url {
            config.upstream.base_url = url.clone();
        }
        if let Some(bind) = &self.bind_address {
            config.listener.bind_address = bind.clone();
        }
    }
}

/// Load the file, apply environment then `cli` overrides, and validate.
pub fn load_config(
    path: Option<&Path>,
    cli: ConfigOverrides,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = read_config(path)?;
    ConfigOverrides::from_env().merge(cli).apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
