// File: connector/src/config/loader.rs
use std::env;
use std::path::Path;
use tracing::debug;

use super::{ConfigError, ConnectorConfig, PortSetting, RawSettings};

pub const ENV_HOST: &str = "ASF_HOST";
pub const ENV_PORT: &str = "ASF_PORT";
pub const ENV_PASSWORD: &str = "ASF_PASSWORD";
pub const ENV_PATH: &str = "ASF_PATH";
pub const ENV_RICH_TRACEBACK: &str = "ENABLE_RICH_TRACEBACK";

impl ConnectorConfig {
    /// Settings from `ASF_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        raw_from_env()?.validate()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        raw_from_toml(content)?.validate()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        raw_from_file(path.as_ref())?.validate()
    }

    /// Defaults, then the TOML file if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut raw = RawSettings::default();
        if let Some(path) = path {
            raw = raw.overlay(raw_from_file(path)?);
        }
        raw.overlay(raw_from_env()?).validate()
    }
}

fn raw_from_file(path: &Path) -> Result<RawSettings, ConfigError> {
    debug!("Loading connector config: {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    raw_from_toml(&content)
}

fn raw_from_toml(content: &str) -> Result<RawSettings, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

fn raw_from_env() -> Result<RawSettings, ConfigError> {
    let rich = match env_var(ENV_RICH_TRACEBACK) {
        Some(value) => Some(parse_flag(ENV_RICH_TRACEBACK, &value)?),
        None => None,
    };

    Ok(RawSettings {
        asf_host: env_var(ENV_HOST),
        asf_port: env_var(ENV_PORT).map(PortSetting::Text),
        asf_password: env_var(ENV_PASSWORD),
        asf_path: env_var(ENV_PATH),
        enable_rich_traceback: rich,
    })
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: name.to_string(),
            reason: format!("expected a boolean, got \"{}\"", other),
        }),
    }
}
