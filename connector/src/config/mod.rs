// File: connector/src/config/mod.rs
//! Connection settings for the ASF IPC server
//!
//! Settings come from environment variables and/or a TOML file (see
//! [`loader`]). Every source goes through the same validation before a
//! [`ConnectorConfig`] exists, so a connector is never built from a bad
//! host or port.

pub mod loader;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::constants::defaults;
use crate::types::{EndpointTarget, Scheme};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to load config from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// A setting was present but unusable
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Configuration file was not valid TOML for these settings
    #[error("Failed to parse config: {reason}")]
    ParseError { reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validated connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub asf_host: String,
    pub asf_port: u16,
    pub asf_password: Option<String>,
    pub asf_path: String,
    /// Display only: print full error cause chains in the CLI
    pub enable_rich_traceback: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            asf_host: defaults::HOST.to_string(),
            asf_port: defaults::PORT,
            asf_password: None,
            asf_path: defaults::BASE_PATH.to_string(),
            enable_rich_traceback: false,
        }
    }
}

impl ConnectorConfig {
    pub fn endpoint(&self) -> EndpointTarget {
        EndpointTarget {
            scheme: Scheme::Http,
            host: self.asf_host.clone(),
            port: self.asf_port,
            base_path: self.asf_path.clone(),
            password: self.asf_password.clone(),
        }
    }

    /// Log the effective settings with the password masked.
    pub fn log_config(&self) {
        info!(
            "ASF Config - Host: {}, Port: {}, Path: {}, Password: {}",
            self.asf_host,
            self.asf_port,
            self.asf_path,
            if self.asf_password.is_some() { "***" } else { "None" }
        );
    }
}

/// Port as written in a source: TOML may hold a number, the environment always a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortSetting {
    Number(i64),
    Text(String),
}

/// Unvalidated settings from one source. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSettings {
    pub asf_host: Option<String>,
    pub asf_port: Option<PortSetting>,
    pub asf_password: Option<String>,
    pub asf_path: Option<String>,
    pub enable_rich_traceback: Option<bool>,
}

impl RawSettings {
    /// Fields set in `other` win over fields set in `self`.
    pub fn overlay(self, other: RawSettings) -> RawSettings {
        RawSettings {
            asf_host: other.asf_host.or(self.asf_host),
            asf_port: other.asf_port.or(self.asf_port),
            asf_password: other.asf_password.or(self.asf_password),
            asf_path: other.asf_path.or(self.asf_path),
            enable_rich_traceback: other.enable_rich_traceback.or(self.enable_rich_traceback),
        }
    }

    /// Apply defaults and validate.
    pub fn validate(self) -> Result<ConnectorConfig, ConfigError> {
        let defaults = ConnectorConfig::default();

        let asf_host = match self.asf_host {
            Some(host) => validate_host(&host)?,
            None => defaults.asf_host,
        };
        let asf_port = match self.asf_port {
            Some(port) => validate_port(&port)?,
            None => defaults.asf_port,
        };
        let asf_path = match self.asf_path {
            Some(path) => normalize_path(&path),
            None => defaults.asf_path,
        };

        Ok(ConnectorConfig {
            asf_host,
            asf_port,
            asf_password: self.asf_password.filter(|p| !p.is_empty()),
            asf_path,
            enable_rich_traceback: self.enable_rich_traceback.unwrap_or(false),
        })
    }
}

pub fn validate_host(host: &str) -> Result<String, ConfigError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ConfigError::invalid("asf_host", "ASF_HOST cannot be empty"));
    }
    Ok(host.to_string())
}

pub fn validate_port(port: &PortSetting) -> Result<u16, ConfigError> {
    let number = match port {
        PortSetting::Number(n) => *n,
        PortSetting::Text(text) => {
            let text = text.trim();
            text.parse::<i64>().map_err(|_| {
                ConfigError::invalid(
                    "asf_port",
                    format!("Port must be a valid number, got \"{}\"", text),
                )
            })?
        }
    };

    if !(1..=65535).contains(&number) {
        return Err(ConfigError::invalid(
            "asf_port",
            format!("Port must be between 1 and 65535, got {}", number),
        ));
    }
    Ok(number as u16)
}

/// Trim and force a leading `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
