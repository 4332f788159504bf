// File: connector/src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::constants::{defaults, paths};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Scheme of the matching WebSocket endpoint.
    pub fn websocket(self) -> &'static str {
        match self {
            Scheme::Http => "ws",
            Scheme::Https => "wss",
        }
    }
}

/// Where the ASF IPC server lives. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub base_path: String,
    pub password: Option<String>,
}

impl Default for EndpointTarget {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            base_path: defaults::BASE_PATH.to_string(),
            password: None,
        }
    }
}

impl EndpointTarget {
    /// `scheme://host:port`, no trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.scheme.as_str(), self.host, self.port)
    }

    /// Origin plus base path. Resources are appended to this verbatim.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin(), self.base_path)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.origin(), paths::HEALTH_CHECK)
    }

    pub fn websocket_url(&self, resource: &str) -> String {
        format!(
            "{}://{}:{}{}{}",
            self.scheme.websocket(),
            self.host,
            self.port,
            self.base_path,
            resource
        )
    }
}

/// One name or many. Lets a single key, bot, or license stand in for a list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Selector for every bot ASF knows about.
    pub fn all_bots() -> Self {
        Self(vec![paths::ALL_BOTS.to_string()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form used in `/Bot/{names}` paths.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for NameList {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for NameList {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&String> for NameList {
    fn from(value: &String) -> Self {
        Self(vec![value.clone()])
    }
}

impl From<Vec<String>> for NameList {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for NameList {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for NameList {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for NameList {
    fn from(value: &[String]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for NameList {
    fn from(value: [&str; N]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeSet<String>> for NameList {
    fn from(value: BTreeSet<String>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<HashSet<String>> for NameList {
    fn from(value: HashSet<String>) -> Self {
        // sorted so the wire order does not depend on hasher state
        let sorted: BTreeSet<String> = value.into_iter().collect();
        Self::from(sorted)
    }
}

/// `ECryptoMethod` ids accepted by `/ASF/Encrypt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoMethod {
    PlainText = 0,
    Aes = 1,
    ProtectedDataForCurrentUser = 2,
    EnvironmentVariable = 3,
    File = 4,
}

impl CryptoMethod {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// `EHashingMethod` ids accepted by `/ASF/Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashingMethod {
    PlainText = 0,
    SCrypt = 1,
    Pbkdf2 = 2,
}

impl HashingMethod {
    pub fn id(self) -> u8 {
        self as u8
    }
}
