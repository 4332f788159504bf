// File: connector/src/connector.rs
//! Top-level connector
//!
//! [`AsfConnector`] owns the single shared [`IpcTransport`] and one controller
//! per resource family. Calls work with or without an open scope; a scope only
//! lets them share one pooled client.
//!
//! ```no_run
//! # async fn demo() -> asf_connector::errors::Result<()> {
//! use asf_connector::AsfConnector;
//!
//! let connector = AsfConnector::builder().password("secret").build()?;
//! let scope = connector.open().await?;
//! let info = scope.asf().get_info().await?;
//! println!("{}", info["Result"]["Version"]);
//! scope.close();
//! # Ok(())
//! # }
//! ```

use serde_json::{json, Value};
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::ConnectorConfig;
use crate::controllers::{
    AsfController, BotController, CommandController, NLogController, StructureController,
    TwoFactorAuthenticationController, TypeController,
};
use crate::errors::Result;
use crate::response;
use crate::transport::{error_from_status, IpcTransport};
use crate::types::{EndpointTarget, Scheme};

pub struct AsfConnector {
    transport: Arc<IpcTransport>,
    asf: AsfController,
    bot: BotController,
    command: CommandController,
    nlog: NLogController,
    type_info: TypeController,
    structure: StructureController,
    twofa: TwoFactorAuthenticationController,
}

/// Explicit settings for [`AsfConnector`]. Omitted fields take the defaults
/// (`127.0.0.1`, `1242`, `/Api`, no password).
#[derive(Debug, Clone, Default)]
pub struct ConnectorBuilder {
    target: EndpointTarget,
}

impl ConnectorBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.target.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.target.port = port;
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.target.base_path = base_path.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.target.password = Some(password.into());
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.target.scheme = scheme;
        self
    }

    pub fn build(self) -> Result<AsfConnector> {
        AsfConnector::from_target(self.target)
    }
}

impl AsfConnector {
    pub fn builder() -> ConnectorBuilder {
        ConnectorBuilder::default()
    }

    /// Build from explicit settings. `None` takes the default for that field.
    pub fn new(
        host: Option<&str>,
        port: Option<u16>,
        path: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(host) = host {
            builder = builder.host(host);
        }
        if let Some(port) = port {
            builder = builder.port(port);
        }
        if let Some(path) = path {
            builder = builder.base_path(path);
        }
        if let Some(password) = password {
            builder = builder.password(password);
        }
        builder.build()
    }

    pub fn from_target(target: EndpointTarget) -> Result<Self> {
        info!(
            "ASF connector initialized. Host: '{}'. Port: '{}'",
            target.host, target.port
        );
        let transport = Arc::new(IpcTransport::new(target)?);

        Ok(Self {
            asf: AsfController::new(transport.clone()),
            bot: BotController::new(transport.clone()),
            command: CommandController::new(transport.clone()),
            nlog: NLogController::new(transport.clone()),
            type_info: TypeController::new(transport.clone()),
            structure: StructureController::new(transport.clone()),
            twofa: TwoFactorAuthenticationController::new(transport.clone()),
            transport,
        })
    }

    /// Build from an already validated configuration.
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        debug!("ASF connector initialized from config object");
        Self::from_target(config.endpoint())
    }

    /// Load and validate configuration from the environment, then build.
    pub fn from_env() -> Result<Self> {
        let config = ConnectorConfig::from_env()?;
        config.log_config();
        Self::from_config(&config)
    }

    pub fn host(&self) -> &str {
        &self.transport.target().host
    }

    pub fn port(&self) -> u16 {
        self.transport.target().port
    }

    pub fn path(&self) -> &str {
        &self.transport.target().base_path
    }

    pub fn transport(&self) -> &Arc<IpcTransport> {
        &self.transport
    }

    pub fn asf(&self) -> &AsfController {
        &self.asf
    }

    pub fn bot(&self) -> &BotController {
        &self.bot
    }

    pub fn command(&self) -> &CommandController {
        &self.command
    }

    pub fn nlog(&self) -> &NLogController {
        &self.nlog
    }

    pub fn type_info(&self) -> &TypeController {
        &self.type_info
    }

    pub fn structure(&self) -> &StructureController {
        &self.structure
    }

    pub fn twofa(&self) -> &TwoFactorAuthenticationController {
        &self.twofa
    }

    // === Scoped pooled connection ===

    /// Open the pooled connection and probe `/HealthCheck`.
    ///
    /// A failing probe is logged, not raised: check [`ConnectionScope::health`]
    /// when the caller needs to fail fast. The pooled connection is released
    /// when the returned scope is dropped.
    pub async fn open(&self) -> Result<ConnectionScope<'_>> {
        self.transport.open_pool()?;
        let mut scope = ConnectionScope {
            connector: self,
            health: Value::Null,
        };
        debug!("ASF connector connection pool activated");

        let health = self.health_check().await;
        if response::is_success(&health) {
            info!("ASF health check passed");
        } else {
            warn!(
                "Health check failed: {}",
                response::message(&health).unwrap_or("Unknown error")
            );
        }
        scope.health = health;
        Ok(scope)
    }

    /// Run `f` inside a scope. The pooled connection is closed however `f` finishes.
    pub async fn scoped<'a, F, Fut, T>(&'a self, f: F) -> Result<T>
    where
        F: FnOnce(&'a AsfConnector) -> Fut,
        Fut: Future<Output = T>,
    {
        let scope = self.open().await?;
        let output = f(self).await;
        scope.close();
        Ok(output)
    }

    /// `GET /HealthCheck` at the server root.
    ///
    /// Never fails: transport errors come back as `{Success: false, Message}`.
    pub async fn health_check(&self) -> Value {
        let url = self.transport.target().health_url();
        match self.transport.fetch_raw(&url).await {
            Ok((status, body)) => {
                debug!("Health check: {} - {}", url, status);
                interpret_health(status, &body)
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                json!({
                    "Success": false,
                    "Message": e.to_string(),
                })
            }
        }
    }
}

/// Normalize a `/HealthCheck` answer into the `{Success, Message, ...}` envelope.
pub fn interpret_health(status: u16, body: &str) -> Value {
    if !(200..300).contains(&status) {
        let err = error_from_status(status, body);
        return json!({
            "Success": false,
            "Message": err.message(),
            "StatusCode": status,
        });
    }

    match serde_json::from_str::<Value>(body) {
        Ok(data) if response::has_success_indicator(&data) => data,
        Ok(data) => json!({
            "Success": true,
            "Message": response::message(&data).unwrap_or("OK"),
            "Result": data,
        }),
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() { "OK" } else { text };
            json!({
                "Success": true,
                "Message": message,
                "StatusCode": status,
            })
        }
    }
}

/// Pooled-connection scope of an [`AsfConnector`].
///
/// Dereferences to the connector. Dropping it closes the pooled connection.
pub struct ConnectionScope<'a> {
    connector: &'a AsfConnector,
    health: Value,
}

impl ConnectionScope<'_> {
    /// Result of the health probe run when the scope was opened.
    pub fn health(&self) -> &Value {
        &self.health
    }

    pub fn close(self) {}
}

impl Deref for ConnectionScope<'_> {
    type Target = AsfConnector;

    fn deref(&self) -> &AsfConnector {
        self.connector
    }
}

impl Drop for ConnectionScope<'_> {
    fn drop(&mut self) {
        self.connector.transport.close_pool();
        debug!("ASF connector connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let connector = AsfConnector::builder().build().unwrap();
        assert_eq!(connector.host(), "127.0.0.1");
        assert_eq!(connector.port(), 1242);
        assert_eq!(connector.path(), "/Api");
        assert!(connector.transport().headers().get("Authentication").is_none());
    }

    #[test]
    fn test_builder_explicit_settings() {
        let connector = AsfConnector::builder()
            .host("192.168.1.100")
            .port(8080)
            .password("test_pass")
            .build()
            .unwrap();
        assert_eq!(connector.host(), "192.168.1.100");
        assert_eq!(connector.port(), 8080);
        assert_eq!(connector.transport().base_url(), "http://192.168.1.100:8080/Api");
    }

    #[test]
    fn test_new_applies_per_field_defaults() {
        let connector = AsfConnector::new(None, Some(8080), None, Some("pw")).unwrap();
        assert_eq!(connector.host(), "127.0.0.1");
        assert_eq!(connector.port(), 8080);
        assert_eq!(connector.path(), "/Api");
        assert!(connector.transport().headers().get("Authentication").is_some());
    }

    #[test]
    fn test_controllers_share_one_transport() {
        let connector = AsfConnector::builder().build().unwrap();
        // the connector plus seven controllers
        assert_eq!(Arc::strong_count(connector.transport()), 8);
    }

    #[test]
    fn test_interpret_health_plain_text() {
        let health = interpret_health(200, "OK");
        assert_eq!(health["Success"], true);
        assert_eq!(health["Message"], "OK");
        assert_eq!(health["StatusCode"], 200);

        let health = interpret_health(200, "");
        assert_eq!(health["Message"], "OK");
    }

    #[test]
    fn test_interpret_health_envelope_passthrough() {
        let health = interpret_health(200, r#"{"Success": true, "Message": "Healthy", "Extra": 1}"#);
        assert_eq!(health, json!({"Success": true, "Message": "Healthy", "Extra": 1}));
    }

    #[test]
    fn test_interpret_health_wraps_json() {
        let health = interpret_health(200, r#"{"status": "Healthy"}"#);
        assert_eq!(health["Success"], true);
        assert_eq!(health["Message"], "OK");
        assert_eq!(health["Result"]["status"], "Healthy");
    }

    #[test]
    fn test_interpret_health_error_status() {
        let health = interpret_health(503, "");
        assert_eq!(health["Success"], false);
        assert_eq!(health["Message"], "HTTP 503");
        assert_eq!(health["StatusCode"], 503);
    }
}
