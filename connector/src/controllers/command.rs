// File: connector/src/controllers/command.rs
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::transport::IpcTransport;

/// Legacy `/Command` endpoint.
///
/// ASF keeps this only for compatibility; the actions under `/ASF/{action}` and
/// `/Bot/{names}/{action}` replace it. Commands without an explicit bot target
/// run against the first defined bot.
#[derive(Clone)]
pub struct CommandController {
    transport: Arc<IpcTransport>,
}

impl CommandController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    #[deprecated(note = "use the AsfController or BotController actions instead")]
    pub async fn execute(&self, command: &str) -> Result<Value> {
        debug!("Execute command: {}", command);
        warn!("/Command is a legacy endpoint, prefer the ASF or Bot actions");
        let payload = json!({ "Command": command });
        self.transport.post("/Command", Some(&payload)).await
    }
}
