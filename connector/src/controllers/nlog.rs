// File: connector/src/controllers/nlog.rs
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::errors::Result;
use crate::transport::IpcTransport;

#[derive(Clone)]
pub struct NLogController {
    transport: Arc<IpcTransport>,
}

impl NLogController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    /// `GET /NLog/File`: contents of ASF's log file.
    pub async fn get_log_file(&self) -> Result<Value> {
        self.transport.get("/NLog/File", None).await
    }

    /// `/NLog` streams over a WebSocket, which this client does not speak.
    ///
    /// Never touches the network: returns a failure object naming the URL to
    /// point a WebSocket client at.
    pub fn get_log_stream(&self) -> Value {
        let url = self.transport.target().websocket_url("/NLog");
        warn!("/NLog requires a WebSocket client for real-time log streaming");
        json!({
            "Success": false,
            "Message": format!(
                "This endpoint requires a WebSocket connection. Use a WebSocket client to connect to {}",
                url
            ),
        })
    }
}
