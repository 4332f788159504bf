// File: connector/src/controllers/asf.rs
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::transport::IpcTransport;
use crate::types::{CryptoMethod, HashingMethod};

/// Endpoints concerning ASF as a whole.
#[derive(Clone)]
pub struct AsfController {
    transport: Arc<IpcTransport>,
}

impl AsfController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    /// `GET /ASF`: version, build, memory usage and global config.
    pub async fn get_info(&self) -> Result<Value> {
        self.transport.get("/ASF", None).await
    }

    /// `POST /ASF`: replace the global config with `config`.
    pub async fn update_config(&self, config: &Value) -> Result<Value> {
        self.transport.post("/ASF", Some(config)).await
    }

    pub async fn exit(&self) -> Result<Value> {
        self.transport.post("/ASF/Exit", None).await
    }

    pub async fn restart(&self) -> Result<Value> {
        self.transport.post("/ASF/Restart", None).await
    }

    /// `POST /ASF/Update`: update ASF to the latest stable release.
    pub async fn update(&self) -> Result<Value> {
        self.transport.post("/ASF/Update", None).await
    }

    pub async fn encrypt(&self, method: CryptoMethod, value: &str) -> Result<Value> {
        debug!("Encrypting a value with {:?}", method);
        let payload = json!({
            "CryptoMethod": method.id(),
            "StringToEncrypt": value,
        });
        self.transport.post("/ASF/Encrypt", Some(&payload)).await
    }

    pub async fn hash(&self, method: HashingMethod, value: &str) -> Result<Value> {
        debug!("Hashing a value with {:?}", method);
        let payload = json!({
            "HashMethod": method.id(),
            "StringToHash": value,
        });
        self.transport.post("/ASF/Hash", Some(&payload)).await
    }
}
