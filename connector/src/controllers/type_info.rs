// File: connector/src/controllers/type_info.rs
use serde_json::Value;
use std::sync::Arc;

use crate::errors::Result;
use crate::transport::IpcTransport;

#[derive(Clone)]
pub struct TypeController {
    transport: Arc<IpcTransport>,
}

impl TypeController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    /// `GET /Type/{type_name}`: reflection metadata for an ASF type.
    pub async fn get_type(&self, type_name: &str) -> Result<Value> {
        self.transport.get(&format!("/Type/{}", type_name), None).await
    }
}
