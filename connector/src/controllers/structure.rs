// File: connector/src/controllers/structure.rs
use serde_json::Value;
use std::sync::Arc;

use crate::errors::Result;
use crate::transport::IpcTransport;

#[derive(Clone)]
pub struct StructureController {
    transport: Arc<IpcTransport>,
}

impl StructureController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    /// `GET /Structure/{structure_name}`: default instance of the named structure.
    pub async fn get_structure(&self, structure_name: &str) -> Result<Value> {
        self.transport
            .get(&format!("/Structure/{}", structure_name), None)
            .await
    }
}
