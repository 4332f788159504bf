// File: connector/src/controllers/two_factor.rs
use serde_json::Value;
use std::sync::Arc;

use crate::errors::Result;
use crate::transport::IpcTransport;
use crate::types::NameList;

#[derive(Clone)]
pub struct TwoFactorAuthenticationController {
    transport: Arc<IpcTransport>,
}

impl TwoFactorAuthenticationController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    /// `GET /Bot/{names}/TwoFactorAuthentication/Token`
    ///
    /// Requires ASF's 2FA module to be active on the targeted bots. Tokens come
    /// back per bot under `Result`.
    pub async fn get_token(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        let resource = format!(
            "/Bot/{}/TwoFactorAuthentication/Token",
            bot_names.into().joined()
        );
        self.transport.get(&resource, None).await
    }
}
