// File: connector/src/controllers/bot.rs
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::transport::IpcTransport;
use crate::types::NameList;

/// Per-bot endpoints.
///
/// `bot_names` accepts one name, several names, or [`NameList::all_bots`]
/// (the `ASF` selector). Names are comma-joined into the path as given.
#[derive(Clone)]
pub struct BotController {
    transport: Arc<IpcTransport>,
}

fn bot_resource(bot_names: NameList, action: &str) -> String {
    format!("/Bot/{}{}", bot_names.joined(), action)
}

impl BotController {
    pub fn new(transport: Arc<IpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn get_info(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.transport
            .get(&bot_resource(bot_names.into(), ""), None)
            .await
    }

    pub async fn update_config(&self, bot_names: impl Into<NameList>, config: &Value) -> Result<Value> {
        self.transport
            .post(&bot_resource(bot_names.into(), ""), Some(config))
            .await
    }

    /// `DELETE /Bot/{names}`: removes every file belonging to the bots.
    pub async fn delete(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.transport
            .delete(&bot_resource(bot_names.into(), ""), None)
            .await
    }

    // === Lifecycle ===

    pub async fn start(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.action(bot_names.into(), "/Start").await
    }

    pub async fn stop(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.action(bot_names.into(), "/Stop").await
    }

    pub async fn pause(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.action(bot_names.into(), "/Pause").await
    }

    pub async fn resume(&self, bot_names: impl Into<NameList>) -> Result<Value> {
        self.action(bot_names.into(), "/Resume").await
    }

    async fn action(&self, bot_names: NameList, action: &str) -> Result<Value> {
        self.transport
            .post(&bot_resource(bot_names, action), None)
            .await
    }

    // === Licenses and keys ===

    /// Redeem one key or many. A single key is sent as a one-element list.
    pub async fn redeem(
        &self,
        bot_names: impl Into<NameList>,
        keys: impl Into<NameList>,
    ) -> Result<Value> {
        let bot_names = bot_names.into();
        let keys = keys.into();
        debug!("Redeeming {} key(s) on {}", keys.len(), bot_names);
        let payload = json!({ "KeysToRedeem": keys });
        self.transport
            .post(&bot_resource(bot_names, "/Redeem"), Some(&payload))
            .await
    }

    /// Add free licenses. A single license is sent as a one-element list.
    pub async fn add_license(
        &self,
        bot_names: impl Into<NameList>,
        licenses: impl Into<NameList>,
    ) -> Result<Value> {
        let payload = json!({ "Licenses": licenses.into() });
        self.transport
            .post(&bot_resource(bot_names.into(), "/AddLicense"), Some(&payload))
            .await
    }

    /// `GET /Bot/{names}/Inventory`, narrowed to `/{app_id}/{context_id}` only when both are given.
    pub async fn get_inventory(
        &self,
        bot_names: impl Into<NameList>,
        app_id: Option<u64>,
        context_id: Option<u64>,
    ) -> Result<Value> {
        let action = match (app_id, context_id) {
            (Some(app_id), Some(context_id)) => format!("/Inventory/{}/{}", app_id, context_id),
            _ => "/Inventory".to_string(),
        };
        self.transport
            .get(&bot_resource(bot_names.into(), &action), None)
            .await
    }

    /// Feed a pending input (e.g. `SteamGuard`, `DeviceID`) to the bots.
    pub async fn input(
        &self,
        bot_names: impl Into<NameList>,
        input_type: &str,
        input_value: &str,
    ) -> Result<Value> {
        let payload = json!({ "Type": input_type, "Value": input_value });
        self.transport
            .post(&bot_resource(bot_names.into(), "/Input"), Some(&payload))
            .await
    }

    /// Rename a single bot along with its files.
    pub async fn rename(&self, bot_name: &str, new_name: &str) -> Result<Value> {
        let payload = json!({ "NewName": new_name });
        self.transport
            .post(&bot_resource(NameList::from(bot_name), "/Rename"), Some(&payload))
            .await
    }

    // === Background game redeemer ===

    pub async fn get_games_to_redeem_in_background(
        &self,
        bot_names: impl Into<NameList>,
    ) -> Result<Value> {
        self.transport
            .get(&bot_resource(bot_names.into(), "/GamesToRedeemInBackground"), None)
            .await
    }

    pub async fn add_games_to_redeem_in_background(
        &self,
        bot_names: impl Into<NameList>,
        games_to_redeem: &Value,
    ) -> Result<Value> {
        self.transport
            .post(
                &bot_resource(bot_names.into(), "/GamesToRedeemInBackground"),
                Some(games_to_redeem),
            )
            .await
    }

    pub async fn delete_games_to_redeem_in_background(
        &self,
        bot_names: impl Into<NameList>,
    ) -> Result<Value> {
        self.transport
            .delete(&bot_resource(bot_names.into(), "/GamesToRedeemInBackground"), None)
            .await
    }

    /// Spend Steam points on the item with `definition_id`.
    pub async fn redeem_points(
        &self,
        bot_names: impl Into<NameList>,
        definition_id: u64,
    ) -> Result<Value> {
        let action = format!("/RedeemPoints/{}", definition_id);
        self.transport
            .post(&bot_resource(bot_names.into(), &action), None)
            .await
    }
}
