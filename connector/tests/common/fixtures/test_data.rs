//! Canned ASF IPC bodies

use serde_json::{json, Value};

/// Standard ASF success envelope around `result`.
pub fn envelope(result: Value) -> Value {
    json!({
        "Success": true,
        "Message": "OK",
        "Result": result
    })
}

pub fn asf_info() -> Value {
    envelope(json!({
        "BuildVariant": "generic",
        "CanUpdate": true,
        "GlobalConfig": {"IPC": true, "Headless": true},
        "MemoryUsage": 123456,
        "ProcessStartTime": "2026-01-01T00:00:00Z",
        "Version": "6.0.0.0"
    }))
}

pub fn idle_bot(name: &str) -> Value {
    let mut bots = serde_json::Map::new();
    bots.insert(
        name.to_string(),
        json!({
            "BotName": name,
            "IsConnectedAndLoggedOn": true,
            "CardsFarmer": {
                "Paused": false,
                "CurrentGamesFarming": [],
                "GamesToFarm": [],
                "TimeRemaining": "00:00:00"
            },
            "BotConfig": {"Enabled": true}
        }),
    );
    envelope(Value::Object(bots))
}

pub fn redeem_ok(bot: &str, key: &str) -> Value {
    let mut keys = serde_json::Map::new();
    keys.insert(key.to_string(), json!({"Result": 1, "PurchaseResultDetail": 0}));
    let mut bots = serde_json::Map::new();
    bots.insert(bot.to_string(), Value::Object(keys));
    envelope(Value::Object(bots))
}
