// File: connector/src/legacy.rs
//! Human-readable wrappers kept for older call sites
//!
//! Each method makes exactly one controller call and renders the JSON answer
//! as text. Failures are rendered too, never returned as `Err`. New code should
//! call the controllers and read the JSON directly.

use serde_json::Value;
use tracing::debug;

use crate::codes::{label_or_raw, purchase_result_detail_label, result_label};
use crate::connector::AsfConnector;
use crate::constants::paths;
use crate::errors::Result;
use crate::response::{self, is_truthy, plain};
use crate::types::NameList;

impl AsfConnector {
    /// Same as `asf().get_info()`.
    pub async fn get_asf_info(&self) -> Result<Value> {
        self.asf().get_info().await
    }

    /// One status line per bot: farming progress, idle, offline or unconfigured.
    pub async fn get_bot_info(&self, bot: &str) -> String {
        debug!("get_bot_info: bot {}", bot);
        match self.bot().get_info(bot).await {
            Ok(response) => summarize_bot_info(bot, &response),
            Err(e) => format!("Getting bot info failed: {}", e),
        }
    }

    /// Per-bot, per-key redemption outcome.
    pub async fn bot_redeem(&self, bot: &str, keys: impl Into<NameList>) -> String {
        match self.bot().redeem(bot, keys).await {
            Ok(response) => summarize_redeem(bot, &response),
            Err(e) => format!("Redeem failed: {}", e),
        }
    }

    /// Run a command through the legacy `/Command` endpoint and return its output.
    pub async fn send_command(&self, command: &str) -> String {
        #[allow(deprecated)]
        let outcome = self.command().execute(command).await;
        match outcome {
            Ok(response) => summarize_command(&response),
            Err(e) => format!("Command unsuccessful: {}", e),
        }
    }
}

pub fn summarize_bot_info(bot: &str, response: &Value) -> String {
    let Some(bots) = response.get("Result").and_then(Value::as_object) else {
        return if response::is_success(response) {
            format!("Bot {} not found.", bot)
        } else {
            format!(
                "Getting bot info failed: {}",
                response::message(response).unwrap_or("Unknown error")
            )
        };
    };

    let mut message = String::new();
    for (bot_name, info) in bots {
        message.push_str(&format!("Bot {}: ", bot_name));
        if info["IsConnectedAndLoggedOn"].as_bool().unwrap_or(false) {
            message.push_str(&farming_summary(&info["CardsFarmer"]));
            message.push('\n');
        } else if is_truthy(&info["BotConfig"]) {
            message.push_str("Offline.\n");
        } else {
            message.push_str("Not configured.\n");
        }
    }
    message
}

fn farming_summary(cards_farmer: &Value) -> String {
    let empty = Vec::new();
    let current = cards_farmer["CurrentGamesFarming"].as_array().unwrap_or(&empty);
    let queued = cards_farmer["GamesToFarm"].as_array().unwrap_or(&empty);

    let mut summary = String::new();
    if cards_farmer["Paused"].as_bool().unwrap_or(false) {
        summary.push_str("Farming paused.");
    } else if !current.is_empty() {
        summary.push_str("Currently farming games:");
    }

    for game in current {
        summary.push_str(&format!(
            "\n\t[{}/{}] {} cards remaining.",
            plain(&game["AppID"]),
            plain(&game["GameName"]),
            plain(&game["CardsRemaining"])
        ));
    }

    if !queued.is_empty() {
        let games: Vec<String> = queued
            .iter()
            .map(|game| format!("[{}/{}]", plain(&game["AppID"]), plain(&game["GameName"])))
            .collect();
        summary.push_str(&format!(
            " {} game(s) to farm ({}). ",
            queued.len(),
            games.join(" ")
        ));
    }

    if let Some(remaining) = cards_farmer["TimeRemaining"].as_str() {
        if remaining != paths::ZERO_DURATION {
            summary.push_str(&format!("Time remaining: {}", remaining));
        }
    }

    if summary.is_empty() {
        summary.push_str("Idle.");
    }
    summary
}

pub fn summarize_redeem(bot: &str, response: &Value) -> String {
    let Some(results) = response.get("Result").and_then(Value::as_object) else {
        return if response::is_success(response) {
            format!("Bot {} not found.", bot)
        } else {
            format!(
                "Redeem failed: {}",
                response::message(response).unwrap_or("Unknown error")
            )
        };
    };

    let mut message = String::new();
    for (bot_name, keys) in results {
        let Some(keys) = keys.as_object() else {
            continue;
        };
        for (key, outcome) in keys.iter().filter(|(_, outcome)| is_truthy(outcome)) {
            message.push_str(&format!("Bot {}: \n", bot_name));
            message.push_str(&key_outcome_line(key, outcome));
        }
    }
    message
}

fn key_outcome_line(key: &str, outcome: &Value) -> String {
    match outcome.get("purchase_receipt_info").filter(|r| is_truthy(r)) {
        Some(receipt) => {
            let items: Vec<String> = receipt["line_items"]
                .as_array()
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .map(|item| {
                    format!(
                        "[{}, {}]",
                        plain(&item["packageid"]),
                        plain(&item["line_item_description"])
                    )
                })
                .collect();
            format!(
                "\t[{}] {}: {}/{}\n",
                key,
                items.join(" "),
                label_or_raw(&receipt["purchase_status"], result_label),
                label_or_raw(&receipt["result_detail"], purchase_result_detail_label)
            )
        }
        None => format!(
            "\t[{}] {}/{}\n",
            key,
            label_or_raw(&outcome["Result"], result_label),
            label_or_raw(&outcome["PurchaseResultDetail"], purchase_result_detail_label)
        ),
    }
}

pub fn summarize_command(response: &Value) -> String {
    if response::is_success(response) {
        match response.get("Result") {
            Some(Value::Null) | None => String::new(),
            Some(result) => plain(result),
        }
    } else {
        format!(
            "Command unsuccessful: {}",
            response::message(response).unwrap_or("Unknown error")
        )
    }
}
