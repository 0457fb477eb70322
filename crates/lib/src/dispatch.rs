//! Message dispatcher: resolve the target channels and send to each in order.
//!
//! Sends are sequential and fail fast: the first failing channel aborts the
//! dispatch, channels after it are not attempted and earlier results are dropped.

use crate::channels::{Channel, ChannelRegistry};
use crate::classify::classify;
use crate::error::{Result, TelefyError};
use crate::validate::OutboundMessage;
use serde::Serialize;

/// Selector value that targets every configured channel.
pub const ALL_CHANNELS: &str = "all";

/// Outcome of one successful per-channel send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendResult {
    pub channel: String,
    /// Telegram's decoded response body.
    pub response: serde_json::Value,
}

impl SendResult {
    /// `result.message_id` from the response, when present.
    pub fn message_id(&self) -> Option<i64> {
        self.response
            .get("result")
            .and_then(|r| r.get("message_id"))
            .and_then(|v| v.as_i64())
    }
}

/// Sends messages to channels of a borrowed registry.
pub struct Dispatcher<'a> {
    registry: &'a ChannelRegistry,
    client: reqwest::Client,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a ChannelRegistry) -> Self {
        Self::with_client(registry, reqwest::Client::new())
    }

    pub fn with_client(registry: &'a ChannelRegistry, client: reqwest::Client) -> Self {
        Self { registry, client }
    }

    /// Resolve a selector: "all" for every channel in registry order, otherwise one channel by name.
    pub fn resolve(&self, selector: &str) -> Result<Vec<&'a Channel>> {
        if selector.eq_ignore_ascii_case(ALL_CHANNELS) {
            return Ok(self.registry.iter().collect());
        }
        let name = selector.to_lowercase();
        match self.registry.get(&name) {
            Some(channel) => Ok(vec![channel]),
            None => Err(TelefyError::ChannelNotFound {
                message: format!("Channel \"{}\" not found", name),
                suggestion: format!(
                    "Available channels: {}",
                    self.registry.names().join(", ")
                ),
            }),
        }
    }

    /// Send `message` to the channels named by `selector`, one POST per channel, in order.
    pub async fn send(&self, message: &OutboundMessage, selector: &str) -> Result<Vec<SendResult>> {
        let targets = self.resolve(selector)?;
        let mut results = Vec::with_capacity(targets.len());
        for channel in targets {
            log::debug!("telegram: sendMessage to channel {}", channel.name);
            match channel.send_message(&self.client, message).await {
                Ok(response) => results.push(SendResult {
                    channel: channel.name.clone(),
                    response,
                }),
                Err(failure) => {
                    let err = classify(failure, &channel.name);
                    log::warn!(
                        "telegram: send to channel {} failed after {} successful send(s): {}",
                        channel.name,
                        results.len(),
                        err
                    );
                    return Err(err);
                }
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn registry() -> ChannelRegistry {
        ChannelRegistry::load([
            ("CHANNEL_NEWS_TOKEN", "t1"),
            ("CHANNEL_NEWS_CHAT_ID", "1"),
            ("CHANNEL_OPS_TOKEN", "t2"),
            ("CHANNEL_OPS_CHAT_ID", "2"),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_all_in_registry_order() {
        let reg = registry();
        let d = Dispatcher::new(&reg);
        let names: Vec<&str> = d
            .resolve("all")
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["news", "ops"]);
    }

    #[test]
    fn resolve_named_channel_case_folded() {
        let reg = registry();
        let d = Dispatcher::new(&reg);
        let targets = d.resolve("OPS").unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].chat_id, "2");
    }

    #[test]
    fn resolve_unknown_channel_lists_available() {
        let reg = registry();
        let d = Dispatcher::new(&reg);
        let err = d.resolve("Alerts").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChannelNotFound);
        assert_eq!(err.message(), "Channel \"alerts\" not found");
        assert_eq!(err.suggestion(), "Available channels: news, ops");
    }

    #[test]
    fn message_id_from_response() {
        let r = SendResult {
            channel: "news".into(),
            response: serde_json::json!({ "ok": true, "result": { "message_id": 42 } }),
        };
        assert_eq!(r.message_id(), Some(42));
    }
}
