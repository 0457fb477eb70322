//! Telegram channel: one bot token + chat id, sending via the Bot API `sendMessage` method.

use crate::classify::SendFailure;
use crate::validate::{InlineButton, OutboundMessage, ParseMode};
use serde::{Deserialize, Serialize};

/// A named notification destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Lowercase channel name (e.g. "news").
    pub name: String,
    pub token: String,
    pub chat_id: String,
    /// `<api root>/bot<token>`; method names are appended to it.
    pub base_url: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplyMarkup<'a> {
    inline_keyboard: &'a [Vec<InlineButton>],
}

/// Envelope fields present on every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
}

impl Channel {
    pub fn new(
        name: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        api_base: &str,
    ) -> Self {
        let token = token.into();
        let base_url = format!("{}/bot{}", api_base.trim_end_matches('/'), token);
        Self {
            name: name.into(),
            token,
            chat_id: chat_id.into(),
            base_url,
        }
    }

    pub fn send_message_url(&self) -> String {
        format!("{}/sendMessage", self.base_url)
    }

    /// POST one message to this channel's chat. Returns the decoded response body.
    pub async fn send_message(
        &self,
        client: &reqwest::Client,
        message: &OutboundMessage,
    ) -> Result<serde_json::Value, SendFailure> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message.text(),
            parse_mode: message.parse_mode(),
            reply_markup: message.buttons().map(|rows| ReplyMarkup {
                inline_keyboard: rows,
            }),
        };
        let res = client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;
        let parsed: Option<serde_json::Value> = serde_json::from_str(&text).ok();
        let envelope: Option<ApiEnvelope> = parsed
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        if !status.is_success() {
            let description = envelope
                .and_then(|e| e.description)
                .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(SendFailure::Status {
                status: status.as_u16(),
                description,
            });
        }
        let (Some(value), Some(envelope)) = (parsed, envelope) else {
            return Err(SendFailure::Other(format!(
                "sendMessage returned a non-JSON body (status {})",
                status.as_u16()
            )));
        };
        if !envelope.ok {
            return Err(SendFailure::Status {
                status: envelope.error_code.unwrap_or_else(|| status.as_u16()),
                description: envelope
                    .description
                    .unwrap_or_else(|| "sendMessage returned ok: false".to_string()),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_joins_api_root_and_token() {
        let ch = Channel::new("news", "123:abc", "-100", "https://api.telegram.org/");
        assert_eq!(ch.base_url, "https://api.telegram.org/bot123:abc");
        assert_eq!(
            ch.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn request_omits_reply_markup_without_buttons() {
        let body = SendMessageRequest {
            chat_id: "1",
            text: "hi",
            parse_mode: ParseMode::Html,
            reply_markup: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "chat_id": "1", "text": "hi", "parse_mode": "HTML" })
        );
    }

    #[test]
    fn request_nests_inline_keyboard() {
        let rows = vec![vec![InlineButton::new("Visit", "https://example.com")]];
        let body = SendMessageRequest {
            chat_id: "1",
            text: "hi",
            parse_mode: ParseMode::MarkdownV2,
            reply_markup: Some(ReplyMarkup {
                inline_keyboard: &rows,
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["reply_markup"],
            serde_json::json!({ "inline_keyboard": [[{ "text": "Visit", "url": "https://example.com" }]] })
        );
        assert_eq!(json["parse_mode"], "MarkdownV2");
    }
}
