//! Telefy core library: send Telegram notifications to named channels.
//!
//! Channels (`CHANNEL_<NAME>_TOKEN` / `CHANNEL_<NAME>_CHAT_ID` pairs) are loaded once into a
//! [`ChannelRegistry`]; [`Telefy`] validates messages and dispatches them to one channel or all.

pub mod channels;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod markdown;
pub mod validate;

pub use channels::{Channel, ChannelRegistry};
pub use dispatch::{Dispatcher, SendResult, ALL_CHANNELS};
pub use error::{ErrorKind, Result, TelefyError};
pub use validate::{InlineButton, OutboundMessage, ParseMode};

/// Library entry point: owns the channel registry and an HTTP client.
pub struct Telefy {
    registry: ChannelRegistry,
    client: reqwest::Client,
}

impl Telefy {
    pub fn new(registry: ChannelRegistry) -> Self {
        Self {
            registry,
            client: reqwest::Client::new(),
        }
    }

    /// Load channels from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ChannelRegistry::from_env()?))
    }

    /// The configured channels.
    pub fn channels(&self) -> &ChannelRegistry {
        &self.registry
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::with_client(&self.registry, self.client.clone())
    }

    /// Send a text message to `channel` ("all" or a channel name).
    pub async fn send_message(
        &self,
        text: &str,
        channel: &str,
        parse_mode: &str,
    ) -> Result<Vec<SendResult>> {
        let message = OutboundMessage::new(text, parse_mode)?;
        self.dispatcher().send(&message, channel).await
    }

    /// Send a text message with rows of URL buttons.
    pub async fn send_message_with_buttons(
        &self,
        text: &str,
        buttons: Vec<Vec<InlineButton>>,
        channel: &str,
        parse_mode: &str,
    ) -> Result<Vec<SendResult>> {
        let message = OutboundMessage::new(text, parse_mode)?.with_buttons(buttons)?;
        self.dispatcher().send(&message, channel).await
    }

    /// Like [`Telefy::send_message_with_buttons`], for buttons given as untyped JSON.
    pub async fn send_message_with_json_buttons(
        &self,
        text: &str,
        buttons: &serde_json::Value,
        channel: &str,
        parse_mode: &str,
    ) -> Result<Vec<SendResult>> {
        let message = OutboundMessage::new(text, parse_mode)?;
        let rows = validate::validate_buttons(buttons)?;
        let message = message.with_buttons(rows)?;
        self.dispatcher().send(&message, channel).await
    }
}
