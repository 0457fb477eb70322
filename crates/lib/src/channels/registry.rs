//! Channel registry: load channels from configuration and look them up by name.

use crate::channels::telegram::Channel;
use crate::config;
use crate::error::{Result, TelefyError};

/// Ordered set of configured channels. Iteration follows load order; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// Build the registry from a flat key/value snapshot.
    ///
    /// Every `CHANNEL_<NAME>_TOKEN` key defines channel `<name>` (lowercased); its chat id
    /// comes from `CHANNEL_<NAME>_CHAT_ID`. Channels appear in the order their token keys do.
    pub fn load<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let api_base = config::resolve_api_base(&vars);

        let mut channels: Vec<Channel> = Vec::new();
        for (key, value) in &vars {
            let Some(raw_name) = config::token_key_channel(key) else {
                continue;
            };
            let name = raw_name.to_lowercase();
            if channels.iter().any(|c| c.name == name) {
                log::debug!("channel {} defined more than once, keeping the first", name);
                continue;
            }
            let token = value.trim();
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(TelefyError::config(
                    format!("Invalid token for channel \"{}\"", name),
                    format!("Set {} to the bot token from @BotFather.", key),
                ));
            }
            let chat_id_key = config::chat_id_key(raw_name);
            let Some(chat_id) = config::lookup(&vars, &chat_id_key) else {
                return Err(TelefyError::config(
                    format!("Missing chat ID for channel \"{}\"", name),
                    format!("Set {} alongside {}.", chat_id_key, key),
                ));
            };
            channels.push(Channel::new(name, token, chat_id, &api_base));
        }

        if channels.is_empty() {
            return Err(TelefyError::config(
                "No channels configured",
                "Define CHANNEL_<NAME>_TOKEN and CHANNEL_<NAME>_CHAT_ID in the environment or a .env file.",
            ));
        }
        log::info!(
            "loaded {} telegram channel(s): {}",
            channels.len(),
            channels
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self { channels })
    }

    /// Build the registry from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(config::env_snapshot())
    }

    /// Look up a channel by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Channel> {
        let name = name.to_lowercase();
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChannelRegistry {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn single_channel_round_trip() {
        let reg =
            ChannelRegistry::load([("CHANNEL_NEWS_TOKEN", "T"), ("CHANNEL_NEWS_CHAT_ID", "C")])
                .unwrap();
        assert_eq!(reg.len(), 1);
        let ch = reg.get("news").unwrap();
        assert_eq!(ch.name, "news");
        assert_eq!(ch.token, "T");
        assert_eq!(ch.chat_id, "C");
        assert_eq!(ch.base_url, "https://api.telegram.org/botT");
    }

    #[test]
    fn preserves_token_key_order() {
        let reg = ChannelRegistry::load([
            ("CHANNEL_ZETA_TOKEN", "z"),
            ("CHANNEL_ALPHA_CHAT_ID", "2"),
            ("CHANNEL_ZETA_CHAT_ID", "1"),
            ("CHANNEL_ALPHA_TOKEN", "a"),
        ])
        .unwrap();
        assert_eq!(reg.names(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg =
            ChannelRegistry::load([("CHANNEL_Ops_TOKEN", "t"), ("CHANNEL_Ops_CHAT_ID", "-100")])
                .unwrap();
        assert!(reg.get("OPS").is_some());
        assert!(reg.get("ops").is_some());
    }

    #[test]
    fn no_channels_is_config_error() {
        let err = ChannelRegistry::load([("PATH", "/usr/bin")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.message(), "No channels configured");
    }

    #[test]
    fn missing_chat_id_is_config_error() {
        let err = ChannelRegistry::load([("CHANNEL_NEWS_TOKEN", "T")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.message(), "Missing chat ID for channel \"news\"");
        assert!(err.suggestion().contains("CHANNEL_NEWS_CHAT_ID"));
    }

    #[test]
    fn empty_token_is_config_error() {
        let err =
            ChannelRegistry::load([("CHANNEL_NEWS_TOKEN", " "), ("CHANNEL_NEWS_CHAT_ID", "C")])
                .unwrap_err();
        assert_eq!(err.message(), "Invalid token for channel \"news\"");
    }

    #[test]
    fn api_base_override_applies_to_every_channel() {
        let reg = ChannelRegistry::load([
            ("TELEGRAM_API_BASE", "http://localhost:8081"),
            ("CHANNEL_A_TOKEN", "ta"),
            ("CHANNEL_A_CHAT_ID", "1"),
        ])
        .unwrap();
        assert_eq!(reg.get("a").unwrap().base_url, "http://localhost:8081/botta");
    }
}
