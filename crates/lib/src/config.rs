//! Configuration keys and environment snapshot helpers.
//!
//! Channels are configured through flat key/value pairs (normally the process
//! environment, optionally seeded from a `.env` file by the CLI):
//! `CHANNEL_<NAME>_TOKEN` and `CHANNEL_<NAME>_CHAT_ID`.

/// Default Telegram Bot API root.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Overrides the API root (self-hosted Bot API server, tests).
pub const API_BASE_KEY: &str = "TELEGRAM_API_BASE";

pub const CHANNEL_PREFIX: &str = "CHANNEL_";
pub const TOKEN_SUFFIX: &str = "_TOKEN";
pub const CHAT_ID_SUFFIX: &str = "_CHAT_ID";

/// Snapshot of the process environment, sorted by key so channel order is deterministic.
pub fn env_snapshot() -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = std::env::vars().collect();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    vars
}

/// Channel name for a `CHANNEL_<NAME>_TOKEN` key, or None when the key is not a token key.
pub fn token_key_channel(key: &str) -> Option<&str> {
    key.strip_prefix(CHANNEL_PREFIX)?
        .strip_suffix(TOKEN_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// The chat-id key paired with a channel's raw (un-lowercased) name.
pub fn chat_id_key(raw_name: &str) -> String {
    format!("{}{}{}", CHANNEL_PREFIX, raw_name, CHAT_ID_SUFFIX)
}

/// Resolve the API root: `TELEGRAM_API_BASE` from the snapshot overrides the default.
pub fn resolve_api_base(vars: &[(String, String)]) -> String {
    vars.iter()
        .find(|(k, _)| k == API_BASE_KEY)
        .map(|(_, v)| v.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Look up a key in the snapshot, trimmed; empty values count as absent.
pub fn lookup<'a>(vars: &'a [(String, String)], key: &str) -> Option<&'a str> {
    vars.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}
