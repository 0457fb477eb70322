//! Map per-channel send failures to [`TelefyError`] with a suggestion for the user.

use crate::error::TelefyError;

/// How a single `sendMessage` attempt failed, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendFailure {
    /// Telegram answered with an error status (or `ok: false`).
    Status { status: u16, description: String },
    /// The request was sent but no response came back.
    Network,
    /// Anything else (undecodable body, client misconfiguration).
    Other(String),
}

impl From<reqwest::Error> for SendFailure {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the bot token.
        let e = e.without_url();
        if e.is_connect() || e.is_timeout() || e.is_request() {
            log::debug!("telegram request got no response: {}", e);
            SendFailure::Network
        } else {
            SendFailure::Other(e.to_string())
        }
    }
}

/// Classify a failure on `channel`. Pure: inspects the failure only.
pub fn classify(failure: SendFailure, channel: &str) -> TelefyError {
    match failure {
        SendFailure::Status {
            status,
            description,
        } => {
            let (message, suggestion) = match status {
                400 => (
                    format!("Bad Request on channel \"{}\": {}", channel, description),
                    "Check message content, parse mode, or button format.".to_string(),
                ),
                401 => (
                    format!("Unauthorized on channel \"{}\": {}", channel, description),
                    format!("Verify the bot token for channel \"{}\".", channel),
                ),
                403 => (
                    format!("Forbidden on channel \"{}\": {}", channel, description),
                    "Ensure the bot has permission to message that chat ID.".to_string(),
                ),
                404 => (
                    format!("Not Found on channel \"{}\": {}", channel, description),
                    "Check the chat ID is valid and the bot is a member.".to_string(),
                ),
                _ => (
                    format!(
                        "Telegram API error on channel \"{}\": {} (Status: {})",
                        channel, description, status
                    ),
                    "Check the Telegram Bot API documentation: https://core.telegram.org/bots/api"
                        .to_string(),
                ),
            };
            TelefyError::Transport {
                status,
                message,
                suggestion,
            }
        }
        SendFailure::Network => TelefyError::Network {
            message: format!(
                "Network error on channel \"{}\": Could not connect to Telegram API",
                channel
            ),
            suggestion: "Check your internet connection and try again later.".to_string(),
        },
        SendFailure::Other(original) => TelefyError::Unexpected {
            message: format!("Unexpected error on channel \"{}\": {}", channel, original),
            suggestion: "Please report this issue with the error message above.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn status(code: u16) -> SendFailure {
        SendFailure::Status {
            status: code,
            description: "boom".to_string(),
        }
    }

    #[test]
    fn known_statuses() {
        let e = classify(status(400), "news");
        assert_eq!(e.message(), "Bad Request on channel \"news\": boom");
        assert_eq!(e.suggestion(), "Check message content, parse mode, or button format.");

        let e = classify(status(401), "news");
        assert_eq!(e.message(), "Unauthorized on channel \"news\": boom");
        assert_eq!(e.suggestion(), "Verify the bot token for channel \"news\".");

        let e = classify(status(403), "news");
        assert_eq!(e.message(), "Forbidden on channel \"news\": boom");

        let e = classify(status(404), "news");
        assert_eq!(e.message(), "Not Found on channel \"news\": boom");
        assert_eq!(e.suggestion(), "Check the chat ID is valid and the bot is a member.");
    }

    #[test]
    fn other_status_includes_code() {
        let e = classify(status(429), "ops");
        assert_eq!(e.kind(), ErrorKind::Transport);
        assert_eq!(
            e.message(),
            "Telegram API error on channel \"ops\": boom (Status: 429)"
        );
        assert!(matches!(e, TelefyError::Transport { status: 429, .. }));
    }

    #[test]
    fn network_and_other() {
        let e = classify(SendFailure::Network, "ops");
        assert_eq!(e.kind(), ErrorKind::Network);
        assert_eq!(
            e.message(),
            "Network error on channel \"ops\": Could not connect to Telegram API"
        );

        let e = classify(SendFailure::Other("bad json".into()), "ops");
        assert_eq!(e.kind(), ErrorKind::Unexpected);
        assert_eq!(e.message(), "Unexpected error on channel \"ops\": bad json");
    }
}
