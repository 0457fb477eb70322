//! Error type shared by the registry, validator, dispatcher and classifier.
//!
//! Every variant carries a human-readable `message` and an actionable `suggestion`.

use thiserror::Error;

/// Discriminant of a [`TelefyError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    ChannelNotFound,
    Transport,
    Network,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelefyError {
    /// Registry construction failed (no channels, missing chat id, bad token).
    #[error("{message}")]
    Config { message: String, suggestion: String },

    /// Malformed caller input (text, parse mode, buttons).
    #[error("{message}")]
    Validation { message: String, suggestion: String },

    /// Channel selector names a channel that is not configured.
    #[error("{message}")]
    ChannelNotFound { message: String, suggestion: String },

    /// Telegram answered with an HTTP error status.
    #[error("{message}")]
    Transport {
        status: u16,
        message: String,
        suggestion: String,
    },

    /// The request was issued but no response arrived.
    #[error("{message}")]
    Network { message: String, suggestion: String },

    /// Anything else.
    #[error("{message}")]
    Unexpected { message: String, suggestion: String },
}

impl TelefyError {
    pub fn config(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::ChannelNotFound { .. } => ErrorKind::ChannelNotFound,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Config { message, .. }
            | Self::Validation { message, .. }
            | Self::ChannelNotFound { message, .. }
            | Self::Transport { message, .. }
            | Self::Network { message, .. }
            | Self::Unexpected { message, .. } => message,
        }
    }

    pub fn suggestion(&self) -> &str {
        match self {
            Self::Config { suggestion, .. }
            | Self::Validation { suggestion, .. }
            | Self::ChannelNotFound { suggestion, .. }
            | Self::Transport { suggestion, .. }
            | Self::Network { suggestion, .. }
            | Self::Unexpected { suggestion, .. } => suggestion,
        }
    }
}

pub type Result<T> = std::result::Result<T, TelefyError>;
