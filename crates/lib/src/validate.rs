//! Input validation for outbound messages: text, parse mode and inline buttons.

use crate::error::{Result, TelefyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Telegram's message length limit, in UTF-16 code units.
pub const MAX_TEXT_CHARS: usize = 4096;

const BUTTONS_SHAPE_HINT: &str =
    "Pass buttons as rows of {\"text\": ..., \"url\": ...} objects, e.g. [[{\"text\": \"Open\", \"url\": \"https://example.com\"}]].";

/// Telegram formatting dialect for message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
    #[serde(rename = "HTML")]
    Html,
    #[default]
    MarkdownV2,
}

impl ParseMode {
    pub const ALL: [ParseMode; 3] = [ParseMode::Markdown, ParseMode::Html, ParseMode::MarkdownV2];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::Html => "HTML",
            ParseMode::MarkdownV2 => "MarkdownV2",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = TelefyError;

    fn from_str(s: &str) -> Result<Self> {
        ParseMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                TelefyError::validation(
                    format!("Invalid parseMode: {}", s),
                    "Use one of: Markdown, HTML, MarkdownV2.",
                )
            })
    }
}

/// One URL button under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub url: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// A validated message ready for dispatch. Built per call and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    text: String,
    parse_mode: ParseMode,
    buttons: Option<Vec<Vec<InlineButton>>>,
}

impl OutboundMessage {
    /// Validate text and parse mode.
    pub fn new(text: impl Into<String>, parse_mode: &str) -> Result<Self> {
        let text = text.into();
        let parse_mode = validate_message(&text, parse_mode)?;
        Ok(Self {
            text,
            parse_mode,
            buttons: None,
        })
    }

    /// Attach typed button rows. An empty set of rows means no keyboard.
    pub fn with_buttons(mut self, rows: Vec<Vec<InlineButton>>) -> Result<Self> {
        validate_button_rows(&rows)?;
        self.buttons = Some(rows).filter(|r| !r.is_empty());
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn buttons(&self) -> Option<&[Vec<InlineButton>]> {
        self.buttons.as_deref()
    }
}

/// Check message text and parse mode. Returns the parsed mode.
pub fn validate_message(text: &str, parse_mode: &str) -> Result<ParseMode> {
    if text.is_empty() {
        return Err(TelefyError::validation(
            "Text parameter must be a non-empty string",
            "Provide the message text to send.",
        ));
    }
    let len = text.encode_utf16().count();
    if len > MAX_TEXT_CHARS {
        return Err(TelefyError::validation(
            format!("Message text exceeds {} characters", MAX_TEXT_CHARS),
            format!(
                "Shorten the message ({} characters) or split it into several messages.",
                len
            ),
        ));
    }
    parse_mode.parse()
}

/// Check untyped button input (e.g. JSON from a caller) and convert it to typed rows.
pub fn validate_buttons(value: &serde_json::Value) -> Result<Vec<Vec<InlineButton>>> {
    let rows = value.as_array().ok_or_else(|| {
        TelefyError::validation("Buttons must be an array of arrays", BUTTONS_SHAPE_HINT)
    })?;
    rows.iter()
        .map(|row| -> Result<Vec<InlineButton>> {
            let row = row.as_array().ok_or_else(|| {
                TelefyError::validation("Each button row must be an array", BUTTONS_SHAPE_HINT)
            })?;
            row.iter().map(button_from_value).collect()
        })
        .collect()
}

fn button_from_value(value: &serde_json::Value) -> Result<InlineButton> {
    match (str_field(value, "text"), str_field(value, "url")) {
        (Some(text), Some(url)) => Ok(InlineButton::new(text, url)),
        _ => Err(missing_button_field()),
    }
}

fn str_field<'a>(value: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    value
        .get(name)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Check typed rows: every button needs non-empty text and url.
pub fn validate_button_rows(rows: &[Vec<InlineButton>]) -> Result<()> {
    let complete = rows
        .iter()
        .flatten()
        .all(|b| !b.text.is_empty() && !b.url.is_empty());
    if complete {
        Ok(())
    } else {
        Err(missing_button_field())
    }
}

fn missing_button_field() -> TelefyError {
    TelefyError::validation(
        "Each button must have text and url properties",
        BUTTONS_SHAPE_HINT,
    )
}
