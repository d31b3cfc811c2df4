//! Server log messages and the log-line parser.
//!
//! Starbound writes human-oriented log lines with a short severity prefix
//! (`[Info] `, `[Warn] `, `[Error] `) and folds player chat into Info lines
//! as `Chat: <author> text`. There is no machine-readable format, so the
//! parser works on fixed prefixes and skips anything that does not fit.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Severity of a parsed log line. Serialized as its numeric value on the
/// wire, which is what subscribers switch on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LogLevel {
    #[default]
    Info = 0,
    Warning = 1,
    Error = 2,
    Chat = 3,
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(LogLevel::Info),
            1 => Ok(LogLevel::Warning),
            2 => Ok(LogLevel::Error),
            3 => Ok(LogLevel::Chat),
            other => Err(ProtocolError::Custom(format!("Unknown log level: {other}"))),
        }
    }
}

/// One parsed server log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub content: String,
    pub author: Option<String>,
    pub level: LogLevel,
}

/// Byte width of the `[Error] ` prefix.
const ERROR_PREFIX_LEN: usize = 8;
/// Byte width of the `[Info] ` and `[Warn] ` prefixes.
const SHORT_PREFIX_LEN: usize = 7;
/// Byte offset of the author inside a `Chat: <author> text` line.
const CHAT_AUTHOR_START: usize = 7;

impl Message {
    pub fn is_chat(&self) -> bool {
        self.author.is_some()
    }

    /// Parses one raw log line. Returns `None` for lines that carry a
    /// severity prefix but are too short to strip it.
    ///
    /// Lines shorter than a prefix altogether are kept rather than dropped:
    /// they come back as an Error-level message wrapping the raw text, so
    /// nothing the server prints is silently lost.
    pub fn parse(line: &str) -> Option<Message> {
        let contents = line.trim();

        if contents.len() < 6 {
            return Some(Message {
                content: line.to_string(),
                level: LogLevel::Error,
                author: Some("UNKOWN".to_string()),
            });
        }

        // Severity comes from the second character of the prefix. Anything
        // unrecognized is treated as an error line, matching the server's
        // own catch-all.
        let (level, contents) = match contents.chars().nth(1) {
            Some('W') => (LogLevel::Warning, contents.get(SHORT_PREFIX_LEN..)?),
            Some('I') => (LogLevel::Info, contents.get(SHORT_PREFIX_LEN..)?),
            _ => (LogLevel::Error, contents.get(ERROR_PREFIX_LEN..)?),
        };

        if level == LogLevel::Info && contents.starts_with("Chat:") {
            if let Some(name_end) = contents.find("> ") {
                if name_end > 0 {
                    let author = contents.get(CHAT_AUTHOR_START..name_end)?;
                    let chat_start = name_end + 2;
                    let chat = contents.get(chat_start..).unwrap_or("");
                    return Some(Message {
                        level: LogLevel::Chat,
                        content: chat.to_string(),
                        author: Some(author.to_string()),
                    });
                }
            }
        }

        Some(Message {
            level,
            content: contents.to_string(),
            author: None,
        })
    }
}
