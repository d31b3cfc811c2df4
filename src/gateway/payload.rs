//! # Gateway Payloads
//!
//! Maps domain events to the `(opcode, identifier, data)` triples the
//! connection manager turns into outgoing frames.
//!
//! Each variant's opcode/identifier pair is fixed: it is the routing key a
//! subscriber uses to interpret the frame content, so the values here are a
//! wire contract, not a naming choice. Data serializes as JSON; note that a
//! bare string (a server event's reason) serializes quoted, exactly as
//! subscribers expect.

use crate::entities::{LogLevel, Message, Player};
use crate::error::{ProtocolError, Result};
use crate::gateway::filter::Filter;
use crate::gateway::frame::Frame;
use crate::gateway::opcode::OpCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Welcome identifier.
pub const IDENT_WELCOME: &str = "WELC";
/// Filter acknowledgement identifier (the echoed summary).
pub const IDENT_FILTER_SUMMARY: &str = "SMRY";

/// Log event identifiers, one per severity.
pub const IDENT_LOG_INFO: &str = "INFO";
pub const IDENT_LOG_WARNING: &str = "WARN";
pub const IDENT_LOG_ERROR: &str = "ERRO";
pub const IDENT_LOG_CHAT: &str = "CHAT";

/// Handshake payload sent to a subscriber once its Hello is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    /// Gateway connection number assigned to the subscriber.
    #[serde(rename = "Connection")]
    pub connection: i64,

    /// Stable identifier of the subscriber's session.
    #[serde(rename = "ID")]
    pub id: String,

    /// Agent string the subscriber announced in its Hello.
    #[serde(rename = "Agent")]
    pub agent: String,
}

/// Server lifecycle transitions streamed as [`Payload::Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEventKind {
    Start,
    Exit,
    Reload,
}

impl ServerEventKind {
    pub fn identifier(self) -> &'static str {
        match self {
            ServerEventKind::Start => "STRT",
            ServerEventKind::Exit => "EXIT",
            ServerEventKind::Reload => "LOAD",
        }
    }
}

/// Per-player transitions streamed as [`Payload::Player`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEventKind {
    Connect,
    Disconnect,
    Update,
}

impl PlayerEventKind {
    pub fn identifier(self) -> &'static str {
        match self {
            PlayerEventKind::Connect => "CONN",
            PlayerEventKind::Disconnect => "DISC",
            PlayerEventKind::Update => "UPDT",
        }
    }
}

/// Identifier of a full player-list snapshot, sharing the player opcode.
const IDENT_PLAYER_SYNC: &str = "SYNC";

/// One domain event, shaped for framing.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Handshake acceptance.
    Welcome(Welcome),
    /// Echo of the subscriber's filter after applying it.
    FilterAck(Filter),
    /// One server log line.
    Log(Message),
    /// Server lifecycle transition plus a human-readable reason.
    Server { kind: ServerEventKind, reason: String },
    /// One player's lifecycle transition.
    Player { kind: PlayerEventKind, player: Player },
    /// Full snapshot of the connected players.
    PlayerSync(Vec<Player>),
}

impl Payload {
    pub fn opcode(&self) -> OpCode {
        match self {
            Payload::Welcome(_) => OpCode::Welcome,
            Payload::FilterAck(_) => OpCode::FilterAck,
            Payload::Log(_) => OpCode::LogEvent,
            Payload::Server { .. } => OpCode::ServerEvent,
            Payload::Player { .. } | Payload::PlayerSync(_) => OpCode::PlayerEvent,
        }
    }

    /// The 4-character routing key paired with [`Payload::opcode`].
    pub fn identifier(&self) -> &'static str {
        match self {
            Payload::Welcome(_) => IDENT_WELCOME,
            Payload::FilterAck(_) => IDENT_FILTER_SUMMARY,
            Payload::Log(message) => match message.level {
                LogLevel::Info => IDENT_LOG_INFO,
                LogLevel::Warning => IDENT_LOG_WARNING,
                LogLevel::Error => IDENT_LOG_ERROR,
                LogLevel::Chat => IDENT_LOG_CHAT,
            },
            Payload::Server { kind, .. } => kind.identifier(),
            Payload::Player { kind, .. } => kind.identifier(),
            Payload::PlayerSync(_) => IDENT_PLAYER_SYNC,
        }
    }

    /// The event data carried in the frame content.
    pub fn data(&self) -> Result<Value> {
        let value = match self {
            Payload::Welcome(welcome) => serde_json::to_value(welcome),
            Payload::FilterAck(filter) => serde_json::to_value(filter),
            Payload::Log(message) => serde_json::to_value(message),
            Payload::Server { reason, .. } => Ok(Value::String(reason.clone())),
            Payload::Player { player, .. } => serde_json::to_value(player),
            Payload::PlayerSync(players) => serde_json::to_value(players),
        };

        value.map_err(|e| ProtocolError::SerializeError(e.to_string()))
    }

    /// The frame content: the data rendered as compact JSON.
    pub fn content(&self) -> Result<String> {
        Ok(self.data()?.to_string())
    }

    /// Builds the outgoing frame for this payload under the given sequence
    /// number. Sequencing is the connection manager's business; this just
    /// stamps what it is told.
    pub fn to_frame(&self, sequence: u16) -> Result<Frame> {
        Ok(Frame::new(
            sequence,
            self.opcode(),
            self.identifier(),
            self.content()?,
        ))
    }
}
