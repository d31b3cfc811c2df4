//! Subscription filter DTO.

use serde::{Deserialize, Serialize};

/// What a subscriber wants streamed. Sent by the subscriber during the
/// handshake and echoed back inside a
/// [`Payload::FilterAck`](crate::gateway::Payload::FilterAck); enforcement
/// belongs to the connection manager, not this crate.
///
/// The abbreviated JSON keys are the wire contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "PLYR", default)]
    pub player_events: bool,

    #[serde(rename = "SERV", default)]
    pub server_events: bool,

    #[serde(rename = "LOGS", default)]
    pub log_events: bool,
}
