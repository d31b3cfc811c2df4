//! # Domain Entities
//!
//! The data objects carried inside Gateway payloads.
//!
//! These are snapshot DTOs: the process manager owns the live state, this
//! crate only ships the shapes that cross the wire. Field names serialize in
//! the PascalCase form the deployed subscriber fleet was built against.
//!
//! ## Components
//! - **Player**: one connected player's snapshot
//! - **Message**: one parsed server log line, with its severity level

pub mod message;
pub mod player;

pub use message::{LogLevel, Message};
pub use player::Player;
