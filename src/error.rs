//! # Error Types
//!
//! Error handling for the protocol core.
//!
//! This module defines all error variants that can occur during protocol operations,
//! from low-level I/O errors to malformed wire data.
//!
//! ## Error Categories
//! - **I/O Errors**: Socket and stream failures
//! - **Protocol Errors**: Invalid packet headers, timeouts, closed connections
//! - **Decode Errors**: Bad frame versions, unknown opcodes, malformed lengths
//! - **Configuration Errors**: Invalid or unreadable settings
//!
//! Decode failures are ordinary `Err` values so callers can cheaply drop bad
//! input; nothing in this crate panics on hostile bytes. The RCON client goes
//! one step further and never lets any of these escape its public surface;
//! they are folded into a failed [`RconResponse`](crate::rcon::RconResponse).

use std::io;
use thiserror::Error;

/// Response message constants shared by the RCON client surface.
/// Static strings are borrowed, avoiding heap allocations in failure paths.
pub mod constants {
    /// Returned when the server rejects the RCON password.
    pub const ERR_INVALID_AUTH: &str = "Invalid Authorization";

    /// Prefix for any failure caught inside the RCON session driver.
    /// The historical spelling is load-bearing; deployed consumers match on it.
    pub const ERR_EXCEPTION_PREFIX: &str = "Exception Occured: ";

    /// Returned when a ban is requested with an invalid ban type.
    pub const ERR_INVALID_BAN_TYPE: &str = "Invalid ban type";
}

/// ProtocolError is the primary error type for all protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Operation timed out")]
    Timeout,

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Invalid protocol header")]
    InvalidHeader,

    #[error("Unsupported frame version: {0}")]
    UnsupportedVersion(u8),

    #[error("Packet too large: {0} bytes")]
    OversizedPacket(usize),

    #[error("Unknown opcode: {0}")]
    UnknownOpCode(u8),

    #[error("Unknown packet type: {0}")]
    UnknownPacketType(i32),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
