//! # Gateway Event Protocol
//!
//! The codec and payload model for the event stream served to API
//! subscribers.
//!
//! ## Components
//! - **Frame**: versioned binary envelope (version 4), one per message
//! - **OpCode**: closed set of frame purposes
//! - **Payload**: domain events shaped into `(opcode, identifier, data)`
//! - **Filter**: the subscription mask subscribers negotiate
//!
//! ## Scope
//! This module owns the bytes, not the session. The handshake sequence
//! (Hello → Welcome → Filter → FilterAck, then heartbeats and events) and
//! the sockets it runs over belong to the connection manager; what is
//! guaranteed here is that the frames and triples it sends match what the
//! deployed subscriber fleet expects, bit for bit.

pub mod filter;
pub mod frame;
pub mod opcode;
pub mod payload;

pub use filter::Filter;
pub use frame::{Frame, FRAME_VERSION, IDENTIFIER_LEN};
pub use opcode::OpCode;
pub use payload::{Payload, PlayerEventKind, ServerEventKind, Welcome};
