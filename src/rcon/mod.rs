//! # Source RCON Client
//!
//! Everything needed to issue administrative commands to a running Starbound
//! server over its Source-RCON-compatible console port.
//!
//! ## Components
//! - **Packet**: wire codec for one RCON packet, plus stream framing
//! - **Client**: generic one-shot session driver (connect, auth, execute)
//! - **Starbound**: typed command façade with response post-validation
//!
//! ## Layering
//! ```text
//! StarboundRconClient -> SourceRconClient -> RconCodec/RconPacket -> TCP
//! ```
//!
//! The driver never surfaces errors; every operation resolves to an
//! [`RconResponse`] whose `success` flag carries the verdict.

pub mod client;
pub mod packet;
pub mod starbound;

pub use client::{RconResponse, SourceRconClient};
pub use packet::{PacketKind, RconCodec, RconPacket};
pub use starbound::{BanType, CommandKind, ListedPlayer, StarboundRconClient};
