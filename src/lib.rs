//! # Starbound Protocol
//!
//! Protocol core for a Starbound dedicated-server manager.
//!
//! Two independent wire protocols live here:
//!
//! - **RCON** ([`rcon`]): a Source-RCON-compatible client used to
//!   authenticate with the game server and issue administrative commands
//!   (reload, kick, ban, broadcast, player listing). One connection per
//!   command, no exceptions across the boundary: every call resolves to an
//!   [`RconResponse`](rcon::RconResponse) with a success flag.
//! - **Gateway** ([`gateway`]): the binary frame codec and payload model
//!   used to stream structured events (log lines, server and player
//!   lifecycle) to API subscribers. Session management is the connection
//!   manager's job; this crate owns the bytes.
//!
//! Both protocols are externally defined and partly undocumented, so the
//! codecs are written defensively: malformed input is an ordinary error (or
//! a skipped row), never a panic.
//!
//! ## Example
//! ```no_run
//! use starbound_protocol::config::RconConfig;
//! use starbound_protocol::rcon::StarboundRconClient;
//!
//! # async fn run() {
//! let config = RconConfig {
//!     password: "hunter2".to_string(),
//!     ..RconConfig::default()
//! };
//!
//! let client = StarboundRconClient::new(config);
//! let response = client.broadcast("Server restarting in 5 minutes").await;
//! if !response.success {
//!     eprintln!("broadcast failed: {}", response.message);
//! }
//! # }
//! ```

pub mod config;
pub mod entities;
pub mod error;
pub mod gateway;
pub mod rcon;

mod util;

pub use config::RconConfig;
pub use error::{ProtocolError, Result};
pub use gateway::{Filter, Frame, OpCode, Payload};
pub use rcon::{BanType, RconResponse, SourceRconClient, StarboundRconClient};
