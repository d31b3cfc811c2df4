//! # Starbound Command Façade
//!
//! Typed operations over the generic RCON session driver.
//!
//! Starbound's RCON commands answer in prose meant for a human console, so
//! each operation here pairs a command string with post-validation of the
//! reply: `whereis` strips a known prefix, `kick` demands a `Successfully`
//! acknowledgement, and `list` runs a fixed-offset parser over an
//! undocumented table layout. Replies that do not fit are demoted to
//! failures (or skipped, for `list` lines), never panics.

use crate::config::RconConfig;
use crate::error::constants;
use crate::rcon::client::{RconResponse, SourceRconClient};
use std::sync::Arc;
use tracing::debug;

/// Category of a completed façade operation, passed to hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Reload,
    Whereis,
    Kick,
    Ban,
    Broadcast,
}

/// What a ban should match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanType {
    Invalid,
    Ip,
    Uuid,
    /// Both IP and UUID.
    Complete,
}

impl BanType {
    /// The mode token the `ban` command expects. `None` for
    /// [`BanType::Invalid`].
    pub fn mode(self) -> Option<&'static str> {
        match self {
            BanType::Invalid => None,
            BanType::Complete => Some("both"),
            BanType::Ip => Some("ip"),
            BanType::Uuid => Some("uuid"),
        }
    }
}

/// One row of the `list` command's player table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPlayer {
    pub connection: i32,
    pub name: String,
    pub uuid: String,
}

type CommandHook = Arc<dyn Fn(CommandKind, &RconResponse) + Send + Sync>;

/// Domain-specific RCON client for a Starbound server. Wraps a
/// [`SourceRconClient`] held by composition; the generic driver's failure
/// contract applies to every operation here.
pub struct StarboundRconClient {
    session: SourceRconClient,
    hooks: Vec<CommandHook>,
}

impl StarboundRconClient {
    /// Builds a client from configuration. The configured bind address is
    /// normalized (empty, `*`, and `localhost` become `127.0.0.1`).
    pub fn new(mut config: RconConfig) -> Self {
        config.address = config.normalized_address();
        Self {
            session: SourceRconClient::new(config),
            hooks: Vec::new(),
        }
    }

    /// The underlying session driver, for registering success/failure hooks.
    pub fn session_mut(&mut self) -> &mut SourceRconClient {
        &mut self.session
    }

    /// Registers a hook fired after each typed operation completes, tagged
    /// with the operation's category. Runs synchronously; keep it cheap.
    pub fn on_command(&mut self, hook: impl Fn(CommandKind, &RconResponse) + Send + Sync + 'static) {
        self.hooks.push(Arc::new(hook));
    }

    fn notify(&self, kind: CommandKind, response: &RconResponse) {
        for hook in &self.hooks {
            hook(kind, response);
        }
    }

    /// Executes a raw RCON command. Prefer the typed operations; they carry
    /// the response validation raw replies need.
    pub async fn execute(&self, command: &str) -> RconResponse {
        debug!(command, "executing rcon command");
        self.session.execute(command).await
    }

    /// Reloads the server configuration.
    pub async fn reload_server(&self) -> RconResponse {
        let response = self.execute("serverreload").await;
        self.notify(CommandKind::Reload, &response);
        response
    }

    /// Reports the world a connection is currently on. On success the
    /// message is just the world identifier, prefix stripped.
    pub async fn whereis(&self, connection: i32) -> RconResponse {
        let mut response = self.execute(&format!("whereis ${connection}")).await;

        let prefix = format!("Client ${connection}'s current location is ");
        match response.message.strip_prefix(&prefix) {
            Some(location) => {
                response.message = location.to_string();
                response.success = true;
            }
            None => response.success = false,
        }

        self.notify(CommandKind::Whereis, &response);
        response
    }

    /// Kicks a connection. The server acknowledges a real kick with a
    /// message starting `Successfully`; anything else is a failure even if
    /// the command itself went through.
    pub async fn kick(&self, connection: i32, reason: &str) -> RconResponse {
        let mut response = self
            .execute(&format!("kick ${connection} \"{reason}\""))
            .await;

        if !(response.success && response.message.starts_with("Successfully")) {
            response.success = false;
        }

        self.notify(CommandKind::Kick, &response);
        response
    }

    /// Bans a connection. [`BanType::Invalid`] short-circuits locally with
    /// no network traffic.
    pub async fn ban(
        &self,
        connection: i32,
        reason: &str,
        ban_type: BanType,
        duration: i32,
    ) -> RconResponse {
        let Some(mode) = ban_type.mode() else {
            let response = RconResponse::failure("ban", constants::ERR_INVALID_BAN_TYPE);
            self.notify(CommandKind::Ban, &response);
            return response;
        };

        let response = self
            .execute(&format!("ban ${connection} \"{reason}\" {mode} {duration}"))
            .await;
        self.notify(CommandKind::Ban, &response);
        response
    }

    /// Broadcasts a chat message to every connected player.
    pub async fn broadcast(&self, message: &str) -> RconResponse {
        let response = self.execute(&format!("say {message}")).await;
        self.notify(CommandKind::Broadcast, &response);
        response
    }

    /// Lists the players currently connected. A failed call or a reply with
    /// no recognizable rows yields an empty list; malformed rows are
    /// skipped individually.
    pub async fn list(&self) -> Vec<ListedPlayer> {
        let response = self.execute("list").await;
        if !response.success || !response.message.contains(':') {
            return Vec::new();
        }

        response.message.lines().filter_map(parse_list_line).collect()
    }
}

/// Width of the trailing `<uuid(32)>` plus its ` : ` separator.
const UUID_TAIL: usize = 35;

/// Parses one row of the `list` table:
///
/// ```text
/// $<connection> : <name> : <uuid>
/// ```
///
/// The command has no machine-readable format; the only structural anchors
/// are the first `:` (ends the connection token) and the 32-character UUID
/// pinned to the end of the line. Everything between belongs to the name,
/// which may itself contain `:`. Rows that do not fit (too short, missing
/// colon, unparsable connection id, offsets landing off a character
/// boundary) yield `None`.
fn parse_list_line(line: &str) -> Option<ListedPlayer> {
    let first_break = line.find(':')?;
    let last_break = line.len().checked_sub(UUID_TAIL)?;

    if last_break < first_break + 2 || first_break < 2 {
        return None;
    }

    let connection = line.get(1..first_break - 1)?.trim().parse().ok()?;
    let name = line.get(first_break + 2..last_break)?.to_string();
    let uuid = line.get(last_break + 3..)?.to_string();

    Some(ListedPlayer {
        connection,
        name,
        uuid,
    })
}
