//! # RCON Session Driver
//!
//! Generic Source-RCON client: one connection, one authentication, one
//! command, one response.
//!
//! ## Session Shape
//! Every [`SourceRconClient::execute`] call is fully independent: it opens a
//! fresh TCP connection, authenticates, sends the command, reads the reply,
//! and drops the socket. There is no pooling and no cross-call ordering, so
//! concurrent calls are safe by construction.
//!
//! ## Failure Contract
//! This driver never surfaces an error to its caller. Every failure,
//! whether a refused connection, a socket reset, a malformed packet, a
//! rejected password, or an exhausted timeout, comes back as an [`RconResponse`] with
//! `success == false` and a diagnostic message. Callers branch on the flag,
//! not on error types.
//!
//! Each read phase carries an explicit deadline from [`RconConfig`]; a peer
//! that stalls or keeps streaming non-auth packets fails the call instead of
//! hanging it.

use crate::config::RconConfig;
use crate::error::{constants, ProtocolError, Result};
use crate::rcon::packet::{PacketKind, RconCodec, RconPacket};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

/// First sequence id allocated within a session.
const SEQUENCE_START: i32 = 10;

/// Result of one RCON command.
///
/// `message` holds the server's reply on success and diagnostic text on
/// failure. It never carries a raw error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RconResponse {
    /// The command this response answers.
    pub command: String,
    /// Reply body, or failure diagnostic.
    pub message: String,
    /// Whether the command was delivered and answered.
    pub success: bool,
}

impl RconResponse {
    pub fn success(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
            success: false,
        }
    }
}

type ResponseHook = Arc<dyn Fn(&RconResponse) + Send + Sync>;

/// Generic Source-RCON session driver. See the module docs for the session
/// and failure contracts.
pub struct SourceRconClient {
    config: RconConfig,
    on_success: Vec<ResponseHook>,
    on_failure: Vec<ResponseHook>,
}

impl SourceRconClient {
    pub fn new(config: RconConfig) -> Self {
        Self {
            config,
            on_success: Vec::new(),
            on_failure: Vec::new(),
        }
    }

    pub fn config(&self) -> &RconConfig {
        &self.config
    }

    /// Registers a hook fired after a call completes successfully. Hooks run
    /// synchronously on the completing call and must be cheap.
    pub fn on_success(&mut self, hook: impl Fn(&RconResponse) + Send + Sync + 'static) {
        self.on_success.push(Arc::new(hook));
    }

    /// Registers a hook fired after a call fails. Same contract as
    /// [`SourceRconClient::on_success`].
    pub fn on_failure(&mut self, hook: impl Fn(&RconResponse) + Send + Sync + 'static) {
        self.on_failure.push(Arc::new(hook));
    }

    /// Executes one RCON command and waits for its response. Fails safely:
    /// any error is folded into a failed [`RconResponse`].
    pub async fn execute(&self, command: &str) -> RconResponse {
        let response = match self.run_session(command).await {
            Ok(response) => response,
            Err(e) => RconResponse::failure(
                command,
                format!("{}{}", constants::ERR_EXCEPTION_PREFIX, e),
            ),
        };

        self.notify(&response);
        response
    }

    fn notify(&self, response: &RconResponse) {
        let hooks = if response.success {
            &self.on_success
        } else {
            &self.on_failure
        };
        for hook in hooks {
            hook(response);
        }
    }

    async fn run_session(&self, command: &str) -> Result<RconResponse> {
        let mut sequence = SEQUENCE_START;
        let address = self.config.normalized_address();

        let stream = timeout(
            self.config.connect_timeout,
            TcpStream::connect((address.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| ProtocolError::Timeout)??;

        let mut framed = Framed::new(stream, RconCodec);

        let auth_id = sequence;
        sequence += 1;
        framed
            .send(RconPacket::auth(auth_id, &self.config.password))
            .await?;

        // Scan for the authentication verdict, discarding anything else the
        // server pushes first. The whole scan shares one deadline.
        let authenticated = timeout(self.config.read_timeout, async {
            loop {
                match framed.next().await {
                    Some(Ok(packet)) => {
                        if packet.kind == PacketKind::AuthResponse {
                            break Ok(packet.id == auth_id);
                        }
                        debug!(id = packet.id, "discarding pre-auth packet");
                    }
                    Some(Err(e)) => break Err(e),
                    None => break Err(ProtocolError::ConnectionClosed),
                }
            }
        })
        .await
        .map_err(|_| ProtocolError::Timeout)??;

        if !authenticated {
            warn!(address = %address, port = self.config.port, "rcon authentication rejected");
            return Ok(RconResponse::failure(command, constants::ERR_INVALID_AUTH));
        }

        framed.send(RconPacket::command(sequence, command)).await?;

        let packet = timeout(self.config.read_timeout, framed.next())
            .await
            .map_err(|_| ProtocolError::Timeout)?
            .ok_or(ProtocolError::ConnectionClosed)??;

        Ok(RconResponse::success(command, packet.body))
    }
}
