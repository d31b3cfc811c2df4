//! # RCON Packet Codec
//!
//! Wire codec for one Source-RCON packet.
//!
//! ## Wire Format
//! ```text
//! [Size(4, LE)] [Id(4, LE)] [Type(4, LE)] [Body(ASCII)] [NUL NUL]
//! ```
//! `Size` counts everything after itself: `body.len() + 10`.
//!
//! The protocol reuses wire value `2` for both the authentication response
//! and the execute-command request. [`PacketKind`] tracks the logical intent;
//! the decoder only ever runs on the client side, so a raw `2` is always an
//! authentication response there.
//!
//! Bodies are ASCII by protocol: the server speaks a single-byte charset and
//! has no other mode, so non-ASCII characters degrade to `?` on encode.

use crate::error::{ProtocolError, Result};
use crate::util::{ascii_bytes, ascii_lossy};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Bytes of a packet covered by `Size` beyond the body: id, type, two NULs.
const PACKET_OVERHEAD: usize = 10;

/// Upper bound on a single packet, matching the reference server limit.
/// Checked before any allocation happens.
pub const MAX_PACKET_SIZE: usize = 4096;

/// Logical purpose of a packet. `AuthResponse` and `ExecCommand` share wire
/// value `2`; direction disambiguates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    /// Authentication request carrying the password (wire value 3).
    Auth,
    /// Server's verdict on an authentication request (wire value 2).
    AuthResponse,
    /// Command request (also wire value 2).
    ExecCommand,
    /// Plain response body (wire value 0).
    ResponseValue,
}

impl PacketKind {
    /// The raw type value written to the wire.
    pub fn wire_value(self) -> i32 {
        match self {
            PacketKind::Auth => 3,
            PacketKind::AuthResponse | PacketKind::ExecCommand => 2,
            PacketKind::ResponseValue => 0,
        }
    }

    /// Maps a raw type value read off the wire. This crate only decodes
    /// server responses, so `2` resolves to [`PacketKind::AuthResponse`].
    fn from_wire(raw: i32) -> Result<Self> {
        match raw {
            3 => Ok(PacketKind::Auth),
            2 => Ok(PacketKind::AuthResponse),
            0 => Ok(PacketKind::ResponseValue),
            other => Err(ProtocolError::UnknownPacketType(other)),
        }
    }
}

/// One Source-RCON packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RconPacket {
    pub id: i32,
    pub kind: PacketKind,
    pub body: String,
}

impl RconPacket {
    /// Authentication request carrying the password.
    pub fn auth(id: i32, password: &str) -> Self {
        Self {
            id,
            kind: PacketKind::Auth,
            body: password.to_string(),
        }
    }

    /// Command request.
    pub fn command(id: i32, command: &str) -> Self {
        Self {
            id,
            kind: PacketKind::ExecCommand,
            body: command.to_string(),
        }
    }

    /// Decodes a packet from `payload`, the bytes following the size prefix.
    /// `declared_len` is the size the prefix announced; the body occupies
    /// `declared_len - 10` bytes and the two trailing NULs are discarded.
    pub fn decode(payload: &[u8], declared_len: i32) -> Result<Self> {
        let declared = usize::try_from(declared_len).map_err(|_| ProtocolError::InvalidHeader)?;
        if declared < PACKET_OVERHEAD || payload.len() < declared {
            return Err(ProtocolError::InvalidHeader);
        }

        let mut buf = &payload[..declared];
        let id = buf.get_i32_le();
        let raw_kind = buf.get_i32_le();
        let body = ascii_lossy(&buf[..declared - PACKET_OVERHEAD]);

        Ok(Self {
            id,
            kind: PacketKind::from_wire(raw_kind)?,
            body,
        })
    }

    /// Encodes the packet, size prefix included, into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        let body = ascii_bytes(&self.body);
        dst.reserve(body.len() + PACKET_OVERHEAD + 4);
        dst.put_i32_le((body.len() + PACKET_OVERHEAD) as i32);
        dst.put_i32_le(self.id);
        dst.put_i32_le(self.kind.wire_value());
        dst.put_slice(&body);
        dst.put_bytes(0, 2);
    }
}

/// Length-prefixed framing for [`RconPacket`] over a byte stream, for use
/// with `tokio_util::codec::Framed`.
pub struct RconCodec;

impl Decoder for RconCodec {
    type Item = RconPacket;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RconPacket>> {
        if src.len() < 4 {
            return Ok(None);
        }

        let declared = i32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        if declared < PACKET_OVERHEAD as i32 {
            return Err(ProtocolError::InvalidHeader);
        }

        let declared_len = declared as usize;
        if declared_len > MAX_PACKET_SIZE {
            return Err(ProtocolError::OversizedPacket(declared_len));
        }

        if src.len() < 4 + declared_len {
            src.reserve(4 + declared_len - src.len());
            return Ok(None);
        }

        src.advance(4);
        let payload = src.split_to(declared_len);
        RconPacket::decode(&payload, declared).map(Some)
    }
}

impl Encoder<RconPacket> for RconCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: RconPacket, dst: &mut BytesMut) -> Result<()> {
        packet.encode(dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn roundtrip(packet: RconPacket) -> RconPacket {
        let mut buf = BytesMut::new();
        packet.encode(&mut buf);
        RconCodec
            .decode(&mut buf)
            .expect("decode")
            .expect("complete packet")
    }

    #[test]
    fn auth_packet_roundtrip() {
        let decoded = roundtrip(RconPacket::auth(10, "hunter2"));
        assert_eq!(decoded.id, 10);
        // wire value 3 survives as Auth even on the decode side
        assert_eq!(decoded.kind, PacketKind::Auth);
        assert_eq!(decoded.body, "hunter2");
    }

    #[test]
    fn command_decodes_as_auth_response() {
        // ExecCommand and AuthResponse share wire value 2; the decoder sees
        // the response meaning.
        let decoded = roundtrip(RconPacket::command(11, "say hello"));
        assert_eq!(decoded.id, 11);
        assert_eq!(decoded.kind, PacketKind::AuthResponse);
        assert_eq!(decoded.body, "say hello");
    }

    #[test]
    fn size_prefix_is_body_plus_ten() {
        for body in ["", "a", "list", "whereis $2"] {
            let mut buf = BytesMut::new();
            RconPacket::command(1, body).encode(&mut buf);
            let declared = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
            assert_eq!(declared as usize, body.len() + 10);
            assert_eq!(buf.len(), body.len() + 14);
            // trailing NUL terminators
            assert_eq!(&buf[buf.len() - 2..], &[0, 0]);
        }
    }

    #[test]
    fn non_ascii_body_degrades() {
        let decoded = roundtrip(RconPacket::command(5, "say héllo"));
        assert_eq!(decoded.body, "say h?llo");
    }

    #[test]
    fn arbitrary_ids_and_types_roundtrip() {
        for id in [i32::MIN, -1, 0, 10, i32::MAX] {
            for kind in [PacketKind::Auth, PacketKind::ResponseValue] {
                let packet = RconPacket {
                    id,
                    kind,
                    body: "body".to_string(),
                };
                let decoded = roundtrip(packet);
                assert_eq!(decoded.id, id);
                assert_eq!(decoded.kind, kind);
            }
        }
    }

    #[test]
    fn partial_buffer_waits_for_more() {
        let mut full = BytesMut::new();
        RconPacket::command(2, "list").encode(&mut full);

        let mut partial = BytesMut::from(&full[..6]);
        assert!(RconCodec.decode(&mut partial).unwrap().is_none());

        partial.extend_from_slice(&full[6..]);
        let decoded = RconCodec.decode(&mut partial).unwrap().unwrap();
        assert_eq!(decoded.body, "list");
        assert!(partial.is_empty());
    }

    #[test]
    fn undersized_length_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(4);
        buf.put_bytes(0, 4);
        assert!(matches!(
            RconCodec.decode(&mut buf),
            Err(ProtocolError::InvalidHeader)
        ));
    }

    #[test]
    fn oversized_length_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_i32_le((MAX_PACKET_SIZE + 1) as i32);
        assert!(matches!(
            RconCodec.decode(&mut buf),
            Err(ProtocolError::OversizedPacket(_))
        ));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(-1);
        assert!(matches!(
            RconCodec.decode(&mut buf),
            Err(ProtocolError::InvalidHeader)
        ));
    }

    #[test]
    fn unknown_type_value_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(10);
        buf.put_i32_le(1);
        buf.put_i32_le(7); // no such packet type
        buf.put_bytes(0, 2);
        assert!(matches!(
            RconCodec.decode(&mut buf),
            Err(ProtocolError::UnknownPacketType(7))
        ));
    }
}
