//! # Gateway Frame Codec
//!
//! Wire codec for one Gateway event frame.
//!
//! ## Wire Format
//! ```text
//! [Version(1)] [Sequence(2, LE)] [OpCode(1)] [Identifier(4, ASCII)]
//! [ContentLength(4, LE)] [Content(UTF-8)] [Padding(4, zero)]
//! ```
//!
//! One transport message carries exactly one frame, so decode operates on a
//! complete buffer rather than a byte stream. The version byte is checked
//! before anything else is read; every other malformation is an ordinary
//! decode error the caller can drop.

use crate::error::{ProtocolError, Result};
use crate::gateway::opcode::OpCode;
use crate::util::ascii_lossy;
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// The only frame version in circulation.
pub const FRAME_VERSION: u8 = 4;

/// Frame identifiers are exactly this many ASCII bytes.
pub const IDENTIFIER_LEN: usize = 4;

/// Version, sequence, opcode, identifier, and content length.
const HEADER_LEN: usize = 12;

/// Zero bytes written after the content.
const PADDING_LEN: usize = 4;

/// One Gateway frame.
///
/// `identifier` is the 4-character routing key a subscriber pairs with the
/// opcode to interpret `content`; building it is the payload layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub sequence: u16,
    pub opcode: OpCode,
    pub identifier: String,
    pub content: String,
}

impl Frame {
    pub fn new(
        sequence: u16,
        opcode: OpCode,
        identifier: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            opcode,
            identifier: identifier.into(),
            content: content.into(),
        }
    }

    /// Decodes one frame from a complete message buffer.
    ///
    /// A declared content length of zero means no content, whatever follows
    /// the header. A positive declared length is otherwise not enforced as a
    /// bound: content is everything from the header to the end of the
    /// buffer, which is what deployed subscribers produce and expect.
    /// Surrounding whitespace and zero padding are stripped from the
    /// content.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let version = *data.first().ok_or(ProtocolError::InvalidHeader)?;
        if version != FRAME_VERSION {
            return Err(ProtocolError::UnsupportedVersion(version));
        }

        if data.len() < HEADER_LEN {
            return Err(ProtocolError::InvalidHeader);
        }

        let sequence = u16::from_le_bytes([data[1], data[2]]);
        let opcode =
            OpCode::from_byte(data[3]).ok_or(ProtocolError::UnknownOpCode(data[3]))?;
        let identifier = ascii_lossy(&data[4..4 + IDENTIFIER_LEN]);

        let declared = i32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        let content = if declared > 0 {
            String::from_utf8_lossy(&data[HEADER_LEN..])
                .trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .to_string()
        } else {
            String::new()
        };

        Ok(Self {
            sequence,
            opcode,
            identifier,
            content,
        })
    }

    /// Encodes the frame into `buf`. Returns the number of bytes accounted
    /// to the frame: the content plus 16 bytes of header and padding.
    pub fn encode(&self, buf: &mut BytesMut) -> usize {
        let content = self.content.as_bytes();
        buf.reserve(HEADER_LEN + content.len() + PADDING_LEN);

        buf.put_u8(FRAME_VERSION);
        buf.put_u16_le(self.sequence);
        buf.put_u8(self.opcode.as_byte());
        buf.put_slice(&identifier_bytes(&self.identifier));
        buf.put_i32_le(content.len() as i32);
        buf.put_slice(content);
        buf.put_bytes(0, PADDING_LEN);

        content.len() + HEADER_LEN + PADDING_LEN
    }

    /// Encodes the frame and writes it through `sink`. Returns the same
    /// count as [`Frame::encode`].
    pub async fn write_to<W: AsyncWrite + Unpin>(&self, sink: &mut W) -> Result<usize> {
        let mut buf = BytesMut::new();
        let written = self.encode(&mut buf);
        sink.write_all(&buf).await?;
        Ok(written)
    }
}

/// Clamps an identifier to exactly four ASCII bytes: non-ASCII characters
/// degrade to `?`, short identifiers are padded with spaces, long ones are
/// truncated.
fn identifier_bytes(identifier: &str) -> [u8; IDENTIFIER_LEN] {
    let mut out = [b' '; IDENTIFIER_LEN];
    for (slot, c) in out.iter_mut().zip(identifier.chars()) {
        *slot = if c.is_ascii() { c as u8 } else { b'?' };
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn roundtrip(frame: &Frame) -> Frame {
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);
        Frame::decode(&buf).expect("decode")
    }

    #[test]
    fn roundtrip_all_opcodes() {
        for (i, opcode) in OpCode::ALL.into_iter().enumerate() {
            let frame = Frame::new(i as u16, opcode, "TEST", format!("content-{i}"));
            assert_eq!(roundtrip(&frame), frame);
        }
    }

    #[test]
    fn roundtrip_empty_content() {
        let frame = Frame::new(0, OpCode::Heartbeat, "BEAT", "");
        let decoded = roundtrip(&frame);
        assert_eq!(decoded.content, "");
        assert_eq!(decoded.identifier, "BEAT");
    }

    #[test]
    fn roundtrip_unicode_content() {
        let frame = Frame::new(9, OpCode::LogEvent, "CHAT", "\"héllo wörld\"");
        assert_eq!(roundtrip(&frame).content, "\"héllo wörld\"");
    }

    #[test]
    fn roundtrip_max_sequence() {
        let frame = Frame::new(u16::MAX, OpCode::ServerEvent, "EXIT", "\"crash\"");
        assert_eq!(roundtrip(&frame).sequence, u16::MAX);
    }

    #[test]
    fn encode_reports_content_plus_overhead() {
        let frame = Frame::new(1, OpCode::Welcome, "WELC", "{}");
        let mut buf = BytesMut::new();
        assert_eq!(frame.encode(&mut buf), 2 + 16);
        assert_eq!(buf.len(), 2 + 16);
    }

    #[test]
    fn wire_layout() {
        let frame = Frame::new(0x0201, OpCode::LogEvent, "INFO", "hi");
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);

        assert_eq!(buf[0], 4); // version
        assert_eq!(&buf[1..3], &[0x01, 0x02]); // sequence, little endian
        assert_eq!(buf[3], 10); // opcode
        assert_eq!(&buf[4..8], b"INFO");
        assert_eq!(&buf[8..12], &[2, 0, 0, 0]); // content length
        assert_eq!(&buf[12..14], b"hi");
        assert_eq!(&buf[14..18], &[0, 0, 0, 0]); // padding
    }

    #[test]
    fn bad_version_rejected() {
        let frame = Frame::new(1, OpCode::Hello, "HELO", "x");
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);
        buf[0] = 3;

        assert!(matches!(
            Frame::decode(&buf),
            Err(ProtocolError::UnsupportedVersion(3))
        ));
    }

    #[test]
    fn empty_buffer_rejected() {
        assert!(matches!(
            Frame::decode(&[]),
            Err(ProtocolError::InvalidHeader)
        ));
    }

    #[test]
    fn truncated_header_rejected() {
        // correct version but nothing else
        assert!(matches!(
            Frame::decode(&[4, 0, 0]),
            Err(ProtocolError::InvalidHeader)
        ));
    }

    #[test]
    fn unknown_opcode_rejected() {
        let frame = Frame::new(1, OpCode::Hello, "HELO", "x");
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);
        buf[3] = 9;

        assert!(matches!(
            Frame::decode(&buf),
            Err(ProtocolError::UnknownOpCode(9))
        ));
    }

    #[test]
    fn zero_declared_length_means_no_content() {
        let mut buf = BytesMut::new();
        Frame::new(1, OpCode::Close, "DONE", "").encode(&mut buf);
        // trailing garbage after the header must not become content
        buf.put_slice(b"junk");

        assert_eq!(Frame::decode(&buf).unwrap().content, "");
    }

    #[test]
    fn content_read_to_end_of_buffer() {
        // a peer that pads beyond the declared length still decodes; the
        // declared length is not a bound
        let mut buf = BytesMut::new();
        Frame::new(1, OpCode::LogEvent, "INFO", "hello").encode(&mut buf);
        buf.put_slice(b"   ");

        assert_eq!(Frame::decode(&buf).unwrap().content, "hello");
    }

    #[test]
    fn identifier_clamped_to_four_bytes() {
        assert_eq!(&identifier_bytes("WELC"), b"WELC");
        assert_eq!(&identifier_bytes("LONGER"), b"LONG");
        assert_eq!(&identifier_bytes("AB"), b"AB  ");
        assert_eq!(&identifier_bytes("é¥AB"), b"??AB");
    }

    #[tokio::test]
    async fn write_to_matches_encode() {
        let frame = Frame::new(3, OpCode::PlayerEvent, "CONN", "{\"Connection\":3}");

        let mut sink = Vec::new();
        let written = frame.write_to(&mut sink).await.unwrap();

        let mut buf = BytesMut::new();
        let encoded = frame.encode(&mut buf);

        assert_eq!(written, encoded);
        assert_eq!(&sink[..], &buf[..]);
    }
}
