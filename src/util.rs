//! Byte-level text helpers shared by the wire codecs.
//!
//! Both wire protocols carry single-byte-charset text in places (RCON packet
//! bodies, frame identifiers). These helpers mirror the upstream behavior:
//! any character outside ASCII is replaced with `?` rather than rejected.

/// Decode a byte slice as ASCII, substituting `?` for anything outside ASCII.
pub(crate) fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// Encode text as ASCII bytes, substituting `?` for anything outside ASCII.
/// Each non-ASCII character collapses to a single `?`, regardless of how many
/// bytes it occupied in UTF-8.
pub(crate) fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(ascii_lossy(b"hello $1"), "hello $1");
        assert_eq!(ascii_bytes("hello $1"), b"hello $1");
    }

    #[test]
    fn non_ascii_becomes_question_mark() {
        assert_eq!(ascii_lossy(&[0x68, 0xC3, 0xA9]), "h??");
        // one multi-byte character collapses to one substitute byte
        assert_eq!(ascii_bytes("héllo"), b"h?llo");
    }
}
