//! Gateway frame opcodes.

/// Purpose tag of a Gateway frame. The set is closed: handshake control
/// codes below 10, event stream codes from 10 up. Unknown bytes are a
/// decode failure, never a silent cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Close = 0,
    Hello = 1,
    Welcome = 2,
    Filter = 3,
    FilterAck = 4,
    Heartbeat = 5,
    HeartbeatAck = 6,

    LogEvent = 10,
    ServerEvent = 12,
    PlayerEvent = 14,
}

impl OpCode {
    /// Every defined opcode, in wire order.
    pub const ALL: [OpCode; 10] = [
        OpCode::Close,
        OpCode::Hello,
        OpCode::Welcome,
        OpCode::Filter,
        OpCode::FilterAck,
        OpCode::Heartbeat,
        OpCode::HeartbeatAck,
        OpCode::LogEvent,
        OpCode::ServerEvent,
        OpCode::PlayerEvent,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(OpCode::Close),
            1 => Some(OpCode::Hello),
            2 => Some(OpCode::Welcome),
            3 => Some(OpCode::Filter),
            4 => Some(OpCode::FilterAck),
            5 => Some(OpCode::Heartbeat),
            6 => Some(OpCode::HeartbeatAck),
            10 => Some(OpCode::LogEvent),
            12 => Some(OpCode::ServerEvent),
            14 => Some(OpCode::PlayerEvent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn byte_roundtrip() {
        for opcode in OpCode::ALL {
            assert_eq!(OpCode::from_byte(opcode.as_byte()).unwrap(), opcode);
        }
    }

    #[test]
    fn undefined_bytes_rejected() {
        for byte in [7, 8, 9, 11, 13, 15, 255] {
            assert!(OpCode::from_byte(byte).is_none());
        }
    }
}
