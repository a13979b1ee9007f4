//! Protocol response codes.

use crate::byte_value::ByteValue;

/// Outcome of a protocol exchange, as reported by the server.
///
/// Each variant is bound to one byte, assigned by declaration order
/// starting at 0. Declaration order is the wire contract: reordering
/// variants changes the meaning of already-deployed bytes, so the
/// order below must stay stable across versions. Keep server and
/// clients on the same protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// The server could not produce a proper code, or the versions
    /// of server and client disagree.
    Unknown,
    /// The client must authenticate before doing anything else.
    RequiresAuthentication,
    /// The server attempted to authenticate the client.
    AuthenticationAttempted,
    /// The client is already authenticated.
    AlreadyAuthenticated,
    /// Everything went well.
    Success,
    /// The client supplied an invalid session UUID.
    InvalidUuid,
    /// The channel failed while generating the data.
    ChannelException,
    /// The client requested a channel the server does not serve.
    InvalidChannel,
}

impl ResponseCode {
    /// Every response code, in declaration (and therefore byte) order.
    pub const ALL: [ResponseCode; 8] = [
        ResponseCode::Unknown,
        ResponseCode::RequiresAuthentication,
        ResponseCode::AuthenticationAttempted,
        ResponseCode::AlreadyAuthenticated,
        ResponseCode::Success,
        ResponseCode::InvalidUuid,
        ResponseCode::ChannelException,
        ResponseCode::InvalidChannel,
    ];

    /// Returns the wire byte for this code.
    pub fn to_byte(self) -> u8 {
        match self {
            ResponseCode::Unknown => 0,
            ResponseCode::RequiresAuthentication => 1,
            ResponseCode::AuthenticationAttempted => 2,
            ResponseCode::AlreadyAuthenticated => 3,
            ResponseCode::Success => 4,
            ResponseCode::InvalidUuid => 5,
            ResponseCode::ChannelException => 6,
            ResponseCode::InvalidChannel => 7,
        }
    }

    /// Decodes a wire byte.
    ///
    /// Total: a byte outside the table decodes to
    /// [`ResponseCode::Unknown`] rather than failing. `Unknown` is a
    /// regular table entry at byte 0, so `from_byte(0)` and
    /// `from_byte(0xFF)` both yield it.
    pub fn from_byte(byte: u8) -> ResponseCode {
        Self::ALL
            .into_iter()
            .find(|code| code.to_byte() == byte)
            .unwrap_or(ResponseCode::Unknown)
    }
}

impl ByteValue for ResponseCode {
    fn byte_value(&self) -> u8 {
        self.to_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_follow_declaration_order() {
        for (position, code) in ResponseCode::ALL.into_iter().enumerate() {
            assert_eq!(code.to_byte() as usize, position);
        }
    }

    #[test]
    fn roundtrip_every_code() {
        for code in ResponseCode::ALL {
            assert_eq!(ResponseCode::from_byte(code.to_byte()), code);
        }
    }

    #[test]
    fn unassigned_byte_decodes_to_unknown() {
        assert_eq!(ResponseCode::from_byte(8), ResponseCode::Unknown);
        assert_eq!(ResponseCode::from_byte(0xFF), ResponseCode::Unknown);
    }

    #[test]
    fn no_two_codes_share_a_byte() {
        let mut seen = std::collections::HashSet::new();
        for code in ResponseCode::ALL {
            assert!(seen.insert(code.to_byte()));
        }
    }
}
