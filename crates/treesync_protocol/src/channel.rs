//! Protocol command channels.

use crate::byte_value::ByteValue;

/// Identifier of a protocol command channel.
///
/// The core treats channels as opaque tags carried through requests
/// unchanged; the channel handlers behind them live outside this
/// workspace. Bytes follow declaration order starting at 0, under the
/// same stability contract as [`crate::ResponseCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// No channel, or a channel the peer does not recognize.
    Unknown,
    /// Session authentication.
    Authenticate,
    /// Query whether data changed since the last exchange.
    CheckData,
    /// Fetch data objects.
    GetData,
    /// Add data objects.
    AddData,
    /// Remove data objects.
    RemoveData,
}

impl Channel {
    /// Every channel, in declaration (and therefore byte) order.
    pub const ALL: [Channel; 6] = [
        Channel::Unknown,
        Channel::Authenticate,
        Channel::CheckData,
        Channel::GetData,
        Channel::AddData,
        Channel::RemoveData,
    ];

    /// Returns the wire byte for this channel.
    pub fn to_byte(self) -> u8 {
        match self {
            Channel::Unknown => 0,
            Channel::Authenticate => 1,
            Channel::CheckData => 2,
            Channel::GetData => 3,
            Channel::AddData => 4,
            Channel::RemoveData => 5,
        }
    }

    /// Decodes a wire byte; unassigned bytes yield [`Channel::Unknown`].
    pub fn from_byte(byte: u8) -> Channel {
        Self::ALL
            .into_iter()
            .find(|channel| channel.to_byte() == byte)
            .unwrap_or(Channel::Unknown)
    }
}

impl ByteValue for Channel {
    fn byte_value(&self) -> u8 {
        self.to_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_every_channel() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_byte(channel.to_byte()), channel);
        }
    }

    #[test]
    fn unassigned_byte_decodes_to_unknown() {
        assert_eq!(Channel::from_byte(6), Channel::Unknown);
        assert_eq!(Channel::from_byte(200), Channel::Unknown);
    }
}
