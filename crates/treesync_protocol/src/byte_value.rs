//! Single-byte tag capability.

/// A tag that serializes to exactly one byte on the wire.
///
/// Implemented by closed enumerations such as [`crate::ResponseCode`]
/// and [`crate::Channel`], and by flag enums handed to
/// [`crate::BitField`]. The byte is the entire wire representation of
/// the tag.
pub trait ByteValue {
    /// Returns the wire byte for this tag.
    fn byte_value(&self) -> u8;
}
