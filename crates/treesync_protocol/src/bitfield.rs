//! Packed flag sets.

use crate::byte_value::ByteValue;

/// Packs a set of single-bit tags into one integer and back.
///
/// The field is built once from the full declared tag set and is
/// immutable afterwards; packing ORs the tag bytes together and
/// unpacking tests each declared tag with an AND-equality check.
///
/// Callers must choose pairwise-distinct single-bit byte values for
/// their tags. The construction does not enforce this: a tag with two
/// bits set would unpack only when both bits are present, and a tag
/// sharing a bit with another would unpack alongside it.
///
/// # Example
///
/// ```
/// use treesync_protocol::{BitField, ByteValue};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Perm {
///     Read,
///     Write,
/// }
///
/// impl ByteValue for Perm {
///     fn byte_value(&self) -> u8 {
///         match self {
///             Perm::Read => 0x01,
///             Perm::Write => 0x02,
///         }
///     }
/// }
///
/// let field = BitField::new(&[Perm::Read, Perm::Write]);
/// let packed = field.pack([Perm::Read, Perm::Write]);
/// assert_eq!(packed, 0x03);
/// assert_eq!(field.unpack(packed), vec![Perm::Read, Perm::Write]);
/// ```
#[derive(Debug, Clone)]
pub struct BitField<E: 'static> {
    tags: &'static [E],
}

impl<E: ByteValue + Copy> BitField<E> {
    /// Creates a field over the full declared tag set.
    pub fn new(tags: &'static [E]) -> Self {
        Self { tags }
    }

    /// ORs the given tags into one integer; an empty set packs to 0.
    pub fn pack<I: IntoIterator<Item = E>>(&self, tags: I) -> u8 {
        tags.into_iter()
            .fold(0, |field, tag| field | tag.byte_value())
    }

    /// Extracts every declared tag whose bits are all present in
    /// `field`; `unpack(0)` is empty. Tags come back in declaration
    /// order, though callers should not rely on it.
    pub fn unpack(&self, field: u8) -> Vec<E> {
        if field == 0 {
            return Vec::new();
        }
        self.tags
            .iter()
            .copied()
            .filter(|tag| field & tag.byte_value() == tag.byte_value())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flag {
        A,
        B,
        C,
        D,
    }

    impl ByteValue for Flag {
        fn byte_value(&self) -> u8 {
            match self {
                Flag::A => 0x01,
                Flag::B => 0x02,
                Flag::C => 0x04,
                Flag::D => 0x08,
            }
        }
    }

    const FLAGS: [Flag; 4] = [Flag::A, Flag::B, Flag::C, Flag::D];

    #[test]
    fn empty_set_packs_to_zero() {
        let field = BitField::new(&FLAGS);
        assert_eq!(field.pack([]), 0);
        assert!(field.unpack(0).is_empty());
    }

    #[test]
    fn unpack_ignores_unknown_bits() {
        let field = BitField::new(&FLAGS);
        // 0x10 is not a declared bit; only A survives.
        assert_eq!(field.unpack(0x11), vec![Flag::A]);
    }

    proptest! {
        #[test]
        fn pack_unpack_roundtrip(mask in 0u8..16) {
            let field = BitField::new(&FLAGS);
            let subset: Vec<Flag> = FLAGS
                .into_iter()
                .filter(|f| mask & f.byte_value() != 0)
                .collect();
            let packed = field.pack(subset.clone());
            prop_assert_eq!(field.unpack(packed), subset);
            // Re-packing reproduces the field restricted to known bits.
            prop_assert_eq!(field.pack(field.unpack(mask)), mask & 0x0F);
        }
    }
}
