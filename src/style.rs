//! Style bit flags packed into the high byte of a [`Cell`](crate::Cell).

/// A bit set of text style attributes, packed into a single byte.
///
/// The eight named flags below each occupy one distinct bit and may be
/// freely combined with `|`. [`StyleFlags::OVERLINED`] is the exception: it
/// is the degenerate all-bits-set value `0xFF`, inherited unchanged from the
/// C reference implementation this crate is grounded on. It is not a
/// combinable ninth bit — there isn't room for one in an 8-bit field — it's
/// a historical sentinel that happens to alias "every other flag is also
/// set". See DESIGN.md for the full rationale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct StyleFlags(u8);

impl StyleFlags {
    /// All attributes off.
    pub const NONE: StyleFlags = StyleFlags(0);
    /// Bold / increased intensity.
    pub const BOLD: StyleFlags = StyleFlags(1);
    /// Faint / decreased intensity (aka dim).
    pub const FAINT: StyleFlags = StyleFlags(2);
    /// Italic.
    pub const ITALIC: StyleFlags = StyleFlags(4);
    /// Underline.
    pub const UNDERLINE: StyleFlags = StyleFlags(8);
    /// Invert / reverse video (swap foreground and background).
    pub const INVERT: StyleFlags = StyleFlags(16);
    /// Crossed out (aka strikethrough).
    pub const CROSSED_OUT: StyleFlags = StyleFlags(32);
    /// Fraktur.
    pub const FRAKTUR: StyleFlags = StyleFlags(64);
    /// Double underline.
    pub const DOUBLE_UNDERLINE: StyleFlags = StyleFlags(128);
    /// Overlined. Inherited sentinel value `0xFF` — see the type docs.
    pub const OVERLINED: StyleFlags = StyleFlags(0xFF);

    /// Builds a `StyleFlags` from a raw packed byte.
    pub const fn from_bits(bits: u8) -> StyleFlags {
        StyleFlags(bits)
    }

    /// The raw packed byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns the union of `self` and `other`.
    pub const fn union(self, other: StyleFlags) -> StyleFlags {
        StyleFlags(self.0 | other.0)
    }

    /// True if every bit set in `flag` is also set in `self`.
    pub const fn contains(self, flag: StyleFlags) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = StyleFlags;
    fn bitor(self, rhs: StyleFlags) -> StyleFlags {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for StyleFlags {
    fn bitor_assign(&mut self, rhs: StyleFlags) {
        self.0 |= rhs.0;
    }
}

impl From<u8> for StyleFlags {
    fn from(bits: u8) -> Self {
        StyleFlags::from_bits(bits)
    }
}

impl From<StyleFlags> for u8 {
    fn from(flags: StyleFlags) -> Self {
        flags.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_distinct_flags() {
        let combo = StyleFlags::BOLD | StyleFlags::UNDERLINE;
        assert!(combo.contains(StyleFlags::BOLD));
        assert!(combo.contains(StyleFlags::UNDERLINE));
        assert!(!combo.contains(StyleFlags::ITALIC));
        assert_eq!(combo.bits(), 1 | 8);
    }

    #[test]
    fn overlined_is_the_all_bits_sentinel() {
        assert_eq!(StyleFlags::OVERLINED.bits(), 0xFF);
    }

    #[test]
    fn round_trips_through_raw_byte() {
        let flags = StyleFlags::FAINT | StyleFlags::CROSSED_OUT;
        assert_eq!(StyleFlags::from_bits(flags.bits()), flags);
    }
}
