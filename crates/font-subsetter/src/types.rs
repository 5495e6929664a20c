//! Newtypes for glyph positions and codepoints.

use std::fmt::{Display, Formatter, Result};

use font_types::GlyphId16;

/// Position of a glyph in a font's glyph order.
///
/// Indices are positional: the rewriter reassigns them, so an index is only
/// meaningful for the font it was read from.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphIndex(pub u16);

impl GlyphIndex {
    /// The `.notdef` slot.
    pub const NOTDEF: Self = Self(0);

    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for GlyphIndex {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

impl From<GlyphId16> for GlyphIndex {
    fn from(gid: GlyphId16) -> Self {
        Self(gid.to_u16())
    }
}

impl From<GlyphIndex> for GlyphId16 {
    fn from(GlyphIndex(index): GlyphIndex) -> Self {
        GlyphId16::new(index)
    }
}

impl Display for GlyphIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "GID{}", self.0)
    }
}

/// A Unicode codepoint mapped to a glyph by `cmap`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint(pub u32);

impl Codepoint {
    pub const fn new(cp: u32) -> Self {
        Self(cp)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<u32> for Codepoint {
    fn from(cp: u32) -> Self {
        Self(cp)
    }
}

impl Display for Codepoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "U+{:04X}", self.0)
    }
}
