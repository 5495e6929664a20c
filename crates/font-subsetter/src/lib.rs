//! # Font Subsetter
//!
//! Reduce a TrueType icon font to exactly the glyphs selected by name.
//!
//! Surviving glyphs are renumbered densely in the order they were requested,
//! and every table that depends on glyph order (`glyf`, `loca`, `hmtx`,
//! `cmap`, `post`, `maxp`, `hhea`) is rewritten to match.
//!
//! ## Example
//!
//! ```no_run
//! use stripfont_font_subsetter::{DecodedFont, NOTDEF_SENTINEL};
//!
//! let data = std::fs::read("bootstrap-icons.ttf").unwrap();
//! let font = DecodedFont::from_sfnt(&data).unwrap();
//! let subset = font.subset([NOTDEF_SENTINEL, "house", "search"]).unwrap();
//! std::fs::write("out.ttf", subset.to_sfnt().unwrap()).unwrap();
//! ```

mod error;
mod font;
mod subset;
mod tables;
mod types;

pub use error::{Result, SubsetError};
pub use font::{DROPPED_TABLES, DecodedFont, GlyphRecord};
pub use subset::NOTDEF_SENTINEL;
pub use tables::{glyf::Outline, hmtx::HorizontalMetrics, name::UNNAMED_FONT};
pub use types::{Codepoint, GlyphIndex};

/// Decode `data`, keep the glyphs named in `used`, and re-encode.
pub fn subset_font_bytes<I, S>(data: &[u8], used: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DecodedFont::from_sfnt(data)?.subset(used)?.to_sfnt()
}
