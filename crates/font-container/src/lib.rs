//! Container codecs for font assets.
//!
//! Fonts are decoded into a [`DecodedFont`] regardless of how they are
//! stored on disk, and re-encoded into the container they came from.
//!
//! ```no_run
//! use stripfont_font_container::{ContainerKind, decode, encode};
//!
//! let data = std::fs::read("bootstrap-icons.woff2").unwrap();
//! let font = decode(&data, ContainerKind::Woff2).unwrap();
//! let font = font.subset(["", "house"]).unwrap();
//! let out = encode(&font, ContainerKind::Woff2).unwrap();
//! ```

use std::borrow::Cow;

use stripfont_font_subsetter::DecodedFont;

mod error;
mod kind;
mod woff;
mod woff2;

pub use error::{ContainerError, Result};
pub use kind::ContainerKind;

/// Extracts the uncompressed sfnt bytes from a container.
pub fn unpack(data: &[u8], kind: ContainerKind) -> Result<Cow<'_, [u8]>> {
    kind.check_signature(data)?;
    Ok(match kind {
        ContainerKind::Sfnt => Cow::Borrowed(data),
        ContainerKind::Woff => Cow::Owned(woff::decompress(data)?),
        ContainerKind::Woff2 => Cow::Owned(woff2::decompress(data)?),
    })
}

/// Wraps uncompressed sfnt bytes in a container.
pub fn pack(sfnt: Vec<u8>, kind: ContainerKind) -> Result<Vec<u8>> {
    match kind {
        ContainerKind::Sfnt => Ok(sfnt),
        ContainerKind::Woff => woff::compress(&sfnt),
        ContainerKind::Woff2 => woff2::compress(&sfnt).map_err(ContainerError::Woff2),
    }
}

/// Decodes a font stored as `kind`.
pub fn decode(data: &[u8], kind: ContainerKind) -> Result<DecodedFont> {
    let sfnt = unpack(data, kind)?;
    Ok(DecodedFont::from_sfnt(&sfnt)?)
}

/// Serializes `font` and stores it as `kind`.
pub fn encode(font: &DecodedFont, kind: ContainerKind) -> Result<Vec<u8>> {
    let font_name = font.full_name();
    let sfnt = font.to_sfnt().map_err(|source| ContainerError::Encode {
        font_name: font_name.to_string(),
        source,
    })?;

    pack(sfnt, kind).map_err(|e| ContainerError::Compress {
        font_name: font_name.to_string(),
        kind,
        message: e.to_string(),
    })
}
