use std::{fmt, path::Path};

use crate::{ContainerError, Result};

const SFNT_TRUETYPE: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
const SFNT_APPLE: [u8; 4] = *b"true";
const SFNT_CFF: [u8; 4] = *b"OTTO";
const WOFF: [u8; 4] = *b"wOFF";
const WOFF2: [u8; 4] = *b"wOF2";

/// The container format a font asset is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Uncompressed TrueType/OpenType.
    Sfnt,
    /// WOFF 1.0, per-table zlib.
    Woff,
    /// WOFF 2.0, Brotli with glyf/loca transforms.
    Woff2,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [Self::Sfnt, Self::Woff, Self::Woff2];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ttf" | "otf" => Some(Self::Sfnt),
            "woff" => Some(Self::Woff),
            "woff2" => Some(Self::Woff2),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guesses the container from the leading signature bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data.get(..4)?.try_into().ok()? {
            SFNT_TRUETYPE | SFNT_APPLE | SFNT_CFF => Some(Self::Sfnt),
            WOFF => Some(Self::Woff),
            WOFF2 => Some(Self::Woff2),
            _ => None,
        }
    }

    /// The canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Sfnt => "ttf",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }

    pub(crate) fn check_signature(self, data: &[u8]) -> Result<()> {
        let found = Self::sniff(data);
        if found == Some(self) {
            return Ok(());
        }
        Err(ContainerError::Signature {
            expected: self,
            found: data.iter().take(4).map(|b| format!("{b:02x}")).collect(),
        })
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sfnt => "sfnt",
            Self::Woff => "WOFF",
            Self::Woff2 => "WOFF2",
        })
    }
}
