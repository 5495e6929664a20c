//! WOFF 2.0, delegated to `wuff` for decoding and `ttf2woff2` for encoding.

use crate::{ContainerError, Result};

pub(crate) fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    wuff::decompress_woff2(data).map_err(|e| ContainerError::Woff2(format!("{e:?}")))
}

pub(crate) fn compress(sfnt: &[u8]) -> std::result::Result<Vec<u8>, String> {
    ttf2woff2::encode(sfnt, ttf2woff2::BrotliQuality::default()).map_err(|e| format!("{e:?}"))
}
