use std::result;

use read_fonts::ReadError;
use thiserror::Error;
use write_fonts::{BuilderError, error};

use crate::types::GlyphIndex;

#[derive(Error, Debug)]
pub enum SubsetError {
    #[error("failed to read font: {0}")]
    Read(#[from] ReadError),

    #[error("failed to write font: {0}")]
    Write(#[from] error::Error),

    #[error("failed to build font: {0}")]
    Builder(#[from] BuilderError),

    #[error("required table '{0}' not found")]
    MissingTable(&'static str),

    #[error("unsupported outline format: font has a '{0}' table, only glyf outlines are supported")]
    UnsupportedOutlines(&'static str),

    #[error("glyph {index} has malformed outline data")]
    MalformedGlyph { index: GlyphIndex },

    #[error("Glyph {identifier:?} not found")]
    MissingGlyph { identifier: String },

    #[error("composite glyph {glyph:?} references {component}, which is not part of the subset")]
    DanglingComponent { glyph: String, component: GlyphIndex },

    #[error("inconsistent glyph tables: {0}")]
    Inconsistent(String),

    #[error("failed to build cmap table")]
    CmapBuild,
}

pub type Result<T> = result::Result<T, SubsetError>;
