use std::{io, result};

use read_fonts::types::Tag;
use stripfont_font_subsetter::SubsetError;
use thiserror::Error;

use crate::ContainerKind;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("not a {expected} font (signature {found})")]
    Signature { expected: ContainerKind, found: String },

    #[error("invalid WOFF data: {0}")]
    Woff(String),

    #[error("failed to (de)compress table '{tag}': {source}")]
    Zlib {
        tag: Tag,
        #[source]
        source: io::Error,
    },

    #[error("invalid WOFF2 data: {0}")]
    Woff2(String),

    #[error(transparent)]
    Font(#[from] SubsetError),

    #[error("failed to serialize font '{font_name}': {source}")]
    Encode {
        font_name: String,
        #[source]
        source: SubsetError,
    },

    #[error("failed to compress font '{font_name}' as {kind}: {message}")]
    Compress {
        font_name: String,
        kind: ContainerKind,
        message: String,
    },
}

pub type Result<T> = result::Result<T, ContainerError>;
