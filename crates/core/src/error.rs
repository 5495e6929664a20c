use std::{io, path::PathBuf, result};

use stripfont_font_container::ContainerError;
use stripfont_font_subsetter::SubsetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StripError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid search pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("unable to import font {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("{}: {source}", .path.display())]
    Subset {
        path: PathBuf,
        #[source]
        source: SubsetError,
    },

    #[error("unable to export font {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },
}

pub type Result<T> = result::Result<T, StripError>;
