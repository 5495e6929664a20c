//! Asset file I/O.

use std::{
    fs::{read, write},
    path::{Path, PathBuf},
};

use crate::{Result, StripError};

/// A build output asset read and rewritten in place.
#[derive(Debug, Clone)]
pub struct AssetFile {
    path: PathBuf,
}

impl AssetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).map_err(|source| StripError::Io { path: self.path.clone(), source })
    }

    /// Reads the file as text, replacing invalid UTF-8.
    pub fn read_text(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.read()?).into_owned())
    }

    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data).map_err(|source| StripError::Io { path: self.path.clone(), source })
    }
}

impl AsRef<Path> for AssetFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
