//! Build errors
//!
//! Every failure aborts the build; variants carry the path involved.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::palette::PaletteError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("I/O error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Nothing to archive in {}", .0.display())]
    EmptySource(PathBuf),

    #[error("Archive path has no file name: {}", .0.display())]
    InvalidArchivePath(PathBuf),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid config {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Attach the offending path to an `io::Error`.
pub trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T, BuildError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, BuildError> {
        self.map_err(|source| BuildError::Io { path: path.to_path_buf(), source })
    }
}
