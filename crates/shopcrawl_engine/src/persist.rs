use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Conventional filename of the CSV export.
pub const CSV_FILENAME: &str = "products.csv";
/// Conventional filename of the JSON export.
pub const JSON_FILENAME: &str = "products.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {dir}: {reason}")]
    OutputDir { dir: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Delivers export payloads into an output directory.
///
/// Each payload is staged as a temp file in the target directory and then
/// renamed into place, so an interrupted run never leaves a truncated
/// export behind. Saving the same filename again replaces the previous
/// export.
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, PersistError> {
        self.prepare_dir()?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(payload)?;
        staged.flush()?;
        staged.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        if target.exists() {
            fs::remove_file(&target)?;
        }
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }

    /// Creates the output directory if missing and probes that it is
    /// actually writable before anything is staged into it.
    fn prepare_dir(&self) -> Result<(), PersistError> {
        let fail = |reason: String| PersistError::OutputDir {
            dir: self.dir.clone(),
            reason,
        };

        if self.dir.exists() {
            if !self.dir.is_dir() {
                return Err(fail("path exists but is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&self.dir).map_err(|err| fail(err.to_string()))?;
        }
        NamedTempFile::new_in(&self.dir).map_err(|err| fail(err.to_string()))?;
        Ok(())
    }
}
