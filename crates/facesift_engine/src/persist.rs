use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::types::Deliverable;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Saves delivered exports under one output directory.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash mid-write never leaves a truncated archive behind.
/// Re-exporting under the same name replaces the earlier file.
#[derive(Debug, Clone)]
pub struct DeliverableStore {
    dir: PathBuf,
}

impl DeliverableStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes the deliverable to `{dir}/{filename}` and returns the final
    /// path. The directory is created on first use.
    pub fn save(&self, deliverable: &Deliverable) -> Result<PathBuf, PersistError> {
        self.ensure_dir()?;

        let target = self.dir.join(deliverable.filename());
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(deliverable.bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    fn ensure_dir(&self) -> Result<(), PersistError> {
        if self.dir.exists() {
            let meta =
                fs::metadata(&self.dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(PersistError::OutputDir("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&self.dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        }
        Ok(())
    }
}
