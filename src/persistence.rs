/// High-score and coin-total persistence.
///
/// The save file is a small JSON object: `{"highScore": 12, "totalCoins": 40}`.
/// Anything unreadable is treated exactly like a missing file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::Progress;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SaveStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read progress, defaulting both counters to zero on any failure.
    pub fn load(&self) -> Progress {
        match self.try_load() {
            Ok(progress) => {
                debug!(?progress, path = %self.path.display(), "progress loaded");
                progress
            }
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Progress::default(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "save file unreadable, starting fresh");
                Progress::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Progress, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Overwrite the save file.
    pub fn save(&self, progress: &Progress) -> Result<(), StoreError> {
        let text = serde_json::to_string(progress)?;
        fs::write(&self.path, text)?;
        debug!(?progress, path = %self.path.display(), "progress saved");
        Ok(())
    }
}
