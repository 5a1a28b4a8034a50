//! Durable storage for the single player profile.

use super::types::Profile;
use crate::core::constants::{SAVE_DIR_ENV, SAVE_DIR_NAME, SAVE_FILE_NAME};
use crate::core::error::{EngineError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the save directory: `$CEREBRIA_HOME` if set, else `~/.cerebria/`.
pub fn save_dir() -> io::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(SAVE_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(SAVE_DIR_NAME))
}

/// Loads and saves one profile record as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store at the default location.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(save_dir()?.join(SAVE_FILE_NAME)))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the profile.
    ///
    /// A missing file, malformed JSON or a missing required key all yield
    /// `NotFound`. Other read failures are reported as `Io`.
    pub fn load(&self) -> Result<Profile> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(EngineError::NotFound),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), "profile record is not valid UTF-8");
                return Err(EngineError::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&json).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "discarding unreadable profile record");
            EngineError::NotFound
        })
    }

    /// Loads the profile, or creates and saves a new-game profile if none is usable.
    pub fn load_or_create(&self) -> Result<Profile> {
        match self.load() {
            Ok(profile) => Ok(profile),
            Err(EngineError::NotFound) => {
                debug!(path = %self.path.display(), "creating new profile");
                let profile = Profile::default();
                self.save(&profile)?;
                Ok(profile)
            }
            Err(e) => Err(e),
        }
    }

    /// Saves atomically: the record is written to a sibling temp file,
    /// synced, then renamed over the old one.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let written = write_synced(&temp_path, json.as_bytes())
            .and_then(|_| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            fs::remove_file(&temp_path).ok();
            return Err(e.into());
        }

        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }

    /// Destroys the backing record.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(EngineError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
