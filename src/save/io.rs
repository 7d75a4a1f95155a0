//! Save domain: reading and writing the save file as JSON.

use std::fs;
use std::path::Path;

use super::data::SaveData;

/// Errors that can occur during save load/store.
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {e}"),
            SaveError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::IoError(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::JsonError(e)
    }
}

/// Reads the save at `path`. A missing file is a fresh save, not an error.
pub fn load_save_file(path: &Path) -> Result<SaveData, SaveError> {
    if !path.exists() {
        return Ok(SaveData::default());
    }

    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn write_save_file(path: &Path, data: &SaveData) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(data)?;
    fs::write(path, contents)?;
    Ok(())
}
