//! Save files and profile overrides on disk.

use std::{fs, io, path::Path};

use tesserae_core::DifficultyTable;
use tesserae_game::SessionSnapshot;

use crate::AppError;

/// Writes a snapshot as pretty-printed JSON.
pub fn save_snapshot(path: &Path, snapshot: &SessionSnapshot) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    log::debug!("saved session to {}", path.display());
    Ok(())
}

/// Reads a snapshot. A missing file is `Ok(None)`.
///
/// An unreadable JSON document is also `Ok(None)` after a warning, so a
/// corrupted save never prevents starting a new game.
pub fn load_snapshot(path: &Path) -> Result<Option<SessionSnapshot>, AppError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    match serde_json::from_str(&json) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(err) => {
            log::warn!("ignoring unreadable save file {}: {err}", path.display());
            Ok(None)
        }
    }
}

/// Reads a difficulty table from TOML.
///
/// Levels missing from the file keep their canonical profiles. Every profile
/// must describe a valid grid and a non-negative snap threshold.
pub fn load_profiles(path: &Path) -> Result<DifficultyTable, AppError> {
    let text = fs::read_to_string(path)?;
    parse_profiles(&text)
}

/// Parses a difficulty table from TOML text.
pub fn parse_profiles(text: &str) -> Result<DifficultyTable, AppError> {
    let table: DifficultyTable = toml::from_str(text)?;
    table.validate()?;
    Ok(table)
}
