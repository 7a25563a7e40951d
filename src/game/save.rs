//! Save file for adventure progress

use crate::data::Progress;
use crate::GameError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error};

/// Read the save, or start fresh when there is none
pub fn load_progress(path: &Path) -> Result<Progress, GameError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no save file, starting a new game");
            return Ok(Progress::default());
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "could not read save file");
            return Err(e.into());
        }
    };
    serde_json::from_str(&text).map_err(|e| GameError::CorruptedSave(format!("{}: {e}", path.display())))
}

/// Overwrite the save with the whole progress record
pub fn save_progress(path: &Path, progress: &Progress) -> Result<(), GameError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string(progress)
        .map_err(|e| GameError::CorruptedSave(e.to_string()))?;
    fs::write(path, json).map_err(|e| {
        error!(path = %path.display(), error = %e, "could not write save file");
        e.into()
    })
}

/// Forget the current run
pub fn reset_progress(path: &Path) -> Result<(), GameError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Room;

    #[test]
    fn missing_save_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let progress = load_progress(&dir.path().join("progress.json")).unwrap();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves").join("progress.json");
        let mut progress = Progress::default();
        progress.move_to(Room::SecretRoom);
        progress.record("Start room: chose center");

        save_progress(&path, &progress).unwrap();
        assert_eq!(load_progress(&path).unwrap(), progress);

        reset_progress(&path).unwrap();
        assert_eq!(load_progress(&path).unwrap(), Progress::default());
    }

    #[test]
    fn garbage_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{\"current_room\": 3").unwrap();
        assert!(matches!(
            load_progress(&path),
            Err(GameError::CorruptedSave(_))
        ));
    }

    #[test]
    fn file_uses_the_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        save_progress(&path, &Progress::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["current_room"], "start");
        assert_eq!(value["score"], 0);
        assert!(value["inventory"].as_array().unwrap().is_empty());
        assert!(value["moves"].as_array().unwrap().is_empty());
    }
}
