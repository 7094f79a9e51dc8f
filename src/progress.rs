//! Level progression persistence
//!
//! Only the unlocked watermark is stored; mid-level state never is.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Saved progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Highest level index reachable by advancing
    #[serde(default)]
    pub max_unlocked_level: usize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the watermark; never lowers it. Returns true if it changed.
    pub fn unlock(&mut self, index: usize) -> bool {
        if index > self.max_unlocked_level {
            self.max_unlocked_level = index;
            true
        } else {
            false
        }
    }

    /// Load progress from a JSON file, starting fresh on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No progress at {} ({e}), starting fresh", path.display());
                return Self::new();
            }
        };
        match serde_json::from_str::<Progress>(&json) {
            Ok(progress) => {
                log::info!("Loaded progress: level {} unlocked", progress.max_unlocked_level);
                progress
            }
            Err(e) => {
                log::warn!("Corrupt progress file {}: {e}; starting fresh", path.display());
                Self::new()
            }
        }
    }

    /// Save progress as JSON; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize progress: {e}");
                return;
            }
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create {}: {e}", parent.display());
                return;
            }
        }
        match std::fs::write(path, json) {
            Ok(()) => log::info!("Progress saved (level {} unlocked)", self.max_unlocked_level),
            Err(e) => log::warn!("Failed to save progress to {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_never_lowers() {
        let mut progress = Progress::new();
        assert!(progress.unlock(2));
        assert!(!progress.unlock(1));
        assert!(!progress.unlock(2));
        assert_eq!(progress.max_unlocked_level, 2);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("devil-progress-{}.json", std::process::id()));
        let progress = Progress { max_unlocked_level: 3 };
        progress.save(&path);
        assert_eq!(Progress::load(&path), progress);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("devil-progress-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Progress::load(&path), Progress::new());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_camel_case_field() {
        let progress: Progress = serde_json::from_str(r#"{ "maxUnlockedLevel": 4 }"#).unwrap();
        assert_eq!(progress.max_unlocked_level, 4);
    }
}
