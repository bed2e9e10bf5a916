use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::{Profile, ScoreStore};

/// Default location of the profile document, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "snake_scores.json";

/// Profile kept as a pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Profile {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved profile yet");
                return Profile::default();
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read profile, using defaults"
                );
                return Profile::default();
            }
        };

        match serde_json::from_str::<Profile>(&raw) {
            Ok(mut profile) => {
                profile.leaderboard.sort();
                profile
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "malformed profile, using defaults"
                );
                Profile::default()
            }
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

        // Write next to the target and rename so a crash never leaves half a file
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write profile to {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to move profile into {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LeaderboardEntry;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("scores.json"));

        assert_eq!(store.load(), Profile::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");
        let mut store = JsonFileStore::new(&path);

        let mut profile = Profile {
            username: Some("ana".to_string()),
            current_score: 4,
            highest_score: 9,
            ..Default::default()
        };
        profile.leaderboard.record(LeaderboardEntry::new("ana", 9));

        store.save(&profile).unwrap();

        assert!(path.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(JsonFileStore::new(&path).load(), profile);
    }

    #[test]
    fn test_malformed_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(JsonFileStore::new(&path).load(), Profile::default());
    }

    #[test]
    fn test_wrong_types_load_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        fs::write(&path, r#"{"highestScore":"lots"}"#).unwrap();

        assert_eq!(JsonFileStore::new(&path).load(), Profile::default());
    }

    #[test]
    fn test_unsorted_leaderboard_is_sorted_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        fs::write(
            &path,
            r#"{"leaderboard":[{"name":"a","score":1},{"name":"b","score":6}]}"#,
        )
        .unwrap();

        let profile = JsonFileStore::new(&path).load();
        assert_eq!(profile.leaderboard.entries()[0].name, "b");
    }
}
