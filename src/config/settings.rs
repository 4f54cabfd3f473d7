//! User settings for seachest
//!
//! Manages the storage backend selection and the name of the ipfs binary
//! used by the ipfs backend.

use serde::{Deserialize, Serialize};

use super::paths::SeachestPaths;
use crate::error::SeachestError;

/// Which content-addressed store backs publish/fetch/pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// The ipfs CLI (requires a running daemon)
    #[default]
    Ipfs,
    /// A local content-addressed blob directory (no network)
    Local,
}

/// User settings for seachest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Storage backend used for publish/fetch/pin
    #[serde(default)]
    pub store: StoreBackend,

    /// Name or path of the ipfs binary
    #[serde(default = "default_ipfs_bin")]
    pub ipfs_bin: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_ipfs_bin() -> String {
    "ipfs".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store: StoreBackend::default(),
            ipfs_bin: default_ipfs_bin(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file
    /// doesn't exist
    pub fn load_or_create(paths: &SeachestPaths) -> Result<Self, SeachestError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let data = std::fs::read_to_string(&settings_path)
                .map_err(|e| SeachestError::Config(format!("Failed to read settings: {}", e)))?;
            serde_json::from_str(&data)
                .map_err(|e| SeachestError::Config(format!("Failed to parse settings: {}", e)))
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SeachestPaths) -> Result<(), SeachestError> {
        paths.ensure_directories()?;

        let data = serde_json::to_string_pretty(self)
            .map_err(|e| SeachestError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), data)
            .map_err(|e| SeachestError::Config(format!("Failed to write settings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.store, StoreBackend::Ipfs);
        assert_eq!(settings.ipfs_bin, "ipfs");
    }

    #[test]
    fn test_load_or_create_bootstraps_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeachestPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(!paths.settings_file().exists());
        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());
        assert_eq!(settings.store, StoreBackend::Ipfs);
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeachestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.store = StoreBackend::Local;
        settings.ipfs_bin = "/usr/local/bin/ipfs".to_string();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.store, StoreBackend::Local);
        assert_eq!(loaded.ipfs_bin, "/usr/local/bin/ipfs");
    }

    #[test]
    fn test_malformed_settings_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeachestPaths::with_base_dir(temp_dir.path().to_path_buf());

        std::fs::create_dir_all(paths.base_dir()).unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(Settings::load_or_create(&paths).is_err());
    }
}
