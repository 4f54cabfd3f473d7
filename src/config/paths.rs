//! Path management for seachest
//!
//! Provides XDG-compliant path resolution for the ledger, settings, and
//! scratch files.
//!
//! ## Path Resolution Order
//!
//! 1. `SEACHEST_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/seachest` or `~/.config/seachest`
//! 3. Windows: `%APPDATA%\seachest`

use std::path::PathBuf;

use crate::error::SeachestError;

/// Manages all paths used by seachest
#[derive(Debug, Clone)]
pub struct SeachestPaths {
    /// Base directory for all seachest data
    base_dir: PathBuf,
}

impl SeachestPaths {
    /// Create a new SeachestPaths instance
    ///
    /// Path resolution:
    /// 1. `SEACHEST_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/seachest` or `~/.config/seachest`
    /// 3. Windows: `%APPDATA%\seachest`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SeachestError> {
        let base_dir = if let Ok(custom) = std::env::var("SEACHEST_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SeachestPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/seachest/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the ledger file
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.json")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path for the temporary archive built during an upload
    pub fn scratch_archive(&self) -> PathBuf {
        self.base_dir.join("seachest.tar.zst")
    }

    /// Get the root directory of the local content-addressed store
    pub fn local_store_dir(&self) -> PathBuf {
        self.base_dir.join("store")
    }

    /// Ensure the base directory exists, owner-only
    ///
    /// The ledger stores decryption keys, so the directory is created with
    /// mode 0700 on Unix.
    pub fn ensure_directories(&self) -> Result<(), SeachestError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SeachestError::Config(format!("Failed to create base directory: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.base_dir, std::fs::Permissions::from_mode(0o700))
                .map_err(|e| {
                    SeachestError::Config(format!("Failed to set directory permissions: {}", e))
                })?;
        }

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SeachestError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("seachest"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SeachestError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SeachestError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("seachest"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeachestPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_file(), temp_dir.path().join("ledger.json"));
        assert_eq!(paths.local_store_dir(), temp_dir.path().join("store"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        // Set the env var
        env::set_var("SEACHEST_DATA_DIR", custom_path);

        let paths = SeachestPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        // Clean up
        env::remove_var("SEACHEST_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("seachest");
        let paths = SeachestPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        assert!(base.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_base_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("seachest");
        let paths = SeachestPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        let mode = std::fs::metadata(&base).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
