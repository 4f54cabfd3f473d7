//! Ledger persistence with atomic writes
//!
//! The ledger holds decryption keys, so the file and its containing
//! directory are owner-only. Saves write to a temp file and rename over the
//! original so a crash mid-write can't corrupt the ledger.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::SeachestError;
use crate::ledger::Ledger;

/// Load the ledger from `path`
///
/// If the file does not exist, the parent directory (mode 0700 on Unix) and
/// an empty ledger file are created and an empty ledger is returned. A file
/// that exists but does not parse is a fatal error: a corrupt ledger must
/// never be silently discarded, because it is the only copy of the keys.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Ledger, SeachestError> {
    let path = path.as_ref();

    if !path.exists() {
        let ledger = Ledger::default();
        save(&ledger, path)?;
        return Ok(ledger);
    }

    let file = File::open(path)
        .map_err(|e| SeachestError::Ledger(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SeachestError::Ledger(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Save the ledger to `path` atomically (write to temp, then rename)
pub fn save<P: AsRef<Path>>(ledger: &Ledger, path: P) -> Result<(), SeachestError> {
    let path = path.as_ref();

    // Ensure parent directory exists, owner-only
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SeachestError::Ledger(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700)).map_err(|e| {
                SeachestError::Ledger(format!("Failed to set directory permissions: {}", e))
            })?;
        }
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SeachestError::Ledger(format!("Failed to create temp file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| SeachestError::Ledger(format!("Failed to set file permissions: {}", e)))?;
    }

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, ledger)
        .map_err(|e| SeachestError::Ledger(format!("Failed to serialize ledger: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SeachestError::Ledger(format!("Failed to flush ledger: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SeachestError::Ledger(format!("Failed to sync ledger: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        SeachestError::Ledger(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
