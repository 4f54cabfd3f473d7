//! Local content-addressed blob store
//!
//! Stores blobs under `<root>/` named by the sha256 of their contents and
//! keeps pins as marker files under `<root>/pins/`. Useful for offline
//! operation and for exercising the pipeline without an ipfs daemon; the
//! hash is deterministic for identical bytes, like any content-addressed
//! store.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{SeachestError, SeachestResult};
use crate::store::ContentStore;

/// Content store backed by a directory of sha256-named blobs
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root` (created lazily on first publish)
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn blob_path(&self, hash: &str) -> PathBuf {
        self.root.join(hash)
    }

    fn pin_path(&self, hash: &str) -> PathBuf {
        self.root.join("pins").join(hash)
    }
}

impl ContentStore for LocalStore {
    fn publish(&self, file: &Path) -> SeachestResult<String> {
        let contents = fs::read(file).map_err(|e| {
            SeachestError::Storage(format!("Failed to read {}: {}", file.display(), e))
        })?;

        let hash = hex::encode(Sha256::digest(&contents));

        fs::create_dir_all(&self.root).map_err(|e| {
            SeachestError::Storage(format!("Failed to create store directory: {}", e))
        })?;

        let blob = self.blob_path(&hash);
        fs::write(&blob, contents).map_err(|e| {
            SeachestError::Storage(format!("Failed to write {}: {}", blob.display(), e))
        })?;

        Ok(hash)
    }

    fn fetch(&self, hash: &str, dest_dir: &Path) -> SeachestResult<PathBuf> {
        let blob = self.blob_path(hash);
        if !blob.exists() {
            return Err(SeachestError::Storage(format!(
                "No such content: {}",
                hash
            )));
        }

        let dest = dest_dir.join(hash);
        fs::copy(&blob, &dest).map_err(|e| {
            SeachestError::Storage(format!("Failed to fetch into {}: {}", dest.display(), e))
        })?;

        Ok(dest)
    }

    fn pin(&self, hash: &str) -> SeachestResult<()> {
        if !self.blob_path(hash).exists() {
            return Err(SeachestError::Storage(format!(
                "No such content: {}",
                hash
            )));
        }

        let pin = self.pin_path(hash);
        fs::create_dir_all(pin.parent().expect("pin path has a parent")).map_err(|e| {
            SeachestError::Storage(format!("Failed to create pins directory: {}", e))
        })?;
        fs::write(&pin, b"").map_err(|e| {
            SeachestError::Storage(format!("Failed to pin {}: {}", hash, e))
        })?;

        Ok(())
    }
}
