//! Upload/download/rehost orchestration
//!
//! The pipeline wires the three collaborators together, strictly in
//! sequence: pack -> encrypt -> publish for upload, fetch -> decrypt ->
//! unpack for download. A collaborator failure aborts the command
//! immediately and leaves the ledger untouched; there are no retries.
//!
//! Ledger saves are the one non-fatal failure: by the time a save can fail
//! the upload has already succeeded, so the receipt carries the entry plus
//! any save error and the caller must show the hash and key to the user
//! regardless.

use std::fs;
use std::path::Path;

use crate::archive;
use crate::config::SeachestPaths;
use crate::crypto;
use crate::error::{SeachestError, SeachestResult};
use crate::ledger::{self, BackupEntry, Ledger};
use crate::store::ContentStore;

/// Result of a successful upload or rehost
///
/// `save_error` is set when the pipeline succeeded but the ledger could not
/// be written. The entry only exists in memory at that point.
#[derive(Debug)]
pub struct Receipt {
    /// The entry appended to the ledger
    pub entry: BackupEntry,
    /// Set if persisting the ledger failed after the entry was appended
    pub save_error: Option<SeachestError>,
}

/// Orchestrates the backup pipeline against a chosen content store
pub struct Pipeline<'a> {
    paths: &'a SeachestPaths,
    store: &'a dyn ContentStore,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline using the given paths and content store
    pub fn new(paths: &'a SeachestPaths, store: &'a dyn ContentStore) -> Self {
        Self { paths, store }
    }

    /// Pack, encrypt, and publish `source`, then record the result
    ///
    /// Any failure before the ledger append aborts without mutating the
    /// ledger; no partial entry is ever persisted. Temporary artifacts in
    /// the base directory are cleaned up best-effort.
    pub fn upload(
        &self,
        ledger: &mut Ledger,
        source: &Path,
        note: &str,
    ) -> SeachestResult<Receipt> {
        self.paths.ensure_directories()?;

        let tarball = self.paths.scratch_archive();
        println!("packing {}", source.display());
        archive::pack(source, &tarball)?;

        println!("encrypting archive");
        let (key, encrypted) = match crypto::encrypt_file(&tarball) {
            Ok(result) => result,
            Err(e) => {
                let _ = fs::remove_file(&tarball);
                return Err(e);
            }
        };

        println!("publishing to content store");
        let published = self.store.publish(&encrypted);
        let _ = fs::remove_file(&encrypted);
        let hash = published?;

        let entry = BackupEntry::upload(hash, key, note);
        ledger.record_upload(entry.clone());
        let save_error = ledger::store::save(ledger, self.paths.ledger_file()).err();

        Ok(Receipt { entry, save_error })
    }

    /// Fetch, decrypt, and unpack `hash` into `dest`
    ///
    /// The fetched file is named `<dest>/<hash>`; it is decrypted in place,
    /// unpacked, and then removed. A wrong key fails authentication at the
    /// decrypt stage and nothing is unpacked. The ledger is never mutated
    /// by a download, and partially fetched files are left in place on
    /// failure for the user to inspect or remove.
    pub fn download(&self, dest: &Path, hash: &str, key: &str) -> SeachestResult<()> {
        fs::create_dir_all(dest).map_err(|e| {
            SeachestError::Storage(format!("Failed to create {}: {}", dest.display(), e))
        })?;

        println!("fetching {}", hash);
        let fetched = self.store.fetch(hash, dest)?;

        println!("decrypting archive");
        crypto::decrypt_file(&fetched, key, &fetched)?;

        println!("unpacking into {}", dest.display());
        archive::unpack(&fetched, dest)?;

        // The unpacked tree is what the user wanted; drop the intermediate
        let _ = fs::remove_file(&fetched);

        Ok(())
    }

    /// Pin already-published content and record the rehost
    ///
    /// No re-upload and no re-encryption happen; the recorded entry always
    /// has an empty key.
    pub fn rehost(&self, ledger: &mut Ledger, hash: &str, note: &str) -> SeachestResult<Receipt> {
        self.store.pin(hash)?;

        let entry = BackupEntry::rehost(hash, note);
        ledger.record_rehost(entry.clone());
        let save_error = ledger::store::save(ledger, self.paths.ledger_file()).err();

        Ok(Receipt { entry, save_error })
    }
}
