//! The seachest ledger
//!
//! The ledger is the persisted record of past uploads and rehosts. It is the
//! only place a backup's decryption key is stored: lose the ledger entry and
//! the published content is unrecoverable.
//!
//! On disk the ledger is one pretty-printed JSON object with two keys,
//! `backups` and `rehosts`, each an append-ordered list of
//! `{Hash, Key, Note}` records. The field casing matches the ledger files
//! written by earlier versions of the tool.

pub mod store;

use serde::{Deserialize, Serialize};

/// One completed upload or rehost event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// Content identifier returned by the store; immutable once created
    #[serde(rename = "Hash")]
    pub hash: String,

    /// Base64-encoded decryption key; empty for rehost entries
    #[serde(rename = "Key")]
    pub key: String,

    /// Free-text user annotation
    #[serde(rename = "Note", default)]
    pub note: String,
}

impl BackupEntry {
    /// Create an upload entry
    pub fn upload(hash: impl Into<String>, key: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            key: key.into(),
            note: note.into(),
        }
    }

    /// Create a rehost entry; the key is always empty since no new
    /// encryption is performed
    pub fn rehost(hash: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            key: String::new(),
            note: note.into(),
        }
    }
}

/// The full ledger: uploads and rehosts, each in append order
///
/// There is no uniqueness constraint on hashes. Uploading the same directory
/// twice produces two entries (encryption randomizes the ciphertext), and a
/// rehost may duplicate an existing hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ledger {
    /// Fresh uploads, in call order
    #[serde(default)]
    pub backups: Vec<BackupEntry>,

    /// Re-pinned existing content, in call order
    #[serde(default)]
    pub rehosts: Vec<BackupEntry>,
}

impl Ledger {
    /// Append a fresh upload to the backups list
    pub fn record_upload(&mut self, entry: BackupEntry) {
        self.backups.push(entry);
    }

    /// Append a rehost, forcing the key empty regardless of input
    pub fn record_rehost(&mut self, mut entry: BackupEntry) {
        entry.key.clear();
        self.rehosts.push(entry);
    }

    /// True if neither list has any entries
    pub fn is_empty(&self) -> bool {
        self.backups.is_empty() && self.rehosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_upload_appends_in_order() {
        let mut ledger = Ledger::default();
        ledger.record_upload(BackupEntry::upload("h1", "k1", "first"));
        ledger.record_upload(BackupEntry::upload("h2", "k2", "second"));

        assert_eq!(ledger.backups.len(), 2);
        assert_eq!(ledger.backups[0].hash, "h1");
        assert_eq!(ledger.backups[1].hash, "h2");
        assert!(ledger.rehosts.is_empty());
    }

    #[test]
    fn test_record_rehost_never_stores_a_key() {
        let mut ledger = Ledger::default();
        ledger.record_rehost(BackupEntry {
            hash: "h1".into(),
            key: "should-be-dropped".into(),
            note: "seeding".into(),
        });

        assert_eq!(ledger.rehosts.len(), 1);
        assert_eq!(ledger.rehosts[0].key, "");
        assert_eq!(ledger.rehosts[0].note, "seeding");
    }

    #[test]
    fn test_duplicate_hashes_are_allowed() {
        let mut ledger = Ledger::default();
        ledger.record_rehost(BackupEntry::rehost("same", ""));
        ledger.record_rehost(BackupEntry::rehost("same", ""));
        assert_eq!(ledger.rehosts.len(), 2);
    }

    #[test]
    fn test_serde_field_names() {
        let entry = BackupEntry::upload("Qm123", "a2V5", "weekly");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Hash"], "Qm123");
        assert_eq!(json["Key"], "a2V5");
        assert_eq!(json["Note"], "weekly");
    }

    #[test]
    fn test_missing_note_defaults_empty() {
        let entry: BackupEntry =
            serde_json::from_str(r#"{"Hash": "Qm123", "Key": ""}"#).unwrap();
        assert_eq!(entry.note, "");
    }
}
