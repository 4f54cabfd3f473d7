//! Ledger report formatting
//!
//! Renders the ledger as two aligned tables, uploads first and rehosts
//! second. Column widths are computed from the data, with a floor at the
//! header width.

use crate::ledger::{BackupEntry, Ledger};

/// Minimum width of the note column
const NOTE_FLOOR: usize = 4;

/// Format the full two-section ledger report
pub fn format_ledger(ledger: &Ledger) -> String {
    let mut output = String::new();
    output.push_str("UPLOADS\n");
    output.push_str(&format_uploads(&ledger.backups));
    output.push_str("\nREHOSTS\n");
    output.push_str(&format_rehosts(&ledger.rehosts));
    output
}

/// Format the uploads table: note, hash, decryption key
pub fn format_uploads(entries: &[BackupEntry]) -> String {
    if entries.is_empty() {
        return "  (none)\n".to_string();
    }

    let note_width = column_width(entries, |e| &e.note);
    let hash_width = column_width(entries, |e| &e.hash);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<note_width$}  {:<hash_width$}  {}\n",
        "Note",
        "Hash",
        "Decryption key",
        note_width = note_width,
        hash_width = hash_width,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<note_width$}  {:<hash_width$}  {}\n",
            entry.note,
            entry.hash,
            entry.key,
            note_width = note_width,
            hash_width = hash_width,
        ));
    }

    output
}

/// Format the rehosts table: note and hash only (rehosts carry no key)
pub fn format_rehosts(entries: &[BackupEntry]) -> String {
    if entries.is_empty() {
        return "  (none)\n".to_string();
    }

    let note_width = column_width(entries, |e| &e.note);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<note_width$}  {}\n",
        "Note",
        "Hash",
        note_width = note_width,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<note_width$}  {}\n",
            entry.note,
            entry.hash,
            note_width = note_width,
        ));
    }

    output
}

fn column_width<'a, F>(entries: &'a [BackupEntry], field: F) -> usize
where
    F: Fn(&'a BackupEntry) -> &'a str,
{
    entries
        .iter()
        .map(|e| field(e).len())
        .max()
        .unwrap_or(NOTE_FLOOR)
        .max(NOTE_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.record_upload(BackupEntry::upload("QmAbc123", "c2VjcmV0", "weekly"));
        ledger.record_upload(BackupEntry::upload("QmDef456", "b3RoZXI=", ""));
        ledger.record_rehost(BackupEntry::rehost("QmGhi789", "for a friend"));
        ledger
    }

    #[test]
    fn test_report_has_both_sections_in_order() {
        let report = format_ledger(&sample_ledger());
        let uploads_at = report.find("UPLOADS").unwrap();
        let rehosts_at = report.find("REHOSTS").unwrap();
        assert!(uploads_at < rehosts_at);
    }

    #[test]
    fn test_uploads_rows_align() {
        let report = format_uploads(&sample_ledger().backups);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);

        // Hash column starts at the same offset on every row
        let offset = lines[0].find("Hash").unwrap();
        assert_eq!(&lines[1][offset..offset + 2], "Qm");
        assert_eq!(&lines[2][offset..offset + 2], "Qm");
    }

    #[test]
    fn test_rehosts_have_no_key_column() {
        let report = format_rehosts(&sample_ledger().rehosts);
        assert!(report.contains("Hash"));
        assert!(!report.contains("Decryption key"));
    }

    #[test]
    fn test_empty_sections_say_none() {
        let report = format_ledger(&Ledger::default());
        assert_eq!(report.matches("(none)").count(), 2);
    }
}
