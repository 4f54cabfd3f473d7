//! CLI command handlers
//!
//! Bridges clap argument parsing to the pipeline. The upload and rehost
//! handlers always print the resulting hash (and key) before reporting a
//! failed ledger save: a key that only exists in memory is gone for good if
//! the process exits without showing it.

use std::path::Path;

use crate::display;
use crate::error::SeachestResult;
use crate::ledger::Ledger;
use crate::pipeline::Pipeline;

/// Run the upload pipeline and report the new entry
pub fn handle_upload(
    pipeline: &Pipeline,
    ledger: &mut Ledger,
    directory: &Path,
    note: &str,
) -> SeachestResult<()> {
    let receipt = pipeline.upload(ledger, directory, note)?;

    println!();
    println!("hash: {}", receipt.entry.hash);
    println!("key:  {}", receipt.entry.key);

    if let Some(err) = receipt.save_error {
        eprintln!("warning: backup uploaded but the ledger could not be saved: {}", err);
        eprintln!("warning: copy the hash and key above somewhere safe");
    }

    Ok(())
}

/// Run the download pipeline
pub fn handle_download(
    pipeline: &Pipeline,
    destination: &Path,
    hash: &str,
    key: &str,
) -> SeachestResult<()> {
    pipeline.download(destination, hash, key)?;
    println!("restored {} into {}", hash, destination.display());
    Ok(())
}

/// Pin existing content and report the new rehost entry
pub fn handle_rehost(
    pipeline: &Pipeline,
    ledger: &mut Ledger,
    hash: &str,
    note: &str,
) -> SeachestResult<()> {
    let receipt = pipeline.rehost(ledger, hash, note)?;

    println!("rehosting {}", receipt.entry.hash);

    if let Some(err) = receipt.save_error {
        eprintln!("warning: content pinned but the ledger could not be saved: {}", err);
    }

    Ok(())
}

/// Print the two-section ledger report
pub fn handle_list(ledger: &Ledger) {
    print!("{}", display::format_ledger(ledger));
}
