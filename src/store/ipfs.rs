//! IPFS-backed content store
//!
//! Drives the `ipfs` CLI as a subprocess: `ipfs add -Q` to publish,
//! `ipfs get -o` to fetch, `ipfs pin add` to pin. Requires a running ipfs
//! daemon; any non-zero exit is surfaced with the command's stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{SeachestError, SeachestResult};
use crate::store::ContentStore;

/// Content store backed by the `ipfs` command-line client
#[derive(Debug, Clone)]
pub struct IpfsStore {
    /// Name or path of the ipfs binary
    bin: String,
}

impl IpfsStore {
    /// Create a store driving the given ipfs binary
    pub fn new(bin: String) -> Self {
        Self { bin }
    }

    /// Run an ipfs subcommand, returning trimmed stdout on success
    fn run(&self, args: &[&str]) -> SeachestResult<String> {
        let output = Command::new(&self.bin).args(args).output().map_err(|e| {
            SeachestError::Storage(format!("Failed to run {}: {}", self.bin, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeachestError::Storage(format!(
                "{} {} failed ({}): {}",
                self.bin,
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl ContentStore for IpfsStore {
    fn publish(&self, file: &Path) -> SeachestResult<String> {
        let file = file.to_str().ok_or_else(|| {
            SeachestError::Storage(format!("Non-UTF-8 path: {}", file.display()))
        })?;

        // -Q prints only the final hash
        let hash = self.run(&["add", "-Q", file])?;
        if hash.is_empty() {
            return Err(SeachestError::Storage(
                "ipfs add returned an empty hash".to_string(),
            ));
        }
        Ok(hash)
    }

    fn fetch(&self, hash: &str, dest_dir: &Path) -> SeachestResult<PathBuf> {
        let dest = dest_dir.join(hash);
        let dest_str = dest.to_str().ok_or_else(|| {
            SeachestError::Storage(format!("Non-UTF-8 path: {}", dest.display()))
        })?;

        self.run(&["get", hash, "-o", dest_str])?;
        Ok(dest)
    }

    fn pin(&self, hash: &str) -> SeachestResult<()> {
        self.run(&["pin", "add", hash])?;
        Ok(())
    }
}
