//! Content-addressed storage backends
//!
//! A store publishes a local file and returns an opaque content identifier,
//! fetches content by identifier into a directory, and pins (re-hosts)
//! already-published content without re-uploading it. The fetched file is
//! always named after its identifier inside the destination directory.
//!
//! Two backends are provided:
//!
//! - `IpfsStore`: drives the `ipfs` CLI (requires a running daemon)
//! - `LocalStore`: a sha256-addressed blob directory, no network

pub mod ipfs;
pub mod local;

use std::path::{Path, PathBuf};

use crate::config::settings::{Settings, StoreBackend};
use crate::config::SeachestPaths;
use crate::error::SeachestResult;

pub use ipfs::IpfsStore;
pub use local::LocalStore;

/// The storage collaborator contract
pub trait ContentStore {
    /// Publish a local file, returning its content identifier
    fn publish(&self, file: &Path) -> SeachestResult<String>;

    /// Fetch content by identifier into `dest_dir`; the fetched file is
    /// named `<dest_dir>/<hash>` and its path is returned
    fn fetch(&self, hash: &str, dest_dir: &Path) -> SeachestResult<PathBuf>;

    /// Pin existing content by identifier, without re-uploading
    fn pin(&self, hash: &str) -> SeachestResult<()>;
}

/// Build the store selected by the user's settings
pub fn from_settings(settings: &Settings, paths: &SeachestPaths) -> Box<dyn ContentStore> {
    match settings.store {
        StoreBackend::Ipfs => Box::new(IpfsStore::new(settings.ipfs_bin.clone())),
        StoreBackend::Local => Box::new(LocalStore::new(paths.local_store_dir())),
    }
}
