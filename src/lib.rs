//! seachest - Encrypted directory backups on content-addressed storage
//!
//! This library provides the core functionality for the seachest backup
//! tool. A backup packs a directory into a compressed tarball, encrypts it
//! with a freshly generated key, publishes the ciphertext to a
//! content-addressed store, and records the resulting content hash plus
//! decryption key in a local ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `ledger`: The persisted record of uploads and rehosts
//! - `archive`: Directory pack/unpack (tar + zstd)
//! - `crypto`: AES-256-GCM file encryption
//! - `store`: Content-addressed storage backends
//! - `pipeline`: Upload/download/rehost orchestration
//! - `display`: Ledger report formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use seachest::config::{paths::SeachestPaths, settings::Settings};
//!
//! let paths = SeachestPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod store;

pub use error::{SeachestError, SeachestResult};
