//! Configuration module for seachest
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SeachestPaths;
pub use settings::Settings;
