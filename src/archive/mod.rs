//! Directory pack/unpack
//!
//! Packs a directory into a zstd-compressed tarball and unpacks it again.
//! Entry paths inside the archive are relative to the packed directory, so
//! unpacking reproduces the directory's contents under the destination.

use std::fs::File;
use std::path::Path;

use crate::error::SeachestError;

/// zstd compression level for backup archives
const COMPRESSION_LEVEL: i32 = 3;

/// Pack the contents of `source_dir` into a `.tar.zst` file at `dest_file`
pub fn pack(source_dir: &Path, dest_file: &Path) -> Result<(), SeachestError> {
    if !source_dir.is_dir() {
        return Err(SeachestError::Archive(format!(
            "Not a directory: {}",
            source_dir.display()
        )));
    }

    let file = File::create(dest_file).map_err(|e| {
        SeachestError::Archive(format!("Failed to create {}: {}", dest_file.display(), e))
    })?;

    let encoder = zstd::stream::Encoder::new(file, COMPRESSION_LEVEL)
        .map_err(|e| SeachestError::Archive(format!("Failed to start compressor: {}", e)))?;

    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(".", source_dir).map_err(|e| {
        SeachestError::Archive(format!("Failed to pack {}: {}", source_dir.display(), e))
    })?;

    let encoder = builder
        .into_inner()
        .map_err(|e| SeachestError::Archive(format!("Failed to finish archive: {}", e)))?;

    encoder
        .finish()
        .map_err(|e| SeachestError::Archive(format!("Failed to finish compression: {}", e)))?;

    Ok(())
}

/// Unpack a `.tar.zst` archive into `dest_dir`
pub fn unpack(archive_file: &Path, dest_dir: &Path) -> Result<(), SeachestError> {
    let file = File::open(archive_file).map_err(|e| {
        SeachestError::Archive(format!("Failed to open {}: {}", archive_file.display(), e))
    })?;

    let decoder = zstd::stream::Decoder::new(file)
        .map_err(|e| SeachestError::Archive(format!("Failed to start decompressor: {}", e)))?;

    let mut archive = tar::Archive::new(decoder);
    archive.unpack(dest_dir).map_err(|e| {
        SeachestError::Archive(format!("Failed to unpack into {}: {}", dest_dir.display(), e))
    })?;

    Ok(())
}
