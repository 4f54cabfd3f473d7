//! AES-256-GCM file encryption
//!
//! Each upload gets a freshly generated 256-bit key; the key is returned to
//! the caller base64-encoded and is stored nowhere else but the ledger. The
//! encrypted artifact is `nonce || ciphertext`, where the ciphertext carries
//! the GCM authentication tag, so decryption with a wrong key or a tampered
//! file fails with an authentication error rather than producing garbage.

use std::fs;
use std::path::{Path, PathBuf};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{SeachestError, SeachestResult};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the AES-256 key in bytes
const KEY_SIZE: usize = 32;

/// Extension appended to the archive path for the encrypted artifact
const ENCRYPTED_EXT: &str = "enc";

/// Generate a fresh random key, base64-encoded
pub fn generate_key() -> String {
    let mut key_bytes = [0u8; KEY_SIZE];
    OsRng.fill_bytes(&mut key_bytes);
    STANDARD.encode(key_bytes)
}

/// Decode a base64 key into raw bytes, validating its length
fn decode_key(key: &str) -> SeachestResult<Vec<u8>> {
    let bytes = STANDARD
        .decode(key)
        .map_err(|e| SeachestError::Encryption(format!("Invalid key encoding: {}", e)))?;
    if bytes.len() != KEY_SIZE {
        return Err(SeachestError::Encryption(format!(
            "Invalid key size: expected {} bytes, got {}",
            KEY_SIZE,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encrypt the file at `path` with a freshly generated key
///
/// Returns the base64-encoded key and the path of the encrypted artifact
/// (`<path>.enc`). The plaintext file is removed on success.
pub fn encrypt_file(path: &Path) -> SeachestResult<(String, PathBuf)> {
    let key = generate_key();
    let key_bytes = decode_key(&key)?;

    let plaintext = fs::read(path)
        .map_err(|e| SeachestError::Encryption(format!("Failed to read {}: {}", path.display(), e)))?;

    let cipher = Aes256Gcm::new_from_slice(&key_bytes)
        .map_err(|e| SeachestError::Encryption(format!("Failed to create cipher: {}", e)))?;

    // Generate random nonce
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_ref())
        .map_err(|e| SeachestError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut artifact = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    artifact.extend_from_slice(&nonce_bytes);
    artifact.extend_from_slice(&ciphertext);

    let out_path = encrypted_path(path);
    fs::write(&out_path, artifact).map_err(|e| {
        SeachestError::Encryption(format!("Failed to write {}: {}", out_path.display(), e))
    })?;

    // Plaintext archive is no longer needed
    let _ = fs::remove_file(path);

    Ok((key, out_path))
}

/// Decrypt the file at `path` with a base64-encoded key, writing the
/// plaintext to `out_path`
///
/// A wrong key or corrupted ciphertext fails GCM authentication and is
/// reported as an `Encryption` error; no output file is written in that
/// case.
pub fn decrypt_file(path: &Path, key: &str, out_path: &Path) -> SeachestResult<()> {
    let key_bytes = decode_key(key)?;

    let artifact = fs::read(path)
        .map_err(|e| SeachestError::Encryption(format!("Failed to read {}: {}", path.display(), e)))?;

    if artifact.len() < NONCE_SIZE {
        return Err(SeachestError::Encryption(format!(
            "Ciphertext too short: {} bytes",
            artifact.len()
        )));
    }
    let (nonce_bytes, ciphertext) = artifact.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(&key_bytes)
        .map_err(|e| SeachestError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher.decrypt(nonce, ciphertext).map_err(|_| {
        SeachestError::Encryption("Decryption failed: invalid key or corrupted data".to_string())
    })?;

    fs::write(out_path, plaintext).map_err(|e| {
        SeachestError::Encryption(format!("Failed to write {}: {}", out_path.display(), e))
    })?;

    Ok(())
}

/// The path of the encrypted artifact for a given plaintext path
pub fn encrypted_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ENCRYPTED_EXT);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("archive.tar.zst");
        fs::write(&path, b"pretend this is a tarball").unwrap();

        let (key, enc_path) = encrypt_file(&path).unwrap();
        assert_eq!(enc_path, temp_dir.path().join("archive.tar.zst.enc"));
        assert!(!path.exists());

        let out = temp_dir.path().join("restored.tar.zst");
        decrypt_file(&enc_path, &key, &out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), b"pretend this is a tarball");
    }

    #[test]
    fn test_each_upload_gets_a_distinct_key() {
        assert_ne!(generate_key(), generate_key());
    }

    #[test]
    fn test_wrong_key_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data");
        fs::write(&path, b"secret bytes").unwrap();

        let (_key, enc_path) = encrypt_file(&path).unwrap();
        let wrong = generate_key();

        let out = temp_dir.path().join("out");
        let result = decrypt_file(&enc_path, &wrong, &out);
        assert!(matches!(result, Err(SeachestError::Encryption(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data");
        fs::write(&path, b"secret bytes").unwrap();

        let (key, enc_path) = encrypt_file(&path).unwrap();

        // Flip a byte past the nonce
        let mut artifact = fs::read(&enc_path).unwrap();
        let last = artifact.len() - 1;
        artifact[last] ^= 0xFF;
        fs::write(&enc_path, artifact).unwrap();

        let out = temp_dir.path().join("out");
        assert!(matches!(
            decrypt_file(&enc_path, &key, &out),
            Err(SeachestError::Encryption(_))
        ));
    }

    #[test]
    fn test_malformed_key_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let enc = temp_dir.path().join("enc");
        fs::write(&enc, vec![0u8; 64]).unwrap();

        let out = temp_dir.path().join("out");
        assert!(decrypt_file(&enc, "not base64!!!", &out).is_err());
        assert!(decrypt_file(&enc, &STANDARD.encode(b"short"), &out).is_err());
    }

    #[test]
    fn test_in_place_decrypt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data");
        fs::write(&path, b"round and round").unwrap();

        let (key, enc_path) = encrypt_file(&path).unwrap();
        // Decrypting over the ciphertext path is how download works
        decrypt_file(&enc_path, &key, &enc_path).unwrap();
        assert_eq!(fs::read(&enc_path).unwrap(), b"round and round");
    }
}
