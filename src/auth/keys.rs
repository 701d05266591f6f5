//! Key Material Provider
//! Mission: Load or generate the Ed25519 keypair used to sign tokens
//!
//! The private key is persisted as PKCS#8 DER, the public key as the raw
//! 32 bytes in base64url, so both files feed straight into `jsonwebtoken`.
//! Generation runs once; subsequent restarts load the same material.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::SigningKey;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::RngCore;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Key material failures. All of them are fatal at service start-up: the
/// service cannot issue or validate a single token without its keypair.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key path is empty")]
    EmptyPath,
    #[error("failed to read or write key material: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode private key: {0}")]
    Pkcs8(String),
    #[error("invalid private key material: {0}")]
    BadPrivateKey(String),
    #[error("invalid key material: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Signing keypair, loaded once and shared read-only by every request task.
pub struct KeyPair {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

/// Load the keypair from the two given paths, generating and persisting a
/// fresh one when either file is missing. Idempotent across restarts.
pub fn load_or_generate(private_path: &str, public_path: &str) -> Result<KeyPair, KeyError> {
    if private_path.is_empty() || public_path.is_empty() {
        return Err(KeyError::EmptyPath);
    }

    if !Path::new(private_path).exists() || !Path::new(public_path).exists() {
        generate(private_path, public_path)?;
    }

    let private_der = fs::read(private_path)?;
    let public_b64 = fs::read_to_string(public_path)?;

    // `EncodingKey::from_ed_der` accepts any bytes; parse the DER here so a
    // corrupt private key is fatal at construction, not a per-request
    // signing failure later.
    SigningKey::from_pkcs8_der(&private_der)
        .map_err(|e| KeyError::BadPrivateKey(e.to_string()))?;

    let encoding = EncodingKey::from_ed_der(&private_der);
    let decoding = DecodingKey::from_ed_components(public_b64.trim())?;

    Ok(KeyPair { encoding, decoding })
}

fn generate(private_path: &str, public_path: &str) -> Result<(), KeyError> {
    let mut seed = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    let signing_key = SigningKey::from_bytes(&seed);

    let der = signing_key
        .to_pkcs8_der()
        .map_err(|e| KeyError::Pkcs8(e.to_string()))?;
    fs::write(private_path, der.as_bytes())?;

    let public_b64 = URL_SAFE_NO_PAD.encode(signing_key.verifying_key().to_bytes());
    fs::write(public_path, public_b64)?;

    info!(private_path, public_path, "🔑 Generated new signing keypair");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key_paths(dir: &TempDir) -> (String, String) {
        (
            dir.path().join("privkey.der").to_str().unwrap().to_string(),
            dir.path().join("pubkey.b64").to_str().unwrap().to_string(),
        )
    }

    #[test]
    fn test_generates_both_files_when_missing() {
        let dir = TempDir::new().unwrap();
        let (private_path, public_path) = key_paths(&dir);

        load_or_generate(&private_path, &public_path).unwrap();

        assert!(Path::new(&private_path).exists());
        assert!(Path::new(&public_path).exists());
    }

    #[test]
    fn test_reload_keeps_existing_material() {
        let dir = TempDir::new().unwrap();
        let (private_path, public_path) = key_paths(&dir);

        load_or_generate(&private_path, &public_path).unwrap();
        let first_private = fs::read(&private_path).unwrap();
        let first_public = fs::read(&public_path).unwrap();

        load_or_generate(&private_path, &public_path).unwrap();
        assert_eq!(fs::read(&private_path).unwrap(), first_private);
        assert_eq!(fs::read(&public_path).unwrap(), first_public);
    }

    #[test]
    fn test_empty_paths_rejected() {
        let result = load_or_generate("", "");
        assert!(matches!(result, Err(KeyError::EmptyPath)));
    }

    #[test]
    fn test_corrupt_private_key_rejected_at_load() {
        let dir = TempDir::new().unwrap();
        let (private_path, public_path) = key_paths(&dir);
        load_or_generate(&private_path, &public_path).unwrap();

        fs::write(&private_path, b"this is not pkcs8 der at all").unwrap();

        let result = load_or_generate(&private_path, &public_path);
        assert!(matches!(result, Err(KeyError::BadPrivateKey(_))));
    }

    #[test]
    fn test_unusable_path_rejected() {
        let result = load_or_generate("/nonexistent-dir/privkey.der", "/nonexistent-dir/pubkey.b64");
        assert!(matches!(result, Err(KeyError::Io(_))));
    }
}
