//! Credential Digest
//! Mission: One-way transform of a plaintext secret into a comparable digest
//!
//! This is deliberately a fast, unsalted, single-pass digest of the
//! plaintext: the stored-credential format of the service is a plain digest
//! with no salt and no work factor, which is a known weakness of the
//! contract, not an oversight to patch here.

use sha2::{Digest, Sha256};

/// Digest a plaintext password into its stored, comparable form.
pub fn digest_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}
