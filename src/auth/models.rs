//! User Models
//! Mission: Define the user record, token claims, and request payloads

use serde::{Deserialize, Serialize};

/// User account, keyed by email in the repository.
///
/// The email is both the repository key and an attribute on the record; the
/// two must stay consistent when the email is renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String, // digest of the plaintext - never serialize
    pub favorite_cake: String,
}

/// JWT claims payload.
///
/// `nbf` is issued with every token but not enforced today; it is part of
/// the token contract so clients can rely on its presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (email)
    pub nbf: i64,    // not-before timestamp
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub favorite_cake: String,
}

/// Token issuance request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Favorite cake update body
#[derive(Debug, Deserialize)]
pub struct UpdateCakeRequest {
    pub favorite_cake: String,
}

/// Email update body
#[derive(Debug, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: String,
}

/// Password update body
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}
