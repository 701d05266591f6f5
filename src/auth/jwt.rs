//! JWT Token Service
//! Mission: Forge and validate signed bearer tokens

use crate::auth::keys::{self, KeyError, KeyPair};
use crate::auth::models::{Claims, User};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use thiserror::Error;
use tracing::debug;

/// Token service errors. `Invalid` is the per-request, recoverable case;
/// the middleware maps it to an unauthorized response.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Forges and parses EdDSA-signed tokens. The keypair is loaded once at
/// construction and immutable afterwards; construction failure is fatal for
/// service start-up.
pub struct JwtService {
    keys: KeyPair,
    validation: Validation,
}

impl JwtService {
    pub fn new(private_path: &str, public_path: &str) -> Result<Self, KeyError> {
        let keys = keys::load_or_generate(private_path, public_path)?;

        // Token validity is signature-only: no expiry claim is issued, so
        // none is required or checked.
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self { keys, validation })
    }

    /// Forge a signed token binding the user's email, with an issued `nbf`
    /// marker.
    pub fn forge_token(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.email.clone(),
            nbf: Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::EdDSA), &claims, &self.keys.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify the signature and decode the claims. Signature mismatch,
    /// malformed structure, and unsupported algorithms all collapse into
    /// `Invalid`; claims are never trusted before the signature checks out.
    pub fn parse_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            debug!("token rejected: {}", e);
            TokenError::Invalid
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_service(dir: &TempDir) -> JwtService {
        let private_path = dir.path().join("privkey.der");
        let public_path = dir.path().join("pubkey.b64");
        JwtService::new(
            private_path.to_str().unwrap(),
            public_path.to_str().unwrap(),
        )
        .unwrap()
    }

    fn test_user() -> User {
        User {
            email: "myemail@gmail.com".to_string(),
            password_digest: "digest".to_string(),
            favorite_cake: "orange".to_string(),
        }
    }

    #[test]
    fn test_forge_then_parse_round_trips_email() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let token = service.forge_token(&test_user()).unwrap();
        assert!(!token.is_empty());

        let claims = service.parse_token(&token).unwrap();
        assert_eq!(claims.sub, "myemail@gmail.com");
        assert!(claims.nbf <= Utc::now().timestamp());
    }

    #[test]
    fn test_empty_paths_are_fatal() {
        assert!(JwtService::new("", "").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        assert!(service.parse_token("not.a.token").is_err());
        assert!(service.parse_token("").is_err());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let mut token = service.forge_token(&test_user()).unwrap();
        let flipped = if token.ends_with('A') { 'B' } else { 'A' };
        token.pop();
        token.push(flipped);

        assert!(service.parse_token(&token).is_err());
    }

    #[test]
    fn test_token_from_other_keypair_rejected() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        let service_a = test_service(&dir_a);
        let service_b = test_service(&dir_b);

        let token = service_a.forge_token(&test_user()).unwrap();
        assert!(service_b.parse_token(&token).is_err());
    }

    #[test]
    fn test_keys_survive_restart() {
        let dir = TempDir::new().unwrap();

        let token = test_service(&dir).forge_token(&test_user()).unwrap();

        // A fresh service over the same paths must accept the old token.
        let reloaded = test_service(&dir);
        let claims = reloaded.parse_token(&token).unwrap();
        assert_eq!(claims.sub, "myemail@gmail.com");
    }
}
