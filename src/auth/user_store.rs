//! User Storage
//! Mission: Concurrent in-memory user repository keyed by email

use crate::auth::models::User;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

/// Repository errors. Both are per-request and recoverable; callers decide
/// how they surface at the HTTP boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user already exists")]
    AlreadyExists,
    #[error("user does not exist")]
    NotFound,
}

/// Concurrent user repository.
///
/// A single lock guards the whole map: writers are fully serialized against
/// everything, readers only block writers. No per-key locking, no lock-free
/// fast path. Lifetime is the process lifetime; nothing is persisted.
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a new user; fails if the email is already taken.
    pub fn add(&self, email: &str, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write();
        if users.contains_key(email) {
            return Err(StoreError::AlreadyExists);
        }
        users.insert(email.to_string(), user);
        Ok(())
    }

    /// Fetch a copy of the user record.
    pub fn get(&self, email: &str) -> Result<User, StoreError> {
        let users = self.users.read();
        users.get(email).cloned().ok_or(StoreError::NotFound)
    }

    /// Replace an existing record under the same key. No upsert: an absent
    /// key is an error and the store is left untouched.
    pub fn update(&self, email: &str, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write();
        if !users.contains_key(email) {
            return Err(StoreError::NotFound);
        }
        users.insert(email.to_string(), user);
        Ok(())
    }

    /// Remove a record and return it, so callers can re-insert it under a
    /// new key. Email rename is delete-then-add, not an atomic rekey.
    pub fn delete(&self, email: &str) -> Result<User, StoreError> {
        let mut users = self.users.write();
        users.remove(email).ok_or(StoreError::NotFound)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
