//! User Storage
//! Mission: Keep registered accounts in memory with atomic insert-if-absent

use crate::auth::models::UserRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {0} already exists")]
    DuplicateUser(String),
}

/// In-memory credential store keyed by username (case-sensitive)
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get user by username
    pub fn find(&self, username: &str) -> Option<UserRecord> {
        self.users.read().get(username).cloned()
    }

    /// Insert a new user. The existence check and the insert happen under one
    /// write lock, so two racing registrations cannot both succeed.
    pub fn insert(&self, username: &str, password_hash: String) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write();
        if users.contains_key(username) {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }

        let user = UserRecord::new(username, password_hash);
        users.insert(username.to_string(), user.clone());
        drop(users);

        info!("✅ Created user: {} at {}", user.username, user.created_at);
        Ok(user)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
