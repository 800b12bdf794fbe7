//! In-memory user storage

use crate::auth::models::User;
use crate::error::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-lifetime user store keyed by email.
///
/// Records live only as long as the process. Cloning yields another handle to
/// the same map.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user. Fails without overwriting if the email is taken.
    ///
    /// The existence check and the insert happen under one write lock, so of
    /// several concurrent creates for the same email exactly one succeeds.
    pub async fn create(&self, email: &str, password_hash: String) -> Result<User> {
        let mut users = self.users.write().await;
        match users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(Error::UserAlreadyExists(email.to_string())),
            Entry::Vacant(slot) => {
                let user = User::new(email, password_hash);
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    /// Look up a user by email
    pub async fn find(&self, email: &str) -> Result<User> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or_else(|| Error::UserNotFound(email.to_string()))
    }

    /// Whether a user with this email exists
    pub async fn contains(&self, email: &str) -> bool {
        self.users.read().await.contains_key(email)
    }

    /// All users, ordered by email
    pub async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
