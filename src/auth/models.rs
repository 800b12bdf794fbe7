//! Authentication models

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, case-sensitive as submitted
    pub email: String,
    /// Bcrypt hash of the password
    pub password_hash: String,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Signup and login request body.
///
/// Both fields are optional so that absent and empty values can be reported
/// the same way.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Return `(email, password)` if both are present and non-empty
    pub fn into_parts(self) -> Option<(String, String)> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

/// User information in responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub password_hash: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            password_hash: user.password_hash,
        }
    }
}
