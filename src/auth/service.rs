//! Signup and login flows

use crate::auth::jwt::{Claims, TokenError, TokenService};
use crate::auth::models::User;
use crate::auth::password::PasswordHasher;
use crate::auth::store::UserStore;
use crate::error::{Error, Result};

/// A successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub token: String,
}

/// Ties the hasher, the user store and the token service together
#[derive(Debug, Clone)]
pub struct Authenticator {
    store: UserStore,
    hasher: PasswordHasher,
    tokens: TokenService,
    session_ttl_secs: u64,
}

impl Authenticator {
    pub fn new(
        store: UserStore,
        hasher: PasswordHasher,
        tokens: TokenService,
        session_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            session_ttl_secs,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl_secs
    }

    /// Register a new user.
    ///
    /// Hashing runs outside the store lock; the final insert is still atomic,
    /// so a racing signup for the same email loses with `UserAlreadyExists`.
    pub async fn signup(&self, email: &str, password: &str) -> Result<User> {
        if self.store.contains(email).await {
            return Err(Error::UserAlreadyExists(email.to_string()));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self.store.create(email, password_hash).await?;

        tracing::info!("Created user {}", user.email);
        Ok(user)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.store.find(email).await.inspect_err(|_| {
            tracing::info!("Login for unknown user {}", email);
        })?;

        if !self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash)
            .await
        {
            tracing::info!("Invalid password for {}", email);
            return Err(Error::InvalidPassword);
        }

        let token = self.tokens.issue(&user.email, self.session_ttl_secs)?;
        tracing::info!("{} logged in", user.email);

        Ok(Session {
            email: user.email,
            token,
        })
    }

    /// Validate a presented session token
    pub fn authenticate(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        self.tokens.validate(token)
    }
}
