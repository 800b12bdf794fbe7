//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use authpad::api::{serve, AppState, SharedState};
use authpad::config::{Config, SecretKey};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// A running server bound to a random local port
pub struct TestApp {
    pub address: String,
    pub state: SharedState,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn with the default development configuration
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn after letting the caller adjust the configuration
    pub async fn spawn_with(customize: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::default();
        config.auth.jwt_secret = Some(SecretKey::new(TEST_SECRET));
        customize(&mut config);

        let state = Arc::new(AppState::from_config(&config).expect("Invalid test config"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let server_state = state.clone();
        tokio::spawn(async move {
            serve(listener, server_state).await.expect("Server error");
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            state,
            client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.address, path))
    }

    /// POST a JSON body of email/password
    pub async fn post_credentials(&self, path: &str, email: &str, password: &str) -> reqwest::Response {
        self.post(path)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up, then log in, returning the raw Set-Cookie header of the login
    pub async fn signup_and_login(&self, email: &str, password: &str) -> String {
        let signup = self.post_credentials("/signup", email, password).await;
        assert!(signup.status().is_success(), "signup failed: {}", signup.status());

        let login = self.post_credentials("/login", email, password).await;
        assert_eq!(login.status(), reqwest::StatusCode::OK);
        set_cookie_header(&login).expect("login should set a cookie")
    }
}

/// The Set-Cookie header of a response, if any
pub fn set_cookie_header(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` pair at the front of a Set-Cookie header
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default().trim()
}

/// Value of the cookie in a Set-Cookie header
pub fn cookie_value(set_cookie: &str) -> &str {
    cookie_pair(set_cookie)
        .split_once('=')
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Replace one character in the middle of a JWT's payload segment
pub fn tamper_payload(token: &str) -> String {
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3, "not a JWT: {}", token);

    let payload = &mut parts[1];
    let mid = payload.len() / 2;
    let original = payload.as_bytes()[mid] as char;
    let replacement = if original == 'A' { "B" } else { "A" };
    payload.replace_range(mid..mid + 1, replacement);

    parts.join(".")
}
