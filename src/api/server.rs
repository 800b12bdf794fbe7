//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::auth::{
    require_auth, Authenticator, PasswordHasher, SessionCookiePolicy, TokenService, UserStore,
};
use crate::config::Config;
use crate::error::Result;

use super::routes;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub auth: Authenticator,
    pub cookies: SessionCookiePolicy,
    pub expose_user_listing: bool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the state from a validated configuration. Fails if the signing
    /// secret is missing or any auth setting is out of range.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let auth_config = &config.auth;

        let authenticator = Authenticator::new(
            UserStore::new(),
            PasswordHasher::new(auth_config.effective_bcrypt_cost()),
            TokenService::new(config.secret()?),
            auth_config.session_ttl_secs,
        );

        let cookies = SessionCookiePolicy::new(
            auth_config.cookie_name.clone(),
            auth_config.mode,
            auth_config.session_ttl_secs,
        );

        Ok(Self {
            auth: authenticator,
            cookies,
            expose_user_listing: auth_config.expose_user_listing,
        })
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        "Server listening on {} ({} mode, bcrypt cost {})",
        addr,
        config.auth.mode,
        config.auth.effective_bcrypt_cost()
    );
    if !config.auth.mode.is_production() {
        tracing::warn!("Development mode: session cookies are sent without HttpOnly and Secure");
    }
    if state.expose_user_listing {
        tracing::warn!("GET /users is enabled and lists every account without authentication");
    }

    serve(listener, state).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/protected", get(routes::protected))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut router = Router::new()
        .route("/", get(routes::health))
        .route("/signup", post(routes::signup))
        .route("/login", post(routes::login));

    if state.expose_user_listing {
        router = router.route("/users", get(routes::list_users));
    }

    router
        .nest("/auth", protected)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
