//! Authentication and session management

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod store;

pub use cookie::{DeploymentMode, SessionCookiePolicy};
pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{extract_token, require_auth};
pub use models::{Credentials, User, UserInfo};
pub use password::PasswordHasher;
pub use service::{Authenticator, Session};
pub use store::UserStore;
