//! Authpad - minimal cookie-session authentication service
//!
//! Signup, login, bcrypt password verification, HS256 session tokens carried
//! in a cookie, and a route gated on token validation. Users live in an
//! in-memory store for the lifetime of the process.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::Error;
