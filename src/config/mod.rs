//! Configuration management for Authpad

pub mod loader;
mod schema;

pub use loader::{load_config, resolve_config};
pub use schema::*;
