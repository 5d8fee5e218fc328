//! Providers Module - External Services
//!
//! The auth API over HTTP and direct PostgreSQL access.

pub mod auth;
pub mod database;

pub use auth::*;
pub use database::*;
