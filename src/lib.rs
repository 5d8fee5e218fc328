//! supaprobe
//!
//! Smoke-test runner for a hosted auth service and its database:
//! - Session check with the anon key
//! - Sign-up / sign-in lifecycle with admin email confirmation as fallback
//! - Service-role key validation
//! - Direct PostgreSQL version query

pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{ProbeRunner, Remediation};
pub use models::{AppError, AppResult, ErrorCode, ProbeConfig};
pub use providers::{AuthClient, PgConnector, SqlConnection, SqlConnector};
pub use utils::{Reporter, Status};
