//! Direct PostgreSQL access
//!
//! The probe only needs three things from a database: connect, ask for the
//! server version, close. Those are the two traits below; `PgConnector` is the
//! `sqlx` implementation.

use sqlx::{Connection, PgConnection};
use tracing::debug;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::VERSION_QUERY;

/// Opens connections
#[allow(async_fn_in_trait)]
pub trait SqlConnector {
    type Conn: SqlConnection;

    async fn connect(&self, url: &str) -> AppResult<Self::Conn>;
}

/// An open connection
#[allow(async_fn_in_trait)]
pub trait SqlConnection: Sized {
    /// Full `version()` string reported by the server
    async fn server_version(&mut self) -> AppResult<String>;

    async fn close(self) -> AppResult<()>;
}

/// `sqlx` PostgreSQL connector
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

impl SqlConnector for PgConnector {
    type Conn = PgConnection;

    async fn connect(&self, url: &str) -> AppResult<PgConnection> {
        debug!("🐘 Opening PostgreSQL connection");
        PgConnection::connect(url)
            .await
            .map_err(|e| AppError::db_connection_failed(e.to_string()))
    }
}

impl SqlConnection for PgConnection {
    async fn server_version(&mut self) -> AppResult<String> {
        sqlx::query_scalar::<_, String>(VERSION_QUERY)
            .fetch_one(&mut *self)
            .await
            .map_err(|e| AppError::db_query_failed(e.to_string()))
    }

    async fn close(self) -> AppResult<()> {
        Connection::close(self)
            .await
            .map_err(|e| AppError::new(ErrorCode::DbCloseFailed, e.to_string()))
    }
}

/// Product and version, i.e. everything before the first comma
pub fn short_version(version: &str) -> &str {
    version.split(',').next().unwrap_or(version).trim()
}
