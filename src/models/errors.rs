//! Centralized Error Handling Module
//!
//! Every failure a probe can hit carries a unique error code, so the console
//! narration and the `tracing` logs agree on what went wrong.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Configuration errors
//! - AUTH_xxx: Auth service rejections
//! - HTTP_xxx: Transport errors
//! - DB_xxx: Database errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Sign-up hit an identity that already exists
    pub fn is_already_registered(&self) -> bool {
        self.code == ErrorCode::AuthUserExists
    }

    /// Sign-in was refused because the email address is unconfirmed
    pub fn is_email_not_confirmed(&self) -> bool {
        self.code == ErrorCode::AuthEmailNotConfirmed
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Auth Service Errors
    // ============================================
    /// Sign-up refused: identity already registered
    AuthUserExists,
    /// Sign-in refused: email not confirmed
    AuthEmailNotConfirmed,
    /// Key or token rejected (HTTP 401/403)
    AuthUnauthorized,
    /// Admin lookup found no matching identity
    AuthUserNotFound,
    /// Any other non-2xx response from the auth service
    AuthRejected,

    // ============================================
    // Transport Errors
    // ============================================
    /// Could not reach the service
    HttpConnectionFailed,
    /// Response body could not be decoded
    InvalidResponse,

    // ============================================
    // Database Errors
    // ============================================
    /// Could not open a connection
    DbConnectionFailed,
    /// Query failed
    DbQueryFailed,
    /// Connection did not close cleanly
    DbCloseFailed,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::AuthUserExists => "AUTH_USER_EXISTS",
            Self::AuthEmailNotConfirmed => "AUTH_EMAIL_NOT_CONFIRMED",
            Self::AuthUnauthorized => "AUTH_UNAUTHORIZED",
            Self::AuthUserNotFound => "AUTH_USER_NOT_FOUND",
            Self::AuthRejected => "AUTH_REJECTED",

            Self::HttpConnectionFailed => "HTTP_CONNECTION_FAILED",
            Self::InvalidResponse => "HTTP_INVALID_RESPONSE",

            Self::DbConnectionFailed => "DB_CONNECTION_FAILED",
            Self::DbQueryFailed => "DB_QUERY_FAILED",
            Self::DbCloseFailed => "DB_CLOSE_FAILED",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Configuration problems abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigMissingEnv | Self::ConfigInvalidValue)
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Missing mandatory environment variables
    pub fn missing_env(names: &[&str]) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("Missing required environment variables: {}", names.join(" and ")),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Admin lookup came back empty
    pub fn user_not_found(email: &str) -> Self {
        Self::new(ErrorCode::AuthUserNotFound, format!("No user found for {}", email))
    }

    /// Auth service rejection, classified from its status and error body
    pub fn auth_rejected(status: u16, error_code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let code = match error_code {
            Some("user_already_exists") | Some("email_exists") => ErrorCode::AuthUserExists,
            Some("email_not_confirmed") => ErrorCode::AuthEmailNotConfirmed,
            _ if message.contains("already registered") => ErrorCode::AuthUserExists,
            _ if message.contains("Email not confirmed") => ErrorCode::AuthEmailNotConfirmed,
            _ if status == 401 || status == 403 => ErrorCode::AuthUnauthorized,
            _ => ErrorCode::AuthRejected,
        };
        Self::new(code, message)
    }

    /// Database connection failure
    pub fn db_connection_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DbConnectionFailed, msg)
    }

    /// Database query failure
    pub fn db_query_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DbQueryFailed, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::new(ErrorCode::HttpConnectionFailed, format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::new(ErrorCode::InvalidResponse, err.to_string())
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::InvalidResponse, "JSON parse error", err)
    }
}
