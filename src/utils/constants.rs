//! Constants Module - Single Source of Truth
//!
//! Env-var names, API paths and display limits used across the crate.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Sent as `X-Client-Info` on every auth request
pub const CLIENT_INFO: &str = concat!("supaprobe/", env!("CARGO_PKG_VERSION"));

// ============================================
// ENVIRONMENT VARIABLES
// ============================================

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_TEST_EMAIL: &str = "TEST_EMAIL";
pub const ENV_TEST_PASSWORD: &str = "TEST_PASSWORD";
/// Only the literal value `false` disables address suffixing
pub const ENV_AUTO_EMAIL: &str = "AUTO_EMAIL";

// ============================================
// AUTH API
// ============================================

/// Auth API root, relative to the project endpoint
pub const AUTH_PATH: &str = "/auth/v1";
pub const AUTH_HEALTH_PATH: &str = "/health";
pub const AUTH_SIGNUP_PATH: &str = "/signup";
pub const AUTH_TOKEN_PATH: &str = "/token";
pub const AUTH_ADMIN_USERS_PATH: &str = "/admin/users";

/// Page size used when searching users by email
pub const ADMIN_USERS_PER_PAGE: u32 = 50;

/// Upper bound on pages scanned by an email lookup
pub const ADMIN_USERS_MAX_PAGES: u32 = 20;

// ============================================
// DATABASE
// ============================================

pub const VERSION_QUERY: &str = "SELECT version();";

// ============================================
// DISPLAY
// ============================================

/// Characters of the anon key echoed at startup
pub const KEY_PREVIEW_LEN: usize = 10;

/// Characters of the access token echoed after sign-in
pub const TOKEN_PREVIEW_LEN: usize = 20;
