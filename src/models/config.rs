//! Configuration module for the probe runner
//!
//! Everything is read once from environment variables (names live in
//! utils/constants.rs) and stays immutable for the run.

use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    ENV_AUTO_EMAIL, ENV_DATABASE_URL, ENV_SERVICE_ROLE_KEY, ENV_SUPABASE_ANON_KEY,
    ENV_SUPABASE_URL, ENV_TEST_EMAIL, ENV_TEST_PASSWORD,
};
use crate::utils::format::unique_address;

/// Test credentials for the sign-up / sign-in probe
#[derive(Debug, Clone)]
pub struct TestCredentials {
    pub email: String,
    pub password: String,
}

/// Configuration bundle for one run
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Project endpoint, e.g. https://xyz.supabase.co
    pub supabase_url: Option<String>,
    /// Public (anon) key
    pub anon_key: Option<String>,
    /// Privileged (service-role) key
    pub service_role_key: Option<String>,
    /// Direct PostgreSQL connection string
    pub database_url: Option<String>,
    pub test_email: Option<String>,
    pub test_password: Option<String>,
    /// Suffix the test email with a timestamp (on unless `AUTO_EMAIL=false`)
    pub auto_email: bool,
}

impl ProbeConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let config = Self {
            supabase_url: get(ENV_SUPABASE_URL),
            anon_key: get(ENV_SUPABASE_ANON_KEY),
            service_role_key: get(ENV_SERVICE_ROLE_KEY),
            database_url: get(ENV_DATABASE_URL),
            test_email: get(ENV_TEST_EMAIL),
            test_password: get(ENV_TEST_PASSWORD),
            auto_email: lookup(ENV_AUTO_EMAIL).as_deref() != Some("false"),
        };

        // Keys are NEVER logged
        info!(
            service_role = config.service_role_key.is_some(),
            database = config.database_url.is_some(),
            credentials = config.test_email.is_some() && config.test_password.is_some(),
            auto_email = config.auto_email,
            "configuration loaded"
        );

        config
    }

    /// Check the mandatory values and hand back (url, anon key)
    pub fn validate(&self) -> AppResult<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(key)) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(AppError::invalid_config(format!(
                        "{} must be an http(s) URL, got {}",
                        ENV_SUPABASE_URL, url
                    )));
                }
                Ok((url, key))
            }
            _ => Err(AppError::missing_env(&[ENV_SUPABASE_URL, ENV_SUPABASE_ANON_KEY])),
        }
    }

    /// Credentials for the lifecycle probe, with the uniqueness suffix applied
    /// using `now_millis` when enabled.
    pub fn test_credentials(&self, now_millis: i64) -> Option<TestCredentials> {
        let email = self.test_email.as_deref()?;
        let password = self.test_password.clone()?;

        let email = if self.auto_email {
            unique_address(email, now_millis)
        } else {
            email.to_string()
        };

        Some(TestCredentials { email, password })
    }
}
