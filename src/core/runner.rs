//! Probe Runner
//!
//! Runs the probes in fixed order against one configuration:
//! 1. Configuration validation (fatal when endpoint or anon key is missing)
//! 2. Client construction + session check
//! 3. Credential lifecycle: sign-up, sign-in (with admin fallback), session
//! 4. Service-role key validation
//! 5. Direct PostgreSQL version query
//!
//! Each probe contains its own failures and reports them as console lines
//! only; configuration problems are the one error that reaches the caller.

use tracing::warn;

use crate::core::sign_in::{sign_in_with_fallback, Remediation};
use crate::models::config::ProbeConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::AuthResponse;
use crate::providers::auth::AuthClient;
use crate::providers::database::{short_version, PgConnector, SqlConnection, SqlConnector};
use crate::utils::constants::{KEY_PREVIEW_LEN, TOKEN_PREVIEW_LEN};
use crate::utils::format::{format_epoch_secs, now_millis, preview};
use crate::utils::report::{Reporter, Status};

pub struct ProbeRunner<C = PgConnector> {
    config: ProbeConfig,
    connector: C,
}

impl ProbeRunner<PgConnector> {
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_connector(config, PgConnector)
    }
}

impl<C: SqlConnector> ProbeRunner<C> {
    /// Runner with a custom database connector
    pub fn with_connector(config: ProbeConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Run every probe. Errors only for invalid configuration, before any
    /// network traffic.
    pub async fn run(&self, report: &mut Reporter) -> AppResult<()> {
        report.heading("========== SUPABASE CONNECTION TEST ==========");

        let (url, anon_key) = self.config.validate()?;
        report.pass(0, "Environment variables loaded");
        report.info(1, format!("URL: {}", url));
        report.info(1, format!("Anon Key: {}", preview(anon_key, KEY_PREVIEW_LEN)));

        report.heading("[TEST 1] Creating Supabase client with anon key...");
        let mut client = AuthClient::new(url, anon_key)?;
        report.pass(0, "Client created successfully");

        self.probe_connection(&client, report).await;
        self.probe_credentials(url, &mut client, report).await;
        self.probe_service_role(url, report).await;
        self.probe_database(report).await;

        report.heading("========== TEST COMPLETE ==========");
        Ok(())
    }

    /// Session request with the anon key; no session is expected
    async fn probe_connection(&self, client: &AuthClient, report: &mut Reporter) {
        report.heading("[TEST 2] Testing connection via auth endpoint...");

        match client.get_session().await {
            Ok(session) => {
                report.pass(0, "Connection successful - Auth endpoint responding");
                let state = if session.is_some() {
                    "Active"
                } else {
                    "None (expected for anon key)"
                };
                report.info(1, format!("Session: {}", state));
            }
            Err(e) if e.code == ErrorCode::AuthRejected || e.code == ErrorCode::AuthUnauthorized => {
                report.warn(0, format!("Session check: {}", e.message))
            }
            Err(e) => report.fail(0, format!("Connection test failed: {}", e.message)),
        }
    }

    /// Sign-up, sign-in and session re-fetch with the test credentials
    async fn probe_credentials(
        &self,
        url: &str,
        client: &mut AuthClient,
        report: &mut Reporter,
    ) {
        let Some(credentials) = self.config.test_credentials(now_millis()) else {
            report.heading("[TEST 3] Skipping auth tests (TEST_EMAIL and TEST_PASSWORD not provided)");
            return;
        };

        report.heading("[TEST 3] Testing authentication...");
        report.info(1, format!("Test email: {}", credentials.email));

        // Sign up
        report.line(Status::Heading, 1, "[3a] Testing Sign Up...");
        match client.sign_up(&credentials.email, &credentials.password).await {
            Ok(response) => {
                report.pass(1, "Sign up successful");
                if let Some(user) = &response.user {
                    report.info(2, format!("User ID: {}", user.id));
                    report.info(2, format!("Email: {}", user.email.as_deref().unwrap_or("-")));
                    report.info(2, format!("Created: {}", user.created_at.as_deref().unwrap_or("-")));
                }
            }
            Err(e) if e.is_already_registered() => {
                report.warn(1, "User already exists (continuing with sign in test)")
            }
            Err(e) => {
                report.fail(1, format!("Sign up failed: {}", e.message));
                return;
            }
        }

        // Sign in, with admin confirmation as fallback
        report.line(Status::Heading, 1, "[3b] Testing Sign In...");
        let admin = self.privileged_client(url, report);
        let attempt = sign_in_with_fallback(client, admin.as_ref(), &credentials, report).await;

        match &attempt.result {
            Ok(response) => {
                if attempt.remediation == Remediation::Retried {
                    report.pass(1, "Sign in successful after email verification");
                } else {
                    report.pass(1, "Sign in successful");
                }
                Self::describe_sign_in(response, report);
            }
            Err(e) => report.fail(1, format!("Sign in failed: {}", e.message)),
        }

        // Session re-fetch
        report.line(Status::Heading, 1, "[3c] Testing Get Current Session...");
        match client.get_session().await {
            Ok(Some(session)) => {
                report.pass(1, "Session retrieved");
                let owner = session
                    .user
                    .as_ref()
                    .and_then(|u| u.email.as_deref())
                    .unwrap_or("-");
                report.info(2, format!("User: {}", owner));
            }
            Ok(None) => report.warn(1, "No active session (expected for new auth tests)"),
            Err(e) => report.warn(1, format!("Get session error: {}", e.message)),
        }
    }

    fn describe_sign_in(response: &AuthResponse, report: &mut Reporter) {
        if let Some(user) = &response.user {
            report.info(2, format!("User ID: {}", user.id));
            report.info(2, format!("Email: {}", user.email.as_deref().unwrap_or("-")));
        }
        if let Some(session) = &response.session {
            report.info(
                2,
                format!("Session Token: {}", preview(&session.access_token, TOKEN_PREVIEW_LEN)),
            );
            if let Some(expires) = session.expires_at.and_then(format_epoch_secs) {
                report.info(2, format!("Token Expires: {}", expires));
            }
        }
    }

    /// Service-role client for admin remediation, if a key is configured
    fn privileged_client(&self, url: &str, report: &mut Reporter) -> Option<AuthClient> {
        let key = self.config.service_role_key.as_deref()?;
        match AuthClient::new(url, key) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("⚠️ Service-role client unavailable: {}", e);
                report.warn(2, format!("Service role client unavailable: {}", e.message));
                None
            }
        }
    }

    /// Session request with the service-role key
    async fn probe_service_role(&self, url: &str, report: &mut Reporter) {
        let Some(key) = self.config.service_role_key.as_deref() else {
            report.heading("[TEST 4] Skipping service role test (key not provided)");
            return;
        };

        report.heading("[TEST 4] Testing with service role key...");
        let admin = match AuthClient::new(url, key) {
            Ok(client) => client,
            Err(e) => {
                report.warn(0, format!("Service role error: {}", e.message));
                return;
            }
        };

        match admin.get_session().await {
            Ok(_) => report.pass(0, "Service role key is valid"),
            Err(e) if e.code == ErrorCode::AuthUnauthorized => {
                report.fail(0, format!("Service role key rejected: {}", e.message))
            }
            Err(e) => report.warn(0, format!("Service role test: {}", e.message)),
        }
    }

    /// One connection, one version query, one close
    async fn probe_database(&self, report: &mut Reporter) {
        let Some(url) = self.config.database_url.as_deref() else {
            report.heading("[TEST 5] Skipping PostgreSQL test (DATABASE_URL not provided)");
            return;
        };

        report.heading("[TEST 5] Testing direct PostgreSQL connection...");
        let mut conn = match self.connector.connect(url).await {
            Ok(conn) => conn,
            Err(e) => {
                report.fail(0, format!("PostgreSQL connection failed: {}", e.message));
                return;
            }
        };
        report.pass(0, "PostgreSQL connection successful");

        let version = conn.server_version().await;
        let closed = conn.close().await;

        match version {
            Ok(version) => {
                report.info(1, format!("PostgreSQL Version: {}", short_version(&version)))
            }
            Err(e) => report.fail(0, format!("PostgreSQL query failed: {}", e.message)),
        }
        if let Err(e) = closed {
            report.warn(0, format!("PostgreSQL connection did not close cleanly: {}", e.message));
        }
    }
}

/// Fatal errors as printed by the binary
pub fn fatal_message(err: &AppError) -> String {
    format!("✗ Fatal error: {}", err.message)
}
