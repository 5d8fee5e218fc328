//! Sign-in with admin remediation
//!
//! A password sign-in refused with "Email not confirmed" gets one repair
//! attempt: the service-role client confirms the address, then sign-in is
//! retried once. The sequence is driven by `Remediation`:
//!
//! ```text
//! NotAttempted --(unconfirmed)--> Confirmed --(retry)--> Retried
//!      \--(unconfirmed, repair fails)--> Failed
//! ```
//!
//! `Retried` and `Failed` have no outgoing edges, so sign-in runs at most twice.

use tracing::{info, warn};

use crate::models::config::TestCredentials;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AdminUserAttributes, AuthResponse};
use crate::providers::auth::AuthClient;
use crate::utils::constants::ENV_SERVICE_ROLE_KEY;
use crate::utils::report::Reporter;

/// Progress of the confirm-and-retry fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// No repair tried yet
    NotAttempted,
    /// Address confirmed by the admin API, retry pending
    Confirmed,
    /// Sign-in was retried after confirmation
    Retried,
    /// Repair could not be carried out
    Failed,
}

/// What to do after a failed sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Confirm,
    Retry,
    Stop,
}

impl Remediation {
    pub fn next_step(self, email_not_confirmed: bool) -> NextStep {
        match self {
            Remediation::NotAttempted if email_not_confirmed => NextStep::Confirm,
            Remediation::Confirmed => NextStep::Retry,
            _ => NextStep::Stop,
        }
    }
}

/// Final sign-in result and how it was reached
#[derive(Debug)]
pub struct SignInAttempt {
    pub result: AppResult<AuthResponse>,
    pub remediation: Remediation,
}

/// Sign in, confirming the address through `admin` and retrying once when
/// the service reports it unconfirmed.
pub async fn sign_in_with_fallback(
    client: &mut AuthClient,
    admin: Option<&AuthClient>,
    credentials: &TestCredentials,
    report: &mut Reporter,
) -> SignInAttempt {
    let email = credentials.email.as_str();
    let password = credentials.password.as_str();

    let mut remediation = Remediation::NotAttempted;
    let mut result = client.sign_in_with_password(email, password).await;

    loop {
        let email_not_confirmed = match &result {
            Ok(_) => break,
            Err(e) => e.is_email_not_confirmed(),
        };

        remediation = match remediation.next_step(email_not_confirmed) {
            NextStep::Confirm => {
                report.warn(1, "Email confirmation required");
                report.info(2, "→ Attempting to verify email using service role key...");
                force_confirm(admin, email, report).await
            }
            NextStep::Retry => {
                info!("🔁 Retrying sign-in for {}", email);
                result = client.sign_in_with_password(email, password).await;
                Remediation::Retried
            }
            NextStep::Stop => break,
        };
    }

    SignInAttempt {
        result,
        remediation,
    }
}

async fn force_confirm(admin: Option<&AuthClient>, email: &str, report: &mut Reporter) -> Remediation {
    let Some(admin) = admin else {
        report.warn(2, format!("Could not auto-verify: {} not provided", ENV_SERVICE_ROLE_KEY));
        return Remediation::Failed;
    };

    match confirm_email(admin, email).await {
        Ok(()) => {
            report.pass(2, "Email verified with service role");
            Remediation::Confirmed
        }
        Err(e) => {
            warn!("⚠️ Admin confirmation failed [{}]: {}", e.code_str(), e.message);
            report.warn(2, format!("Could not auto-verify: {}", e.message));
            Remediation::Failed
        }
    }
}

async fn confirm_email(admin: &AuthClient, email: &str) -> AppResult<()> {
    let api = admin.admin();
    let user = api
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| AppError::user_not_found(email))?;

    api.update_user_by_id(&user.id, &AdminUserAttributes::confirm_email())
        .await?;
    Ok(())
}
