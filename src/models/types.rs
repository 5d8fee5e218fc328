//! Wire types of the auth API

use serde::{Deserialize, Serialize};

/// An identity as returned by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An issued session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiry as epoch seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Result of sign-up / sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// Sign-up answers with a session on auto-confirm projects and with a bare
/// user when confirmation is required.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpBody {
    Session(Session),
    User(User),
}

impl From<SignUpBody> for AuthResponse {
    fn from(body: SignUpBody) -> Self {
        match body {
            SignUpBody::Session(session) => Self {
                user: session.user.clone(),
                session: Some(session),
            },
            SignUpBody::User(user) => Self {
                user: Some(user),
                session: None,
            },
        }
    }
}

/// Page of `GET /admin/users`
#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Attributes accepted by `PUT /admin/users/{id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminUserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_confirm: Option<bool>,
}

impl AdminUserAttributes {
    pub fn confirm_email() -> Self {
        Self {
            email_confirm: Some(true),
        }
    }
}

/// Error bodies vary between gateway and service versions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl ApiErrorBody {
    /// First message field that is present
    pub fn text(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }
}
