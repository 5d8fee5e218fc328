//! Auth API Client
//!
//! Minimal client for a GoTrue-compatible auth service mounted at
//! `<endpoint>/auth/v1`:
//! 1. Session retrieval (local, with a health round-trip when empty)
//! 2. Email/password sign-up and sign-in
//! 3. Admin user listing and updates (needs the service-role key)
//!
//! Every request carries the key both as `apikey` and as a bearer token.
//! No timeout is configured: a call waits for the service to answer.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    AdminUserAttributes, ApiErrorBody, AuthResponse, Session, SignUpBody, User, UserList,
};
use crate::utils::constants::{
    ADMIN_USERS_MAX_PAGES, ADMIN_USERS_PER_PAGE, AUTH_ADMIN_USERS_PATH, AUTH_HEALTH_PATH,
    AUTH_PATH, AUTH_SIGNUP_PATH, AUTH_TOKEN_PATH, CLIENT_INFO,
};
use crate::utils::format::now_secs;

/// Email + password body shared by sign-up and sign-in
#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Auth API client bound to one key
pub struct AuthClient {
    /// `<endpoint>/auth/v1`
    base_url: String,
    /// HTTP client carrying the key headers
    client: reqwest::Client,
    /// Session from the last successful sign-in / auto-confirmed sign-up
    session: Option<Session>,
}

impl AuthClient {
    /// Create a client for the project at `url`, authorized by `key`
    pub fn new(url: &str, key: &str) -> AppResult<Self> {
        let url = url.trim_end_matches('/');
        if url.is_empty() {
            return Err(AppError::invalid_config("auth endpoint URL is empty"));
        }
        if key.is_empty() {
            return Err(AppError::invalid_config("auth key is empty"));
        }

        let client = Self::build_client(key)?;
        let base_url = format!("{}{}", url, AUTH_PATH);
        debug!("🔌 Auth client bound to {}", base_url);

        Ok(Self {
            base_url,
            client,
            session: None,
        })
    }

    /// Build HTTP client with the key headers
    fn build_client(key: &str) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(key)
            .map_err(|_| AppError::invalid_config("auth key contains invalid header characters"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| AppError::invalid_config("auth key contains invalid header characters"))?;

        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-Client-Info", HeaderValue::from_static(CLIENT_INFO));

        reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| AppError::invalid_config(format!("Failed to build HTTP client: {}", e)))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send and decode a JSON response, turning non-2xx into a classified error
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let body: ApiErrorBody = serde_json::from_str(&raw).unwrap_or_default();
        let message = body
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error: {}", status));

        debug!("⚠️ Auth service answered {}: {}", status, message);
        Err(AppError::auth_rejected(
            status.as_u16(),
            body.error_code.as_deref(),
            message,
        ))
    }

    // ============================================
    // SESSION
    // ============================================

    /// Current session.
    ///
    /// A stored session is returned as-is. Without one the health endpoint is
    /// called so the endpoint and key are exercised; success yields `None`.
    pub async fn get_session(&self) -> AppResult<Option<Session>> {
        if let Some(session) = &self.session {
            return Ok(Some(session.clone()));
        }

        let response = self.request(Method::GET, AUTH_HEALTH_PATH).send().await?;
        Self::check_status(response).await?;
        Ok(None)
    }

    fn store(&mut self, session: Option<&Session>) {
        if let Some(session) = session {
            let mut session = session.clone();
            if session.expires_at.is_none() {
                session.expires_at = session
                    .expires_in
                    .and_then(|secs| now_secs().checked_add(secs));
            }
            self.session = Some(session);
        }
    }

    // ============================================
    // EMAIL / PASSWORD
    // ============================================

    /// Register a new identity
    pub async fn sign_up(&mut self, email: &str, password: &str) -> AppResult<AuthResponse> {
        info!("📝 Signing up {}", email);

        let request = self
            .request(Method::POST, AUTH_SIGNUP_PATH)
            .json(&PasswordCredentials { email, password });
        let body: SignUpBody = self.send(request).await?;
        let response = AuthResponse::from(body);

        self.store(response.session.as_ref());
        Ok(response)
    }

    /// Exchange email and password for a session
    pub async fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        info!("🔑 Signing in {}", email);

        let request = self
            .request(Method::POST, AUTH_TOKEN_PATH)
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password });
        let session: Session = self.send(request).await?;

        self.store(Some(&session));
        Ok(AuthResponse {
            user: session.user.clone(),
            session: self.session.clone(),
        })
    }

    // ============================================
    // ADMIN
    // ============================================

    /// Admin surface; calls succeed only with the service-role key
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }
}

/// Admin user management
pub struct AdminApi<'a> {
    client: &'a AuthClient,
}

impl AdminApi<'_> {
    /// One page of users (pages start at 1)
    pub async fn list_users(&self, page: u32, per_page: u32) -> AppResult<Vec<User>> {
        let request = self
            .client
            .request(Method::GET, AUTH_ADMIN_USERS_PATH)
            .query(&[("page", page), ("per_page", per_page)]);
        let list: UserList = self.client.send(request).await?;
        Ok(list.users)
    }

    /// Scan user pages for a case-insensitive email match
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        for page in 1..=ADMIN_USERS_MAX_PAGES {
            let users = self.list_users(page, ADMIN_USERS_PER_PAGE).await?;
            let last_page = users.len() < ADMIN_USERS_PER_PAGE as usize;

            if let Some(user) = users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            }) {
                return Ok(Some(user));
            }
            if last_page {
                break;
            }
        }
        Ok(None)
    }

    /// Update one user's attributes
    pub async fn update_user_by_id(
        &self,
        id: &str,
        attributes: &AdminUserAttributes,
    ) -> AppResult<User> {
        info!("🛠️ Updating user {}", id);

        let request = self
            .client
            .request(Method::PUT, &format!("{}/{}", AUTH_ADMIN_USERS_PATH, id))
            .json(attributes);
        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_inputs() {
        assert!(AuthClient::new("", "key").is_err());
        assert!(AuthClient::new("https://x.supabase.co", "").is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = AuthClient::new("https://x.supabase.co/", "key").unwrap();
        assert_eq!(client.base_url, "https://x.supabase.co/auth/v1");
    }

    #[test]
    fn test_rejects_key_with_newline() {
        assert!(AuthClient::new("https://x.supabase.co", "bad\nkey").is_err());
    }

    fn session(expires_in: Option<i64>) -> Session {
        Session {
            access_token: "token".into(),
            expires_in,
            expires_at: None,
            user: None,
        }
    }

    #[test]
    fn test_expiry_derived_from_lifetime() {
        let mut client = AuthClient::new("https://x.supabase.co", "key").unwrap();
        let before = now_secs();
        client.store(Some(&session(Some(3600))));

        let expires_at = client.session.unwrap().expires_at.unwrap();
        assert!(expires_at >= before + 3600);
    }

    #[test]
    fn test_oversized_lifetime_leaves_expiry_unset() {
        let mut client = AuthClient::new("https://x.supabase.co", "key").unwrap();
        client.store(Some(&session(Some(i64::MAX))));

        let stored = client.session.unwrap();
        assert_eq!(stored.expires_at, None);
        assert_eq!(stored.access_token, "token");
    }
}
