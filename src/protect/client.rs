//! Controller HTTP client
//!
//! Authenticated request dispatch plus the session lifecycle it depends on.
//! A static API key always wins; otherwise a password-login session is
//! created on demand and replaced once it exceeds the session TTL.

use crate::error::{Error, Result};
use crate::protect::session::Session;
use reqwest::header;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;

/// Timeout for the login POST
const LOGIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for generic authenticated GETs
const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Token placements accepted by different controller firmware versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Cookie: TOKEN=<token>`
    Cookie,
}

impl AuthMode {
    fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Bearer => "bearer",
            AuthMode::Cookie => "cookie",
        }
    }
}

/// Controller client
///
/// The session slot is the only shared mutable state; the write lock around
/// login bounds duplicate logins under concurrent triggers and a torn token
/// can never be observed.
pub struct ProtectClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: String,
    api_key: Option<String>,
    username: Option<String>,
    password: Option<String>,
    session: RwLock<Option<Session>>,
}

impl ProtectClient {
    /// Create new ProtectClient
    ///
    /// Controllers commonly run self-signed certificates, so certificate
    /// verification is disabled for every call.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url,
            api_key,
            username,
            password,
            session: RwLock::new(None),
        }
    }

    /// Guarantee a usable token exists
    ///
    /// A configured API key satisfies this without any session logic. Fails
    /// with `Error::Config` when neither an API key nor a complete
    /// address/username/password triple is configured, and with
    /// `Error::Auth` when login does not produce a usable token.
    pub async fn ensure_authenticated(&self) -> Result<()> {
        if self.api_key.is_some() {
            return Ok(());
        }

        let (Some(username), Some(password)) = (self.username.clone(), self.password.clone())
        else {
            return Err(Error::Config(
                "UNIFI_ADDR/UNIFI_USERNAME/UNIFI_PASSWORD not set".to_string(),
            ));
        };
        if self.base_url.is_empty() {
            return Err(Error::Config(
                "UNIFI_ADDR/UNIFI_USERNAME/UNIFI_PASSWORD not set".to_string(),
            ));
        }

        if let Some(session) = self.session.read().await.as_ref() {
            if !session.is_stale() {
                return Ok(());
            }
        }

        // Re-check under the write lock: a concurrent trigger may have
        // finished logging in while we waited.
        let mut guard = self.session.write().await;
        if let Some(session) = guard.as_ref() {
            if !session.is_stale() {
                return Ok(());
            }
        }

        let token = self.login(&username, &password).await?;
        *guard = Some(Session::new(token));
        tracing::info!("Obtained session token via password login");
        Ok(())
    }

    /// POST credentials to the login endpoint and extract a token
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/api/auth/login", self.base_url);
        let resp = self
            .http
            .post(&url)
            .timeout(LOGIN_TIMEOUT)
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .map_err(|e| Error::Auth(format!("login request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Auth(format!("login rejected: HTTP {}", status)));
        }

        if let Some(cookie) = resp.cookies().find(|c| c.name() == "TOKEN") {
            return Ok(cookie.value().to_string());
        }

        // No cookie. Fall back to the JSON body; a parse failure here only
        // means the cookie was the sole possible source, not a fatal error.
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        body.get("access_token")
            .or_else(|| body.get("token"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Auth("login succeeded but returned no usable token".to_string())
            })
    }

    /// The token to place on outbound requests, if any
    async fn current_token(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            return Some(key.clone());
        }
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Authenticated GET
    ///
    /// Tries the token as a bearer header, then as a `TOKEN` cookie; the
    /// first response with a successful status wins. When every mode fails
    /// the last observed failure is surfaced as `Error::Request`.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut last: Option<String> = None;

        // Opportunistic login. Remember the failure and keep trying; the
        // endpoint may not require a session at all.
        if self.api_key.is_none() && self.username.is_some() && self.password.is_some() {
            if let Err(e) = self.ensure_authenticated().await {
                tracing::warn!(url = %url, error = %e, "Pre-request authentication failed");
                last = Some(e.to_string());
            }
        }

        let token = self.current_token().await;

        for mode in [AuthMode::Bearer, AuthMode::Cookie] {
            let mut request = self.http.get(url).timeout(REQUEST_TIMEOUT);
            if let Some(token) = &token {
                request = match mode {
                    AuthMode::Bearer => {
                        request.header(header::AUTHORIZATION, format!("Bearer {}", token))
                    }
                    AuthMode::Cookie => request.header(header::COOKIE, format!("TOKEN={}", token)),
                };
            }

            match request.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => {
                    tracing::debug!(
                        url = %url,
                        mode = mode.as_str(),
                        status = %resp.status(),
                        "Auth mode rejected"
                    );
                    last = Some(format!("HTTP {}", resp.status()));
                }
                Err(e) => {
                    tracing::debug!(
                        url = %url,
                        mode = mode.as_str(),
                        error = %e,
                        "Request transport failure"
                    );
                    last = Some(e.to_string());
                }
            }
        }

        Err(Error::Request {
            url: url.to_string(),
            detail: last.unwrap_or_else(|| "no response".to_string()),
        })
    }

    /// Authenticated GET returning a parsed JSON body
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self.get(url).await?;
        resp.json().await.map_err(|e| Error::Request {
            url: url.to_string(),
            detail: format!("invalid JSON: {}", e),
        })
    }

    /// Whether a static API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Shift the active session's issue time backwards to simulate age.
    /// Test support only; there is no production path to an old `issued_at`
    /// other than waiting out the TTL.
    #[doc(hidden)]
    pub async fn backdate_session(&self, by: Duration) {
        if let Some(session) = self.session.write().await.as_mut() {
            if let Some(earlier) = session.issued_at.checked_sub(by) {
                session.issued_at = earlier;
            }
        }
    }
}
