//! Supabase-compatible HTTP gateway
//!
//! One client serves identity, rows and blobs. It owns the bearer token of the
//! current session; the token is cloned out before any request so no lock is
//! held across an await.

mod auth;
mod rest;
mod storage;

use futures::lock::Mutex as AsyncMutex;
use log::{debug, info, warn};
use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::domain::Session;
use crate::error::{GatewayError, GatewayResult};

/// Shown when the gateway no longer accepts the session
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Called with the new session after a refresh, or `None` once it has expired
type SessionListener = Box<dyn Fn(Option<&Session>) + Send + Sync>;

/// HTTP client for the hosted backend
pub struct SupabaseClient {
    http: reqwest::Client,
    config: GatewayConfig,
    session: RwLock<Option<Session>>,
    listener: RwLock<Option<SessionListener>>,
    // Serializes token refreshes so parallel 401s spend the refresh token once
    refreshing: AsyncMutex<()>,
}

impl SupabaseClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_http(config, reqwest::Client::new())
    }

    pub(crate) fn with_http(config: GatewayConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config,
            session: RwLock::new(None),
            listener: RwLock::new(None),
            refreshing: AsyncMutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Register the callback told about refreshed and expired sessions
    pub fn on_session_change(&self, listener: impl Fn(Option<&Session>) + Send + Sync + 'static) {
        *self.listener.write() = Some(Box::new(listener));
    }

    fn notify(&self, session: Option<&Session>) {
        if let Some(listener) = self.listener.read().as_ref() {
            listener(session);
        }
    }

    fn access_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.access_token.clone())
    }

    fn bearer(&self) -> String {
        bearer_for(self.session.read().as_ref(), self.config.anon_key())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.bearer())
    }

    /// Send once, turning non-success statuses into errors
    async fn send_once(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response).await)
    }

    /// Send on behalf of the session. A 401 refreshes the access token and the
    /// request is rebuilt and sent once more.
    async fn send<F>(&self, build: F) -> GatewayResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let used = self.access_token();
        let err = match self.send_once(build()).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };
        if !is_unauthorized(&err) || used.is_none() {
            return Err(err);
        }
        self.refresh_after(used.as_deref()).await?;
        self.send_once(build()).await
    }

    async fn send_json<T, F>(&self, build: F) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let response = self.send(build).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Refresh unless another caller already replaced the rejected token
    async fn refresh_after(&self, rejected: Option<&str>) -> GatewayResult<()> {
        let _guard = self.refreshing.lock().await;
        if self.access_token().as_deref() != rejected {
            return match self.access_token() {
                Some(_) => Ok(()),
                None => Err(GatewayError::Auth(SESSION_EXPIRED.to_string())),
            };
        }
        self.refresh_session().await
    }

    /// Trade the refresh token for a new session. Failure ends the session.
    async fn refresh_session(&self) -> GatewayResult<()> {
        let refresh_token = self
            .session
            .read()
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .filter(|t| !t.is_empty());
        let Some(refresh_token) = refresh_token else {
            debug!("no refresh token, ending session");
            self.expire();
            return Err(GatewayError::Auth(SESSION_EXPIRED.to_string()));
        };

        let mut url = self.config.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");
        let body = json!({ "refresh_token": refresh_token });
        let request = self
            .http
            .post(url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&body);

        let refreshed = match self.send_once(request).await {
            Ok(response) => response.json::<Session>().await.map_err(GatewayError::from),
            Err(e) => Err(e),
        };
        match refreshed {
            Ok(session) => {
                *self.session.write() = Some(session.clone());
                info!("access token refreshed for {}", session.user.id);
                self.notify(Some(&session));
                Ok(())
            }
            Err(e) => {
                warn!("token refresh failed: {}", e);
                self.expire();
                Err(GatewayError::Auth(SESSION_EXPIRED.to_string()))
            }
        }
    }

    /// Drop the session and tell the listener, once
    fn expire(&self) {
        let had_session = self.session.write().take().is_some();
        if had_session {
            self.notify(None);
        }
    }
}

/// Session token when signed in, else the public key
pub(crate) fn bearer_for(session: Option<&Session>, anon_key: &str) -> String {
    session
        .map(|s| s.access_token.clone())
        .unwrap_or_else(|| anon_key.to_string())
}

/// The gateway refused the bearer token
pub(crate) fn is_unauthorized(err: &GatewayError) -> bool {
    matches!(err, GatewayError::Http { status: 401, .. })
}

async fn error_from_response(response: Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    GatewayError::Http {
        status: status.as_u16(),
        message: extract_message(status, &body),
    }
}

/// Pull the human-readable message out of an error body.
///
/// The auth, rest and storage services each use a different field.
pub(crate) fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod session_tests;
