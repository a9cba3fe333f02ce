//! Identity endpoints (`/auth/v1`)

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Method;
use serde_json::json;

use super::SupabaseClient;
use crate::domain::{Identity, Session};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::IdentityService;

/// Auth failures are always surfaced as `Auth`, whatever went wrong
fn as_auth_error(err: GatewayError) -> GatewayError {
    match err {
        GatewayError::Http { message, .. } => GatewayError::Auth(message),
        GatewayError::Transport(message) | GatewayError::Decode(message) => GatewayError::Auth(message),
        other => other,
    }
}

/// Identity answers that mean "no usable session" rather than a failure
fn is_rejected_session(err: &GatewayError) -> bool {
    matches!(err, GatewayError::Auth(_) | GatewayError::Http { status: 401 | 403, .. })
}

#[async_trait(?Send)]
impl IdentityService for SupabaseClient {
    async fn current_user(&self) -> GatewayResult<Option<Identity>> {
        if self.access_token().is_none() {
            return Ok(None);
        }
        let url = self.config.endpoint("auth/v1/user")?;
        match self.send_json::<Identity, _>(|| self.request(Method::GET, url.clone())).await {
            Ok(identity) => Ok(Some(identity)),
            Err(e) if is_rejected_session(&e) => {
                warn!("session rejected by identity service: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> GatewayResult<()> {
        let url = self.config.endpoint("auth/v1/signup")?;
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": display_name },
        });
        let request = self
            .http
            .post(url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&body);
        self.send_once(request).await.map_err(as_auth_error)?;
        info!("signed up {}", email);
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let mut url = self.config.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let body = json!({ "email": email, "password": password });
        // Sign-in is made with the public key, never a stale session token
        let request = self
            .http
            .post(url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&body);
        let response = self.send_once(request).await.map_err(as_auth_error)?;
        let session: Session = response
            .json()
            .await
            .map_err(|e| as_auth_error(GatewayError::from(e)))?;
        *self.session.write() = Some(session.clone());
        info!("signed in as {}", session.user.id);
        Ok(session)
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        let Some(session) = self.session.write().take() else {
            debug!("sign out without a session");
            return Ok(());
        };
        let url = self.config.endpoint("auth/v1/logout")?;
        let request = self
            .http
            .post(url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(session.access_token);
        self.send_once(request).await?;
        Ok(())
    }

    fn restore_session(&self, session: Session) {
        debug!("restoring session for {}", session.user.id);
        *self.session.write() = Some(session);
    }
}
