//! Sign-up, sign-in and sign-out
//!
//! These are the only operations whose failures reach the user.

use log::{info, warn};

use crate::domain::Session;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::IdentityService;

fn require(value: &str, what: &str) -> GatewayResult<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::Auth(format!("{} is required", what)));
    }
    Ok(())
}

pub async fn sign_up<A>(auth: &A, email: &str, password: &str, display_name: &str) -> GatewayResult<()>
where
    A: IdentityService + ?Sized,
{
    require(display_name, "Full name")?;
    require(email, "Email")?;
    require(password, "Password")?;
    auth.sign_up(email.trim(), password, display_name.trim()).await
}

/// Start a session; the caller keeps it and hands it to whoever needs it
pub async fn sign_in<A>(auth: &A, email: &str, password: &str) -> GatewayResult<Session>
where
    A: IdentityService + ?Sized,
{
    require(email, "Email")?;
    require(password, "Password")?;
    let session = auth.sign_in(email.trim(), password).await?;
    info!("session started for {}", session.display_name());
    Ok(session)
}

/// End the session. Remote failures are logged; locally the user is out.
pub async fn sign_out<A>(auth: &A)
where
    A: IdentityService + ?Sized,
{
    if let Err(e) = auth.sign_out().await {
        warn!("remote sign out failed: {}", e);
    }
}
