use tracing::{error, info, warn};

use crate::{
    api::ApiClient,
    error::PortalError,
    token::{Credentials, LoginResponse, TOKEN_MAX_AGE},
    token_store::TokenStore,
};

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const NO_TOKEN_RECEIVED: &str = "Invalid response - no token received";

pub const DEFAULT_LOGIN_EMAIL: &str = "john@example.com";
pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_NAME: &str = "Fake User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Failed(String),
}

/// Exchanges `email` for a token and persists it in `store`.
pub async fn login<S: TokenStore>(client: &ApiClient, store: &mut S, email: &str) -> LoginOutcome {
    let credentials = Credentials::from_email(email);

    let response = match client.external_login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            error!("login failed for {}: {}", credentials.email, e);
            return LoginOutcome::Failed(LOGIN_FAILED.to_string());
        }
    };

    let Some(token) = response.token() else {
        warn!("login response for {} had no token", credentials.email);
        return LoginOutcome::Failed(NO_TOKEN_RECEIVED.to_string());
    };

    match store.set(token, TOKEN_MAX_AGE) {
        Ok(()) => {
            info!("logged in as {}", credentials.name);
            LoginOutcome::LoggedIn
        }
        Err(e) => {
            error!("could not store token: {}", e);
            LoginOutcome::Failed(LOGIN_FAILED.to_string())
        }
    }
}

/// Logs in as the demo user and stores the token when one is returned.
pub async fn generate_token<S: TokenStore>(
    client: &ApiClient,
    store: &mut S,
) -> Result<LoginResponse, PortalError> {
    let credentials = Credentials {
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
    };

    let response = client.external_login(&credentials).await?;

    if let Some(token) = response.token() {
        store.set(token, TOKEN_MAX_AGE)?;
        info!("generated api token for {}", DEMO_EMAIL);
    }

    Ok(response)
}
