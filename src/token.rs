use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const TOKEN_COOKIE: &str = "apiToken";
pub const TOKEN_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub name: String,
}

impl Credentials {
    pub fn from_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name_from_email(email).to_string(),
        }
    }
}

/// Everything before the first `@`, or the whole string.
pub fn name_from_email(email: &str) -> &str {
    email.split_once('@').map_or(email, |(name, _)| name)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}
