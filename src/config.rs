use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::PortalError;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self, PortalError> {
        Ok(Self {
            host: try_load("PORTAL_HOST", "0.0.0.0")?,
            port: try_load("PORTAL_PORT", "3000")?,
            api_url: try_load::<String>("PORTAL_API_URL", "http://localhost:8000/api")?
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, PortalError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        PortalError::ConfigError(format!("{key}={value}: {e}"))
    })
}
