//! Access to the `apiToken` cookie.
//!
//! Pages read the token through [`RequestTokens`], which only sees the
//! incoming `Cookie` header. Flows that log the user in write it through a
//! [`TokenJar`], which queues `Set-Cookie` headers for the response.

use std::{convert::Infallible, time::Duration};

use axum::{
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponseParts, ResponseParts},
};
use tracing::warn;

use crate::{
    cookie::{CookieHeader, SameSite, SetCookie},
    error::PortalError,
    token::TOKEN_COOKIE,
};

pub trait TokenStore {
    fn get(&self) -> Option<String>;

    fn set(&mut self, token: &str, max_age: Duration) -> Result<(), PortalError>;
}

/// Read-only, scoped to a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    token: Option<String>,
}

impl RequestTokens {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = CookieHeader::from_headers(headers)
            .get(TOKEN_COOKIE)
            .map(str::to_string);

        Self { token }
    }
}

impl TokenStore for RequestTokens {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, _token: &str, _max_age: Duration) -> Result<(), PortalError> {
        Err(PortalError::ReadOnlyStoreError)
    }
}

/// Cookie attributes used when the jar writes the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieFlavor {
    /// Written by a server action, hidden from scripts.
    HttpOnly,
    /// Written by the interactive login form.
    SameSiteLax,
}

#[derive(Debug, Clone)]
pub struct TokenJar {
    current: Option<String>,
    flavor: CookieFlavor,
    pending: Vec<SetCookie>,
}

impl TokenJar {
    pub fn new(headers: &HeaderMap, flavor: CookieFlavor) -> Self {
        Self {
            current: RequestTokens::from_headers(headers).token,
            flavor,
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[SetCookie] {
        &self.pending
    }
}

impl TokenStore for TokenJar {
    fn get(&self) -> Option<String> {
        self.current.clone()
    }

    fn set(&mut self, token: &str, max_age: Duration) -> Result<(), PortalError> {
        if token.contains(|c: char| c == ';' || c == ',' || c.is_whitespace() || c.is_control())
        {
            return Err(PortalError::InvalidTokenError(token.to_string()));
        }

        let cookie = SetCookie {
            name: TOKEN_COOKIE.to_string(),
            value: token.to_string(),
            path: "/".to_string(),
            max_age,
            http_only: self.flavor == CookieFlavor::HttpOnly,
            same_site: match self.flavor {
                CookieFlavor::HttpOnly => None,
                CookieFlavor::SameSiteLax => Some(SameSite::Lax),
            },
        };

        HeaderValue::from_str(&cookie.to_string())
            .map_err(|_| PortalError::InvalidTokenError(token.to_string()))?;

        self.current = Some(token.to_string());
        self.pending.push(cookie);

        Ok(())
    }
}

impl IntoResponseParts for TokenJar {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.pending {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("dropping unencodable cookie {}: {}", cookie.name, e),
            }
        }

        Ok(res)
    }
}
