use std::{fmt, time::Duration};

use axum::http::{header::COOKIE, HeaderMap};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COOKIE_PAIR: Regex = Regex::new(r"(?:^|;)\s*([^=;\s]+)\s*=\s*([^;]*)").unwrap();
}

/// Name/value pairs of a `Cookie` request header.
pub struct CookieHeader {
    pub pairs: Vec<(String, String)>,
}

impl CookieHeader {
    pub fn parse(text: &str) -> Self {
        let pairs = COOKIE_PAIR
            .captures_iter(text)
            .filter_map(|c| {
                let name = c.get(1)?.as_str().to_string();
                let value = c.get(2)?.as_str().trim().to_string();
                Some((name, value))
            })
            .collect();

        Self { pairs }
    }

    /// Merges every `Cookie` header of a request, in order.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|text| Self::parse(text).pairs)
            .collect();

        Self { pairs }
    }

    /// First non-empty value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
}

/// A `Set-Cookie` response header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age: Duration,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path={}; Max-Age={}",
            self.name,
            self.value,
            self.path,
            self.max_age.as_secs()
        )?;

        if self.http_only {
            write!(f, "; HttpOnly")?;
        }

        match self.same_site {
            Some(SameSite::Lax) => write!(f, "; SameSite=Lax"),
            None => Ok(()),
        }
    }
}
