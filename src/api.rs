use reqwest::{header::ACCEPT, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, error};

use crate::{
    error::PortalError,
    media_type,
    models::{Bookmark, ErrorBody, Greeting, NewBookmark, ValidationErrors},
    token::{Credentials, LoginResponse},
};

/// Client for the remote bookmarks API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request_builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, media_type::JSON);

        if let Some(token) = token {
            request_builder = request_builder.bearer_auth(token);
        }

        request_builder
    }

    pub async fn external_login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginResponse, PortalError> {
        let response = self
            .request(Method::POST, "/external-login", None)
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log_error_body("external-login", response).await;
            return Err(PortalError::StatusError(status));
        }

        Ok(response.json::<LoginResponse>().await?)
    }

    pub async fn list_bookmarks(&self, token: &str) -> Result<Vec<Bookmark>, PortalError> {
        let response = self
            .request(Method::GET, "/bookmarks", Some(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log_error_body("bookmarks", response).await;
            return Err(PortalError::StatusError(status));
        }

        Ok(response.json::<Vec<Bookmark>>().await?)
    }

    pub async fn create_bookmark(
        &self,
        token: &str,
        bookmark: &NewBookmark,
    ) -> Result<(), PortalError> {
        let response = self
            .request(Method::POST, "/bookmarks", Some(token))
            .json(bookmark)
            .send()
            .await?;

        let status = response.status();
        // Any JSON body counts as success; its shape varies between API versions.
        if status.is_success() {
            response.json::<IgnoredAny>().await?;
            return Ok(());
        }

        let body = response.json::<ErrorBody>().await?;
        Err(error_from_body(status, body))
    }

    pub async fn greeting(&self) -> Result<Greeting, PortalError> {
        get_json(self.request(Method::GET, "/hi", None)).await
    }
}

async fn get_json<T>(request_builder: RequestBuilder) -> Result<T, PortalError>
where
    T: DeserializeOwned,
{
    let response = request_builder.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PortalError::StatusError(status));
    }

    Ok(response.json::<T>().await?)
}

fn error_from_body(status: StatusCode, body: ErrorBody) -> PortalError {
    match body {
        ErrorBody {
            errors: Some(fields),
            ..
        } if status == StatusCode::UNPROCESSABLE_ENTITY => {
            PortalError::ValidationError(ValidationErrors {
                fields,
                message: None,
            })
        }
        ErrorBody {
            message: Some(message),
            ..
        } => PortalError::ApiError { status, message },
        _ => PortalError::StatusError(status),
    }
}

async fn log_error_body(endpoint: &str, response: Response) {
    let status = response.status();
    match response.text().await {
        Ok(body) => error!(endpoint, %status, body, "api request failed"),
        Err(e) => {
            error!(endpoint, %status, "api request failed");
            debug!("could not read response text: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:8000/api/");

        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn unprocessable_with_errors_is_validation() {
        let mut fields = BTreeMap::new();
        fields.insert("url".to_string(), vec!["invalid".to_string()]);
        let body = ErrorBody {
            errors: Some(fields),
            message: Some("The given data was invalid.".to_string()),
        };

        match error_from_body(StatusCode::UNPROCESSABLE_ENTITY, body) {
            PortalError::ValidationError(errors) => {
                assert_eq!(errors.first("url"), Some("invalid"));
                assert_eq!(errors.message, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unprocessable_without_errors_uses_message() {
        let body = ErrorBody {
            errors: None,
            message: Some("nope".to_string()),
        };

        assert!(matches!(
            error_from_body(StatusCode::UNPROCESSABLE_ENTITY, body),
            PortalError::ApiError { message, .. } if message == "nope"
        ));
    }

    #[test]
    fn other_status_without_message_is_status_error() {
        assert!(matches!(
            error_from_body(StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::default()),
            PortalError::StatusError(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }
}
