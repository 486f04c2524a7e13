use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    api::ApiClient,
    error::PortalError,
    models::{Bookmark, NewBookmark, ValidationErrors},
    token_store::TokenStore,
};

pub const FETCH_FAILED: &str = "An error occurred while fetching bookmarks";
pub const CREATE_FAILED: &str = "Failed to create bookmark. Please try again.";
pub const URL_REQUIRED: &str = "Please fill out this field.";

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Unauthenticated,
    Authenticated {
        bookmarks: Vec<Bookmark>,
        error: Option<String>,
    },
}

/// Lists the bookmarks of the token holder. Without a token no request is made.
pub async fn load<S: TokenStore>(client: &ApiClient, store: &S) -> Dashboard {
    let Some(token) = store.get() else {
        return Dashboard::Unauthenticated;
    };

    match client.list_bookmarks(&token).await {
        Ok(bookmarks) => Dashboard::Authenticated {
            bookmarks,
            error: None,
        },
        Err(PortalError::StatusError(status)) => Dashboard::Authenticated {
            bookmarks: Vec::new(),
            error: Some(
                format!(
                    "Failed to fetch bookmarks: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_string(),
            ),
        },
        Err(e) => {
            error!("fetching bookmarks failed: {}", e);
            Dashboard::Authenticated {
                bookmarks: Vec::new(),
                error: Some(FETCH_FAILED.to_string()),
            }
        }
    }
}

/// Values of the "add bookmark" form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl BookmarkForm {
    /// `None` when the required url is missing.
    pub fn to_new_bookmark(&self) -> Option<NewBookmark> {
        if self.url.is_empty() {
            return None;
        }

        Some(NewBookmark::new(&self.url, Some(&self.title)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created,
    Rejected {
        form: BookmarkForm,
        errors: ValidationErrors,
    },
    Unauthenticated,
}

pub async fn submit<S: TokenStore>(
    client: &ApiClient,
    store: &S,
    form: BookmarkForm,
) -> SubmitOutcome {
    let Some(token) = store.get() else {
        return SubmitOutcome::Unauthenticated;
    };

    let Some(new_bookmark) = form.to_new_bookmark() else {
        return SubmitOutcome::Rejected {
            form,
            errors: ValidationErrors::field("url", URL_REQUIRED),
        };
    };

    let errors = match client.create_bookmark(&token, &new_bookmark).await {
        Ok(()) => {
            info!("created bookmark for {}", new_bookmark.url);
            return SubmitOutcome::Created;
        }
        Err(PortalError::ValidationError(errors)) => errors,
        Err(PortalError::ApiError { message, .. }) => ValidationErrors::message(message),
        Err(e) => {
            error!("failed to create bookmark: {}", e);
            ValidationErrors::message(CREATE_FAILED)
        }
    };

    SubmitOutcome::Rejected { form, errors }
}
