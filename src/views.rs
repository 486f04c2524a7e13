use axum::response::Html;
use chrono::DateTime;
use minijinja::{context, Environment, Value};
use reqwest::Url;
use serde::Serialize;

use crate::{
    dashboard::{BookmarkForm, Dashboard},
    error::PortalError,
    models::{Bookmark, Greeting, ValidationErrors},
};

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, PortalError> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template("greeting.html", include_str!("../templates/greeting.html"))?;
        env.add_template("login.html", include_str!("../templates/login.html"))?;
        env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
        env.add_filter("date", added_on);
        env.add_filter("href", link_target);

        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, PortalError> {
        Ok(Html(self.env.get_template(name)?.render(ctx)?))
    }

    pub fn greeting(&self, greeting: &Greeting) -> Result<Html<String>, PortalError> {
        self.render("greeting.html", context! { greeting })
    }

    pub fn login(&self, email: &str, error: Option<&str>) -> Result<Html<String>, PortalError> {
        self.render("login.html", context! { email, error })
    }

    pub fn dashboard(&self, page: &DashboardPage) -> Result<Html<String>, PortalError> {
        let (authenticated, bookmarks, error) = match &page.dashboard {
            Dashboard::Unauthenticated => (false, &[] as &[Bookmark], None),
            Dashboard::Authenticated { bookmarks, error } => {
                (true, bookmarks.as_slice(), error.as_deref())
            }
        };

        self.render(
            "dashboard.html",
            context! {
                authenticated,
                bookmarks,
                error,
                created => page.created,
                form => &page.form,
                form_message => page.errors.message.as_deref(),
                url_error => page.errors.first("url"),
                title_error => page.errors.first("title"),
            },
        )
    }
}

/// Everything the dashboard template shows for one render.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub dashboard: Dashboard,
    pub form: BookmarkForm,
    pub errors: ValidationErrors,
    pub created: bool,
}

impl DashboardPage {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            form: BookmarkForm::default(),
            errors: ValidationErrors::default(),
            created: false,
        }
    }
}

/// Formats an API timestamp as `M/D/YYYY`, leaving unparsable input untouched.
fn added_on(value: String) -> Value {
    match DateTime::parse_from_rfc3339(&value) {
        // Digits and slashes only.
        Ok(date) => Value::from_safe_string(date.format("%-m/%-d/%Y").to_string()),
        Err(_) => Value::from(value),
    }
}

/// Only absolute http(s) urls become links.
fn link_target(value: String) -> String {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => value,
        _ => "#".to_string(),
    }
}
