use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::{
    api::ApiClient,
    auth::{self, LoginOutcome, DEFAULT_LOGIN_EMAIL},
    config::Config,
    dashboard::{self, BookmarkForm, SubmitOutcome},
    error::PortalError,
    token_store::{CookieFlavor, RequestTokens, TokenJar},
    views::{DashboardPage, Views},
};

pub struct AppState {
    pub client: ApiClient,
    pub views: Views,
}

impl AppState {
    pub fn new(client: ApiClient) -> Result<Arc<Self>, PortalError> {
        Ok(Arc::new(Self {
            client,
            views: Views::new()?,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(greeting_page))
        .route("/sanctum", get(login_page).post(login_submit))
        .route("/dashboard", get(dashboard_page))
        .route("/dashboard/bookmarks", post(create_bookmark))
        .route("/dashboard/token", post(generate_token))
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), PortalError> {
    info!("Using api at {}", config.api_url);
    let state = AppState::new(ApiClient::new(&config.api_url))?;

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn greeting_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, PortalError> {
    let greeting = state.client.greeting().await?;
    state.views.greeting(&greeting)
}

async fn login_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, PortalError> {
    state.views.login(DEFAULT_LOGIN_EMAIL, None)
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    email: String,
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, PortalError> {
    let mut jar = TokenJar::new(&headers, CookieFlavor::SameSiteLax);

    match auth::login(&state.client, &mut jar, &form.email).await {
        // The cookie rides on the redirect itself, so it is stored before navigation.
        LoginOutcome::LoggedIn => Ok((jar, Redirect::to("/dashboard")).into_response()),
        LoginOutcome::Failed(error) => {
            Ok(state.views.login(&form.email, Some(error.as_str()))?.into_response())
        }
    }
}

#[derive(Deserialize)]
struct DashboardQuery {
    created: Option<String>,
}

async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, PortalError> {
    let store = RequestTokens::from_headers(&headers);

    let mut page = DashboardPage::new(dashboard::load(&state.client, &store).await);
    page.created = query.created.is_some();

    state.views.dashboard(&page)
}

async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<BookmarkForm>,
) -> Result<Response, PortalError> {
    let store = RequestTokens::from_headers(&headers);

    match dashboard::submit(&state.client, &store, form).await {
        SubmitOutcome::Created => Ok(Redirect::to("/dashboard?created=1").into_response()),
        SubmitOutcome::Unauthenticated => {
            warn!("bookmark submitted without a token");
            Ok(Redirect::to("/dashboard").into_response())
        }
        SubmitOutcome::Rejected { form, errors } => {
            let mut page = DashboardPage::new(dashboard::load(&state.client, &store).await);
            page.form = form;
            page.errors = errors;

            Ok(state.views.dashboard(&page)?.into_response())
        }
    }
}

async fn generate_token(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let mut jar = TokenJar::new(&headers, CookieFlavor::HttpOnly);

    if let Err(e) = auth::generate_token(&state.client, &mut jar).await {
        warn!("generating api token failed: {}", e);
    }

    (jar, Redirect::to("/dashboard")).into_response()
}
