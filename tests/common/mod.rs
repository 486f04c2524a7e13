use std::net::SocketAddr;

use bookmark_portal::{router, ApiClient, AppState};
use reqwest::{redirect::Policy, Client};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub struct Portal {
    pub address: SocketAddr,
    pub api: MockServer,
    pub client: Client,
}

impl Portal {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }
}

/// Serves the portal on an ephemeral port against a fresh mock api.
pub async fn spawn_portal() -> Portal {
    let api = MockServer::start().await;
    let state = AppState::new(ApiClient::new(&api.uri())).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    let client = Client::builder().redirect(Policy::none()).build().unwrap();

    Portal {
        address,
        api,
        client,
    }
}
