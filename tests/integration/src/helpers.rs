//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests
//! as a named participant.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use lobby_api::{create_app, create_app_state, AppState};
use lobby_common::AppConfig;
use lobby_service::IdleSweeper;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Name of the identity header
pub const USER_HEADER: &str = "user";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let addr = config.api.address();

        let state = create_app_state(config).await?;
        let app = create_app(state.clone())?;

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(&addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            state,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make an anonymous GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request as a participant
    pub async fn get_as(&self, path: &str, user: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(USER_HEADER, user)
            .send()
            .await?)
    }

    /// Make an anonymous POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with JSON body as a participant
    pub async fn post_as<T: Serialize>(&self, path: &str, user: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(USER_HEADER, user)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request without a body as a participant
    pub async fn post_empty_as(&self, path: &str, user: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(USER_HEADER, user)
            .send()
            .await?)
    }

    /// Sweeper bound to this server's store, for driving eviction by hand
    pub fn sweeper(&self) -> IdleSweeper {
        IdleSweeper::new(self.state.shared_context(), &self.state.config().sweeper)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Create a test configuration: in-memory store on an ephemeral local port
pub fn test_config() -> AppConfig {
    AppConfig::in_memory()
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
