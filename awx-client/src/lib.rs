//! Tower HTTP Client
//!
//! A small, type-safe client for the AWX / Ansible Tower REST API,
//! covering exactly what a job-template launch needs: the launch POST,
//! status polling, and the stdout fetch.
//!
//! # Example
//!
//! ```no_run
//! use awx_client::{TowerClient, TowerConfig, PollOptions};
//! use awx_core::launch::{CloudCredentials, LaunchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TowerClient::new(&TowerConfig::new(
//!         "https://tower.example.com",
//!         "admin",
//!         "secret",
//!     ))?;
//!
//!     let request = LaunchRequest::new("42", &CloudCredentials::default(), None, "{}")?;
//!     let launched = client.launch_job(&request).await?;
//!     let record = client.wait_for_job(&launched.url, &PollOptions::default()).await?;
//!     let stdout = client.get_job_stdout(&record).await?;
//!     println!("{stdout}");
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod poll;

pub use error::{ClientError, Result};
pub use poll::PollOptions;

use reqwest::Client;

/// Connection settings for a Tower server.
#[derive(Debug, Clone)]
pub struct TowerConfig {
    /// Base URL of the server (e.g., "https://tower.example.com").
    pub url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Whether to verify the server's TLS certificate. Defaults to
    /// false: the servers this tool targets run with self-signed
    /// certificates, matching the behavior of its predecessor.
    pub verify_tls: bool,
}

impl TowerConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            verify_tls: false,
        }
    }
}

/// HTTP client for the Tower API.
///
/// Constructed once from a [`TowerConfig`] and shared by reference
/// across the sequential launch/poll/fetch stages; never mutated after
/// creation.
#[derive(Debug, Clone)]
pub struct TowerClient {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl TowerClient {
    /// Create a new client from connection settings.
    pub fn new(config: &TowerConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    /// Get the base URL of the server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an API path against the base URL.
    ///
    /// The server returns relative paths (`/api/v2/jobs/7/`) in `url`
    /// and `related` fields; absolute URLs pass through untouched.
    pub(crate) fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated GET request builder.
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Authenticated POST request builder.
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
    }
}
