//! Syncthing REST API Client
//!
//! Thin wrapper over a single `reqwest::Client` that performs authenticated,
//! single-attempt GET requests against the daemon's management API.
//!
//! # Architecture
//!
//! - **Transport**: plain HTTP(S) GET to `{server}/{path}`
//! - **Authentication**: static `X-API-Key` header on every request
//! - **Timeout**: fixed per request (see [`crate::config::REQUEST_TIMEOUT`]), no retries
//!
//! # Example
//!
//! ```no_run
//! use syncthing_stats::config::Config;
//! use syncthing_stats::syncthing::SyncthingClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::new("http://localhost:8384", "your-api-key");
//! let client = SyncthingClient::new(&config)?;
//! let folders = client.query_folders().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::error::{ExporterError, Result};
use crate::syncthing::types::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const FOLDERS_PATH: &str = "rest/config/folders";
pub const FOLDER_STATUS_PATH: &str = "rest/db/status";
pub const CONNECTIONS_PATH: &str = "rest/system/connections";
pub const DEVICES_PATH: &str = "rest/config/devices";
pub const DEVICE_STATS_PATH: &str = "rest/stats/device";
pub const REPORT_PATH: &str = "rest/svc/report";

/// Client for the Syncthing REST API
///
/// Cheap to clone; clones share the underlying connection pool, so one instance
/// can be handed to every concurrently running collector.
#[derive(Debug, Clone)]
pub struct SyncthingClient {
    http: Client,
    server: String,
    api_key: SecretString,
}

impl SyncthingClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ExporterError::RequestConstruction)?;

        Ok(Self {
            http,
            server: config.server.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Perform `GET {server}/{path}` once and return the body of a successful response
    ///
    /// # Errors
    ///
    /// - [`ExporterError::RequestConstruction`] if the URL or header value is invalid
    /// - [`ExporterError::Transport`] on connection failure, timeout or a broken body
    /// - [`ExporterError::UnexpectedStatus`] on any non-2xx status
    pub async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let mut builder = self
            .http
            .get(url)
            .header("X-API-Key", self.api_key.expose_secret());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let request = builder.build().map_err(ExporterError::RequestConstruction)?;

        debug!(url = %request.url(), "GET");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(ExporterError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::UnexpectedStatus {
                path: path.to_string(),
                status,
            });
        }

        response.text().await.map_err(ExporterError::Transport)
    }

    async fn fetch_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.fetch(path, query).await?;
        decode(path, &body)
    }

    /// Query configured folders
    pub async fn query_folders(&self) -> Result<Vec<FolderConfig>> {
        self.fetch_json(FOLDERS_PATH, &[]).await
    }

    /// Query the live status of one folder
    pub async fn query_folder_status(&self, folder_id: &str) -> Result<FolderStats> {
        self.fetch_json(FOLDER_STATUS_PATH, &[("folder", folder_id)])
            .await
    }

    pub async fn query_connections(&self) -> Result<Connections> {
        self.fetch_json(CONNECTIONS_PATH, &[]).await
    }

    pub async fn query_device_configs(&self) -> Result<Vec<DeviceConfig>> {
        self.fetch_json(DEVICES_PATH, &[]).await
    }

    pub async fn query_device_stats(&self) -> Result<DeviceStats> {
        self.fetch_json(DEVICE_STATS_PATH, &[]).await
    }

    /// Query the usage report. Expensive on the daemon side.
    pub async fn query_report(&self) -> Result<Report> {
        self.fetch_json(REPORT_PATH, &[]).await
    }
}

/// Strictly decode a response body; no partial recovery
///
/// A `null` document decodes to the zero value of `T`, like `null` fields do.
pub fn decode<T>(path: &str, body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    serde_json::from_str::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|source| ExporterError::InvalidResponseBody {
            path: path.to_string(),
            source,
        })
}
