use crate::cli::Args;
use crate::error::{ExporterError, Result};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Per-request timeout applied to every call against the REST API
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the daemon's REST API, e.g. `http://localhost:8384`
    pub server: String,
    pub api_key: SecretString,
    pub use_full_report: bool,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(server: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            api_key: SecretString::from(api_key.into()),
            use_full_report: false,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Build the configuration from parsed flags.
    ///
    /// An empty API key is the only fatal configuration error; the server URL is
    /// not checked here and a malformed one fails each request on its own.
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = Self::new(args.server, args.apikey);
        config.use_full_report = args.use_full_report;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ExporterError::Config("Invalid API key".to_string()));
        }
        Ok(())
    }
}
