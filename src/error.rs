use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("unable to create HTTP request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{path} returned {status}")]
    UnexpectedStatus {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid response body from {path}: {source}")]
    InvalidResponseBody {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;

/// Render an error followed by every distinct cause in its source chain.
///
/// reqwest keeps the actual reason ("connection refused", "dns error") a few
/// levels down. Causes whose text already appears are skipped.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
