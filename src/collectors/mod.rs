//! Metrics Collectors
//!
//! One collector per group of Syncthing endpoints. Each collector queries the REST
//! API, turns the decoded response into line-protocol records and writes them to
//! the shared sink.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` holding the client and the sink
//! - Query the Syncthing API
//! - Build records with a pure `*_line(s)` function (unit tested separately)
//! - Return `Result<()>`; the caller decides how to report a failure
//!
//! # Error Handling
//!
//! Collector failures are non-fatal. [`collect_with_handler`] logs the error at the
//! collector boundary and reports [`CollectionStatus::Failed`], leaving every other
//! collector running.

use crate::error::{error_chain, Result};
use crate::line_protocol::{Line, LineSink};
use crate::syncthing::SyncthingClient;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared context handed to every collector
///
/// Cloning is cheap: the client shares its connection pool and the sink is
/// reference counted, so each spawned task gets its own copy.
#[derive(Clone)]
pub struct CollectionContext {
    /// Syncthing API client for querying endpoints
    pub client: SyncthingClient,
    /// Destination for finished records
    pub sink: Arc<dyn LineSink>,
}

impl CollectionContext {
    pub fn new(client: SyncthingClient, sink: Arc<dyn LineSink>) -> Self {
        Self { client, sink }
    }

    pub fn emit(&self, line: &Line) -> Result<()> {
        self.sink.write_line(line)?;
        Ok(())
    }
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Records were written
    Success,
    /// Collection failed and was already logged
    Failed,
}

/// Top-level collectors launched by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collector {
    Folders,
    Connections,
    Devices,
    Report,
}

impl Collector {
    /// Collectors to run for one invocation; the report is opt-in
    pub fn enabled(use_full_report: bool) -> Vec<Collector> {
        let mut collectors = vec![
            Collector::Folders,
            Collector::Connections,
            Collector::Devices,
        ];
        if use_full_report {
            collectors.push(Collector::Report);
        }
        collectors
    }

    pub fn name(self) -> &'static str {
        match self {
            Collector::Folders => "folders",
            Collector::Connections => "connections",
            Collector::Devices => "devices",
            Collector::Report => "report",
        }
    }

    pub async fn collect(self, ctx: &CollectionContext) -> Result<()> {
        match self {
            Collector::Folders => collect_folder_metrics(ctx).await,
            Collector::Connections => collect_connection_metrics(ctx).await,
            Collector::Devices => collect_device_metrics(ctx).await,
            Collector::Report => collect_report_metrics(ctx).await,
        }
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one collection and log its failure at the boundary
///
/// # Examples
///
/// ```no_run
/// # use syncthing_stats::collectors::*;
/// async fn example(ctx: &CollectionContext) -> CollectionStatus {
///     collect_with_handler("connections", collect_connection_metrics(ctx)).await
/// }
/// ```
pub async fn collect_with_handler<F, E>(name: &str, collection: F) -> CollectionStatus
where
    F: std::future::Future<Output = std::result::Result<(), E>>,
    E: std::error::Error + 'static,
{
    match collection.await {
        Ok(()) => {
            debug!("Collected {} metrics", name);
            CollectionStatus::Success
        }
        Err(e) => {
            error!("Failed to collect {}: {}", name, error_chain(&e));
            CollectionStatus::Failed
        }
    }
}

/// Whether a daemon timestamp carries a real update.
///
/// The daemon reports the epoch (or the zero time) for peers and devices it has
/// never heard from; only instants strictly after the epoch count.
pub fn is_after_epoch(at: &DateTime<Utc>) -> bool {
    match at.timestamp() {
        secs if secs > 0 => true,
        0 => at.timestamp_subsec_nanos() > 0,
        _ => false,
    }
}

/// Seconds elapsed between the epoch and `at`, including the fractional part
pub fn seconds_since_epoch(at: &DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1e9
}

// Collector modules
pub mod connection;
pub mod device;
pub mod folder;
pub mod report;

// Re-export collector functions for convenient access
pub use connection::collect_connection_metrics;
pub use device::collect_device_metrics;
pub use folder::collect_folder_metrics;
pub use report::collect_report_metrics;
