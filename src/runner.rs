//! Collection Runner
//!
//! Runs one collection pass: every enabled collector in its own task, all writing
//! to the same sink, and waits for all of them.
//!
//! # Error Handling
//!
//! Collector failures are logged by [`collect_with_handler`] and counted in the
//! returned [`RunSummary`]; they never abort sibling collectors and never change
//! the process exit status.

use crate::collectors::{collect_with_handler, CollectionContext, CollectionStatus, Collector};
use crate::config::Config;
use crate::line_protocol::{LineSink, StdoutSink};
use crate::syncthing::SyncthingClient;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Outcome of one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Collect everything once and print records to standard output
pub async fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let client = SyncthingClient::new(config)?;
    Ok(run_with(client, Arc::new(StdoutSink), config.use_full_report).await)
}

/// Collect everything once into `sink`
pub async fn run_with(
    client: SyncthingClient,
    sink: Arc<dyn LineSink>,
    use_full_report: bool,
) -> RunSummary {
    let ctx = CollectionContext::new(client, sink);
    let mut tasks = JoinSet::new();

    for collector in Collector::enabled(use_full_report) {
        let ctx = ctx.clone();
        tasks.spawn(async move {
            collect_with_handler(collector.name(), collector.collect(&ctx)).await
        });
    }

    let mut summary = RunSummary::default();
    while let Some(outcome) = tasks.join_next().await {
        match outcome {
            Ok(CollectionStatus::Success) => summary.succeeded += 1,
            Ok(CollectionStatus::Failed) => summary.failed += 1,
            Err(e) => {
                error!("Collector task did not complete: {}", e);
                summary.failed += 1;
            }
        }
    }

    debug!(
        "Collection finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    summary
}
