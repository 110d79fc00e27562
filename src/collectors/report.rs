//! Usage Report Metrics Collector
//!
//! Only runs with `--use-full-report`; the daemon computes the report on demand
//! and walks every folder to do so.
//!
//! # Metrics Produced
//! - `syncthing_report` - Daemon-wide counters and hashing benchmarks

use super::CollectionContext;
use crate::error::Result;
use crate::line_protocol::Line;
use crate::syncthing::types::Report;

pub fn report_line(report: &Report) -> Line {
    Line::new("syncthing_report")
        .field("num_folders", report.num_folders)
        .field("num_devices", report.num_devices)
        .field("total_files", report.total_files)
        .field("total_mib", report.total_mib)
        .field("max_folder_mib", report.max_folder_mib)
        .field("sha256perf", report.sha256_perf)
        .field("hashperf", report.hash_perf)
        .field("uptime", report.uptime)
        .field("memory_usage_mib", report.memory_usage_mib)
}

pub async fn collect_report_metrics(ctx: &CollectionContext) -> Result<()> {
    let report = ctx.client.query_report().await?;
    ctx.emit(&report_line(&report))
}
