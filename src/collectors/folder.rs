//! Folder Metrics Collector
//!
//! Lists configured folders, then fetches every folder's status in its own task.
//!
//! # Metrics Produced
//! - `syncthing_folder` - Rescan interval and item/byte counters of one folder
//!   - Tags: folder_id, folder_label

use super::{CollectionContext, CollectionStatus};
use crate::error::{error_chain, Result};
use crate::line_protocol::Line;
use crate::syncthing::types::{FolderConfig, FolderStats};
use futures_util::future::join_all;
use tracing::{debug, error};

/// Build the `syncthing_folder` record for one folder
pub fn folder_line(folder: &FolderConfig, stats: &FolderStats) -> Line {
    Line::new("syncthing_folder")
        .tag("folder_id", &folder.id)
        .tag("folder_label", &folder.label)
        .field("rescanInterval", folder.rescan_interval_s)
        .field("errors", stats.errors)
        .field("global_bytes", stats.global_bytes)
        .field("global_deleted", stats.global_deleted)
        .field("global_directories", stats.global_directories)
        .field("global_files", stats.global_files)
        .field("global_symlinks", stats.global_symlinks)
        .field("global_total_items", stats.global_total_items)
        .field("insync_bytes", stats.in_sync_bytes)
        .field("insync_files", stats.in_sync_files)
        .field("local_bytes", stats.local_bytes)
        .field("local_deleted", stats.local_deleted)
        .field("local_directories", stats.local_directories)
        .field("local_files", stats.local_files)
        .field("local_symlinks", stats.local_symlinks)
        .field("local_total_items", stats.local_total_items)
        .field("need_bytes", stats.need_bytes)
        .field("need_deletes", stats.need_deletes)
        .field("need_directories", stats.need_directories)
        .field("need_files", stats.need_files)
        .field("need_symlinks", stats.need_symlinks)
        .field("need_total_items", stats.need_total_items)
        .field("pull_errors", stats.pull_errors)
}

/// Collects per-folder status metrics
///
/// Fails only if the folder list itself can not be fetched. Each folder's status
/// is fetched in a separately spawned task; a failing folder is logged and the
/// others are still emitted. Returns once every folder task has finished.
pub async fn collect_folder_metrics(ctx: &CollectionContext) -> Result<()> {
    let folders = ctx.client.query_folders().await?;
    let total = folders.len();

    let tasks: Vec<_> = folders
        .into_iter()
        .map(|folder| {
            let ctx = ctx.clone();
            tokio::spawn(async move { collect_folder_status(&ctx, folder).await })
        })
        .collect();

    let mut updated = 0;
    for outcome in join_all(tasks).await {
        match outcome {
            Ok(CollectionStatus::Success) => updated += 1,
            Ok(CollectionStatus::Failed) => { /* Already logged */ }
            Err(e) => error!("Folder status task did not complete: {}", e),
        }
    }

    debug!("Updated {} of {} folders", updated, total);
    Ok(())
}

async fn collect_folder_status(ctx: &CollectionContext, folder: FolderConfig) -> CollectionStatus {
    match emit_folder_status(ctx, &folder).await {
        Ok(()) => CollectionStatus::Success,
        Err(e) => {
            error!("Unable to read status for {}: {}", folder.id, error_chain(&e));
            CollectionStatus::Failed
        }
    }
}

async fn emit_folder_status(ctx: &CollectionContext, folder: &FolderConfig) -> Result<()> {
    let stats = ctx.client.query_folder_status(&folder.id).await?;
    ctx.emit(&folder_line(folder, &stats))
}
