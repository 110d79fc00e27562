//! Device Metrics Collector
//!
//! Joins `rest/config/devices` (for display names) with `rest/stats/device`.
//!
//! # Metrics Produced
//! - `syncthing_device_totals` - Number of devices with statistics
//! - `syncthing_device` - Last seen time and last connection duration
//!   - Tags: device_id, device_name

use super::{is_after_epoch, seconds_since_epoch, CollectionContext};
use crate::error::Result;
use crate::line_protocol::Line;
use crate::syncthing::types::{DeviceConfig, DeviceStats};
use std::collections::HashMap;

/// Device ID → display name. Later entries win on duplicate IDs.
pub fn device_names(configs: Vec<DeviceConfig>) -> HashMap<String, String> {
    configs
        .into_iter()
        .map(|device| (device.device_id, device.name))
        .collect()
}

/// Build the totals record followed by one record per device seen after the epoch
///
/// A device missing from `names` gets an empty `device_name`.
pub fn device_lines(stats: &DeviceStats, names: &HashMap<String, String>) -> Vec<Line> {
    let mut lines = vec![Line::new("syncthing_device_totals").field("number_of_devices", stats.len())];

    let mut seen: Vec<_> = stats
        .iter()
        .filter(|(_, stat)| is_after_epoch(&stat.last_seen))
        .collect();
    seen.sort_by(|a, b| a.0.cmp(b.0));

    lines.extend(seen.into_iter().map(|(device_id, stat)| {
        let name = names.get(device_id).map(String::as_str).unwrap_or_default();
        Line::new("syncthing_device")
            .tag("device_id", device_id)
            .tag("device_name", name)
            .field("last_seen", seconds_since_epoch(&stat.last_seen))
            .field("last_connection_duration", stat.last_connection_duration_s)
    }));
    lines
}

/// Collects device totals and per-device metrics
pub async fn collect_device_metrics(ctx: &CollectionContext) -> Result<()> {
    let names = device_names(ctx.client.query_device_configs().await?);
    let stats = ctx.client.query_device_stats().await?;

    for line in device_lines(&stats, &names) {
        ctx.emit(&line)?;
    }
    Ok(())
}
