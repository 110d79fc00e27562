//! Syncthing REST API Type Definitions
//!
//! Response shapes for the endpoints this tool reads. Only the fields that end up
//! in a record, plus a few identifying ones, are modelled; unknown fields are ignored.
//!
//! # Design Notes
//!
//! - **Missing or `null` fields** decode to their zero value (`#[serde(default)]`
//!   on every struct plus [`null_as_default`] on every field), matching how the
//!   daemon's own Go clients treat them.
//! - **Wrong types** are never coerced: a string where a number is expected fails
//!   the whole decode.
//! - **Timestamps** are RFC 3339 and decode into `DateTime<Utc>`. An absent
//!   timestamp defaults to the Unix epoch, which the collectors treat as "never".
//!
//! # API Endpoints Covered
//!
//! - `rest/config/folders` → `Vec<`[`FolderConfig`]`>`
//! - `rest/db/status?folder=ID` → [`FolderStats`]
//! - `rest/system/connections` → [`Connections`]
//! - `rest/config/devices` → `Vec<`[`DeviceConfig`]`>`
//! - `rest/stats/device` → [`DeviceStats`]
//! - `rest/svc/report` → [`Report`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Decode `null` as the zero value of `T`; any other type mismatch still fails
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Folder entry from `rest/config/folders`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FolderConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rescan_interval_s: i64,
    #[serde(deserialize_with = "null_as_default", rename = "type")]
    pub folder_type: String,
}

/// Live folder status from `rest/db/status`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FolderStats {
    #[serde(deserialize_with = "null_as_default")]
    pub errors: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_bytes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_deleted: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_directories: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_files: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_symlinks: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub global_total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub in_sync_bytes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub in_sync_files: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_bytes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_deleted: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_directories: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_files: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_symlinks: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_bytes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_deletes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_directories: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_files: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_symlinks: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub need_total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pull_errors: i64,
}

/// Connection record, used both for the totals and for each peer
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionStat {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub at: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub client_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub connected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub crypto: String,
    #[serde(deserialize_with = "null_as_default")]
    pub in_bytes_total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub out_bytes_total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub paused: bool,
    #[serde(deserialize_with = "null_as_default", rename = "type")]
    pub transport: String,
}

/// Snapshot from `rest/system/connections`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Connections {
    #[serde(deserialize_with = "null_as_default")]
    pub total: ConnectionStat,
    /// Keyed by peer device ID
    #[serde(deserialize_with = "null_as_default")]
    pub connections: HashMap<String, ConnectionStat>,
}

/// Device entry from `rest/config/devices`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    #[serde(deserialize_with = "null_as_default", rename = "deviceID")]
    pub device_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Per-device statistics from `rest/stats/device`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceStat {
    #[serde(deserialize_with = "null_as_default")]
    pub last_seen: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub last_connection_duration_s: f64,
}

/// `rest/stats/device` keyed by device ID
pub type DeviceStats = HashMap<String, DeviceStat>;

/// Aggregate usage report from `rest/svc/report`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Report {
    #[serde(deserialize_with = "null_as_default", rename = "numFolders")]
    pub num_folders: i64,
    #[serde(deserialize_with = "null_as_default", rename = "numDevices")]
    pub num_devices: i64,
    #[serde(deserialize_with = "null_as_default", rename = "totFiles")]
    pub total_files: i64,
    #[serde(deserialize_with = "null_as_default", rename = "totMiB")]
    pub total_mib: i64,
    #[serde(deserialize_with = "null_as_default", rename = "folderMaxMiB")]
    pub max_folder_mib: i64,
    #[serde(deserialize_with = "null_as_default", rename = "sha256Perf")]
    pub sha256_perf: f64,
    #[serde(deserialize_with = "null_as_default", rename = "hashPerf")]
    pub hash_perf: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: i64,
    #[serde(deserialize_with = "null_as_default", rename = "memoryUsageMiB")]
    pub memory_usage_mib: i64,
}
