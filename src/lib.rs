//! Syncthing Stats for Telegraf
//!
//! Polls a local Syncthing daemon's REST API once and prints its operational
//! metrics as InfluxDB line protocol, ready for a Telegraf `exec` input.
//!
//! # Overview
//!
//! Each run queries folder status, peer connections, device statistics and,
//! optionally, the usage report. The endpoint groups are collected concurrently
//! and every finished record is written to stdout as one line. Failures are
//! logged to stderr and never stop the other collectors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     HTTP GET       ┌──────────────────┐
//! │  Syncthing  │ ◄────────────────► │  syncthing-stats │
//! │   daemon    │   X-API-Key, JSON  │                  │
//! └─────────────┘                    │  ┌────────────┐  │     stdout      ┌──────────┐
//!                                    │  │ Collectors │──┼───────────────► │ Telegraf │
//!                                    │  └────────────┘  │  line protocol  └──────────┘
//!                                    └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`syncthing`] - REST client and API type definitions
//! - [`collectors`] - One collector per endpoint group
//! - [`line_protocol`] - Record formatting and output sinks
//! - [`runner`] - Concurrent collection pass
//! - [`cli`] / [`config`] - Flags and validated configuration
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use syncthing_stats::{config::Config, runner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new("http://localhost:8384", "your-api-key");
//!     runner::run(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod line_protocol;
pub mod runner;
pub mod syncthing;
