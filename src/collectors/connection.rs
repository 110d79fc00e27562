//! Connection Metrics Collector
//!
//! # Metrics Produced
//! - `syncthing_connection_totals` - Number of known peers and total traffic
//! - `syncthing_connection` - Traffic and state of a single peer
//!   - Tags: client_id
//!
//! Peers whose `at` timestamp is not after the Unix epoch have never reported
//! anything and are skipped.

use super::{is_after_epoch, CollectionContext};
use crate::error::Result;
use crate::line_protocol::Line;
use crate::syncthing::types::Connections;

/// Build the totals record followed by one record per updated peer
///
/// Peers are emitted in device ID order.
pub fn connection_lines(connections: &Connections) -> Vec<Line> {
    let total = &connections.total;
    let mut lines = vec![Line::new("syncthing_connection_totals")
        .field("number_of_connections", connections.connections.len())
        .field("in_bytes", total.in_bytes_total)
        .field("out_bytes", total.out_bytes_total)
        .field("paused", total.paused)];

    let mut peers: Vec<_> = connections
        .connections
        .iter()
        .filter(|(_, stat)| is_after_epoch(&stat.at))
        .collect();
    peers.sort_by(|a, b| a.0.cmp(b.0));

    lines.extend(peers.into_iter().map(|(peer_id, stat)| {
        Line::new("syncthing_connection")
            .tag("client_id", peer_id)
            .field("connected", stat.connected)
            .field("paused", stat.paused)
            .field("in_bytes", stat.in_bytes_total)
            .field("out_bytes", stat.out_bytes_total)
    }));
    lines
}

/// Collects connection totals and per-peer connection metrics
pub async fn collect_connection_metrics(ctx: &CollectionContext) -> Result<()> {
    let connections = ctx.client.query_connections().await?;
    for line in connection_lines(&connections) {
        ctx.emit(&line)?;
    }
    Ok(())
}
