//! Stats Reporter Task
//!
//! Background task that periodically logs every group's statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::group::Registry;

/// Spawns a background task that logs group statistics at a fixed interval.
///
/// # Arguments
/// * `registry` - Registry whose groups are reported
/// * `interval_secs` - Interval in seconds between reports (minimum 1)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let registry = Arc::new(Registry::new());
/// let reporter = spawn_stats_reporter(registry.clone(), 60);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter(registry: Arc<Registry>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;
            report(&registry);
        }
    })
}

/// Logs one line per group; returns the number of groups reported.
fn report(registry: &Registry) -> usize {
    let names = registry.names();
    if names.is_empty() {
        debug!("Stats reporter: no groups registered");
    }

    for group in names.iter().filter_map(|name| registry.get(name)) {
        let stats = group.stats();
        info!(
            group = group.name(),
            gets = stats.gets,
            hits = stats.hits,
            hit_rate = stats.hit_rate(),
            peer_loads = stats.peer_loads,
            peer_errors = stats.peer_errors,
            local_loads = stats.local_loads,
            evictions = stats.evictions,
            entries = stats.entries,
            used_bytes = stats.used_bytes,
            "group stats"
        );
    }
    names.len()
}
