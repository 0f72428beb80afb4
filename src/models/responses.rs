//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::group::Group;

/// Response body for the stats endpoints (GET /stats, GET /stats/:group)
#[derive(Debug, Clone, Serialize)]
pub struct GroupStatsResponse {
    /// Group name
    pub group: String,
    /// Configured byte budget, 0 = unbounded
    pub cache_bytes: usize,
    /// Counters and residency
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / gets)
    pub hit_rate: f64,
}

impl GroupStatsResponse {
    /// Creates a new GroupStatsResponse from a group's current statistics
    pub fn from_group(group: &Group) -> Self {
        let stats = group.stats();
        Self {
            group: group.name().to_string(),
            cache_bytes: group.cache_bytes(),
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
