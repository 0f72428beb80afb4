//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::group::{DirLoader, Loader, Registry};
use crate::models::{GroupStatsResponse, HealthResponse};

/// Application state shared across all handlers.
///
/// Groups synchronize internally, so the registry is shared without an outer lock.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Registers the configured group backed by a [`DirLoader`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Registry::new();
        let loader: Arc<dyn Loader> = Arc::new(DirLoader::new(&config.data_dir));
        registry.register(&config.group_name, config.cache_bytes, Some(loader))?;
        Ok(Self::new(Arc::new(registry)))
    }
}

/// Handler for GET /api/:group/:key
///
/// Returns the raw value bytes. The lookup runs on the blocking pool because
/// loaders and peers may block.
pub async fn get_value_handler(
    State(state): State<AppState>,
    Path((group_name, key)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let group = state
        .registry
        .get(&group_name)
        .ok_or(CacheError::GroupNotFound(group_name))?;

    let value = tokio::task::spawn_blocking(move || group.get(&key))
        .await
        .map_err(|err| CacheError::Internal(err.to_string()))??;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        value.byte_slice(),
    ))
}

/// Handler for GET /stats
///
/// Returns statistics for every registered group.
pub async fn stats_handler(State(state): State<AppState>) -> Json<Vec<GroupStatsResponse>> {
    let stats = state
        .registry
        .names()
        .iter()
        .filter_map(|name| state.registry.get(name))
        .map(|group| GroupStatsResponse::from_group(&group))
        .collect();

    Json(stats)
}

/// Handler for GET /stats/:group
pub async fn group_stats_handler(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
) -> Result<Json<GroupStatsResponse>> {
    let group = state
        .registry
        .get(&group_name)
        .ok_or(CacheError::GroupNotFound(group_name))?;

    Ok(Json(GroupStatsResponse::from_group(&group)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::LoaderFn;

    fn test_state() -> AppState {
        let registry = Registry::new();
        let loader: Arc<dyn Loader> = Arc::new(LoaderFn::new(|key: &str| {
            if key == "missing" {
                anyhow::bail!("{} not exist", key);
            }
            Ok(format!("value-{}", key).into_bytes())
        }));
        registry.register("scores", 1024, Some(loader)).unwrap();
        AppState::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_get_value_handler() {
        let state = test_state();

        let result = get_value_handler(
            State(state.clone()),
            Path(("scores".to_string(), "tom".to_string())),
        )
        .await;
        assert!(result.is_ok());

        let stats = group_stats_handler(State(state), Path("scores".to_string()))
            .await
            .unwrap();
        assert_eq!(stats.stats.local_loads, 1);
        assert_eq!(stats.stats.entries, 1);
    }

    #[tokio::test]
    async fn test_get_value_unknown_group() {
        let state = test_state();

        let result = get_value_handler(
            State(state),
            Path(("nope".to_string(), "tom".to_string())),
        )
        .await;
        assert!(matches!(result, Err(CacheError::GroupNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_value_loader_error() {
        let state = test_state();

        let result = get_value_handler(
            State(state),
            Path(("scores".to_string(), "missing".to_string())),
        )
        .await;
        assert!(matches!(result, Err(CacheError::Loader(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.len(), 1);
        assert_eq!(response[0].group, "scores");
        assert_eq!(response[0].stats.gets, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_registers_group() {
        let config = Config::default();
        let state = AppState::from_config(&config).unwrap();

        assert!(state.registry.get(&config.group_name).is_some());
    }
}
