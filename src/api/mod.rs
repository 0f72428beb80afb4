//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /api/:group/:key` - Fetch a value through a group
//! - `GET /stats` - Statistics for all groups
//! - `GET /stats/:group` - Statistics for one group
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
