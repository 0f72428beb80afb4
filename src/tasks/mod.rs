//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats Reporter: Logs every group's statistics at configured intervals

mod reporter;

pub use reporter::spawn_stats_reporter;
