//! Edge Cache - A caching node in front of a single origin server
//!
//! Serves previously fetched origin responses for a fixed TTL and falls
//! back to the origin on a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod origin;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_sweep_task, SweepTask};
