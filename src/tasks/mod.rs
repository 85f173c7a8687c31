//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the store.
//!
//! # Tasks
//! - Sweep: Removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, SweepTask};
