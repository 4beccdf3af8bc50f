#![forbid(unsafe_code)]

//! Knight tour runtime.
//!
//! Wraps the `knight_relax` kernel with configuration loading, solve
//! sessions that keep a record per attempt, seed replay and drift reports.
//!
//! No network dynamics live here; relaxation, validation and restarts are
//! delegated to the kernel.

pub mod config;
pub mod session;
pub mod replay;
pub mod drift;
