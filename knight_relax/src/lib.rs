#![forbid(unsafe_code)]

//! Knight's tour search with a Takefuji–Lee relaxation network.
//!
//! Squares are nodes, legal knight moves are edges ("neurons") carrying an
//! integer state and a binary output. The network is relaxed epoch by epoch,
//! the active edges are checked for a single open path over the whole board,
//! and the network is re-randomised and relaxed again until one is accepted.

/// Version of the canonical serialization in `hashing`.
pub const FORMAT_VERSION: u32 = 1;

pub mod board;
pub mod error;
pub mod domain;
pub mod events;
pub mod graph;
pub mod update;
pub mod engine;
pub mod validator;
pub mod restart;
pub mod invariants;
pub mod hashing;
pub mod render;

pub use domain::{Network, RelaxConfig, RelaxOutcome, TourSolution};
pub use engine::KnightEngine;
pub use error::{KnightError, Result};
