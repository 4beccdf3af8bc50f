//! Solve session — drives the kernel's outer loop one attempt at a time and
//! keeps a record of every attempt.
//!
//! Attempt order:
//!   1. engine.attempt()  — relax, then validate
//!   2. record the attempt (outcome, active edge set summary, hash)
//!   3. accepted: stop; rejected: engine.restart() and go again
//!
//! The loop is bounded by `RelaxConfig::max_attempts`.

use serde::Serialize;
use tracing::{info, info_span};

use knight_relax::domain::{Network, RelaxConfig, RelaxOutcome, TourSolution, MAX_DEGREE};
use knight_relax::engine::KnightEngine;
use knight_relax::error::{KnightError, Result};
use knight_relax::graph::{degree_histogram, path_endpoints};
use knight_relax::hashing::{canonical_hash, tour_fingerprint};
use knight_relax::render::render_solution;

/// Summary of one relax + validate attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub attempt: u64,
    pub outcome: RelaxOutcome,
    pub accepted: bool,
    pub rejection: Option<String>,
    pub active_edges: usize,
    /// Nodes with exactly one active edge.
    pub endpoints: usize,
    pub degree_histogram: [usize; MAX_DEGREE + 1],
    /// Fingerprint of the active edge set at validation time.
    pub fingerprint: String,
}

/// A single search over one board, from one seed.
pub struct SolveSession {
    engine: KnightEngine,
    records: Vec<AttemptRecord>,
}

impl SolveSession {
    pub fn new(config: RelaxConfig) -> Result<Self> {
        Ok(Self::from_engine(KnightEngine::new(config)?))
    }

    pub fn from_engine(engine: KnightEngine) -> Self {
        Self {
            engine,
            records: Vec::new(),
        }
    }

    /// Relax and validate once, recording the result. Restarts the network
    /// afterwards if the attempt was rejected.
    pub fn run_attempt(&mut self) -> &AttemptRecord {
        let report = self.engine.attempt();
        let network = self.engine.network();
        let record = AttemptRecord {
            attempt: report.attempt,
            outcome: report.outcome,
            accepted: report.accepted,
            rejection: report.rejection,
            active_edges: network.active_edge_count(),
            endpoints: path_endpoints(network).len(),
            degree_histogram: degree_histogram(network),
            fingerprint: tour_fingerprint(network),
        };
        if !record.accepted {
            self.engine.restart();
        }
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Attempt until a tour is accepted or the attempt budget runs out.
    pub fn run(&mut self) -> Result<TourSolution> {
        let config = self.engine.config();
        let span = info_span!("solve", board_size = config.board_size, seed = config.seed);
        let _enter = span.enter();

        loop {
            if !self.engine.can_attempt() {
                info!(attempts = self.engine.attempts(), "attempt budget exhausted");
                return Err(KnightError::AttemptsExhausted {
                    attempts: self.engine.attempts(),
                });
            }
            let (accepted, attempt, outcome) = {
                let record = self.run_attempt();
                (record.accepted, record.attempt, record.outcome)
            };
            if accepted {
                return Ok(TourSolution {
                    attempts: attempt,
                    outcome,
                    hash: canonical_hash(self.engine.network()),
                });
            }
        }
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn network(&self) -> &Network {
        self.engine.network()
    }

    pub fn engine(&self) -> &KnightEngine {
        &self.engine
    }

    pub fn config(&self) -> &RelaxConfig {
        self.engine.config()
    }

    pub fn current_hash(&self) -> String {
        canonical_hash(self.engine.network())
    }

    /// Solution text in the configured position encoding.
    pub fn render(&self) -> String {
        render_solution(self.engine.network(), self.engine.config().encoding)
    }
}
