//! Replay — rebuild a search from its configuration.
//!
//! A session is a pure function of its `RelaxConfig` (the seed drives every
//! random draw), so replaying the same configuration must land on the same
//! final network.

use serde::Serialize;

use knight_relax::domain::RelaxConfig;
use knight_relax::error::{KnightError, Result};
use knight_relax::hashing::{canonical_hash, tour_fingerprint};

use crate::session::{AttemptRecord, SolveSession};

/// Final state of a replayed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    pub solved: bool,
    pub attempts: u64,
    /// Canonical hash of the final network (states and outputs).
    pub hash: String,
    /// Fingerprint of the final active edge set.
    pub fingerprint: String,
    pub records: Vec<AttemptRecord>,
}

/// Run a fresh session for `config` to completion.
///
/// Running out of attempts is a normal outcome here and is reported through
/// `solved`; any other error is returned.
pub fn rebuild(config: &RelaxConfig) -> Result<ReplayResult> {
    let mut session = SolveSession::new(config.clone())?;
    let solved = match session.run() {
        Ok(_) => true,
        Err(KnightError::AttemptsExhausted { .. }) => false,
        Err(e) => return Err(e),
    };
    Ok(ReplayResult {
        solved,
        attempts: session.engine().attempts(),
        hash: canonical_hash(session.network()),
        fingerprint: tour_fingerprint(session.network()),
        records: session.records().to_vec(),
    })
}

/// Rebuild and return only the final canonical hash.
pub fn rebuild_hash(config: &RelaxConfig) -> Result<String> {
    Ok(rebuild(config)?.hash)
}
