//! Drift detection — determinism verification and configuration comparison.

use std::collections::BTreeSet;

use serde::Serialize;

use knight_relax::domain::{Network, RelaxConfig, MAX_DEGREE};
use knight_relax::error::Result;
use knight_relax::graph::{degree_histogram, path_endpoints};

use crate::replay;

/// A move as an ordered pair of squares, smaller square first.
pub type Move = ((usize, usize), (usize, usize));

/// Replay the same configuration twice and assert identical results.
/// Panics on failure.
pub fn verify_determinism(config: &RelaxConfig) -> Result<()> {
    let run1 = replay::rebuild(config)?;
    let run2 = replay::rebuild(config)?;

    if run1.hash != run2.hash || run1.records != run2.records {
        panic!(
            "DETERMINISM FAILURE: two replays produced different results.\n\
             Run 1: {} after {} attempts\n\
             Run 2: {} after {} attempts",
            run1.hash, run1.attempts, run2.hash, run2.attempts
        );
    }
    Ok(())
}

/// Structured comparison of two networks' active edge sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub active_edges_a: i64,
    pub active_edges_b: i64,
    pub active_edges_delta: i64,
    pub endpoints_a: i64,
    pub endpoints_b: i64,
    pub endpoints_delta: i64,
    /// Per active degree 0..=8: count in b minus count in a.
    pub degree_histogram_delta: [i64; MAX_DEGREE + 1],
    /// Active in b only.
    pub activated: Vec<Move>,
    /// Active in a only.
    pub deactivated: Vec<Move>,
}

impl DriftReport {
    pub fn is_identical(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

fn active_moves(network: &Network) -> BTreeSet<Move> {
    network
        .edges
        .iter()
        .filter(|e| e.is_active())
        .map(|e| {
            let a = (network.nodes[e.start].x, network.nodes[e.start].y);
            let b = (network.nodes[e.end].x, network.nodes[e.end].y);
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

/// Compare the active edges of `a` and `b`. The networks need not share an
/// arena layout; edges are matched by their squares.
pub fn compare_networks(a: &Network, b: &Network) -> DriftReport {
    let moves_a = active_moves(a);
    let moves_b = active_moves(b);

    let hist_a = degree_histogram(a);
    let hist_b = degree_histogram(b);
    let mut degree_histogram_delta = [0i64; MAX_DEGREE + 1];
    for (d, slot) in degree_histogram_delta.iter_mut().enumerate() {
        *slot = hist_b[d] as i64 - hist_a[d] as i64;
    }

    let active_a = moves_a.len() as i64;
    let active_b = moves_b.len() as i64;
    let endpoints_a = path_endpoints(a).len() as i64;
    let endpoints_b = path_endpoints(b).len() as i64;

    DriftReport {
        active_edges_a: active_a,
        active_edges_b: active_b,
        active_edges_delta: active_b - active_a,
        endpoints_a,
        endpoints_b,
        endpoints_delta: endpoints_b - endpoints_a,
        degree_histogram_delta,
        activated: moves_b.difference(&moves_a).cloned().collect(),
        deactivated: moves_a.difference(&moves_b).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knight_relax::graph::build_network;

    fn chain(outputs: &[u8]) -> Network {
        build_network(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 2)], outputs)
    }

    #[test]
    fn test_identical_networks_have_no_drift() {
        let report = compare_networks(&chain(&[1, 0]), &chain(&[1, 0]));
        assert!(report.is_identical());
        assert_eq!(report.active_edges_delta, 0);
        assert_eq!(report.degree_histogram_delta, [0; MAX_DEGREE + 1]);
    }

    #[test]
    fn test_activation_reported_by_squares() {
        let report = compare_networks(&chain(&[1, 0]), &chain(&[1, 1]));
        assert_eq!(report.activated, vec![((1, 0), (2, 0))]);
        assert!(report.deactivated.is_empty());
        assert_eq!(report.active_edges_delta, 1);
        // a: degrees [1,1,0]; b: [1,2,1].
        assert_eq!(report.endpoints_a, 2);
        assert_eq!(report.endpoints_b, 2);
        assert_eq!(report.degree_histogram_delta[0], -1);
        assert_eq!(report.degree_histogram_delta[1], 0);
        assert_eq!(report.degree_histogram_delta[2], 1);
    }

    #[test]
    fn test_deactivation_reported() {
        let report = compare_networks(&chain(&[1, 1]), &chain(&[0, 1]));
        assert_eq!(report.deactivated, vec![((0, 0), (1, 0))]);
        assert!(!report.is_identical());
    }
}
