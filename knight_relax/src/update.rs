/// Knight relaxation network — Neuron Update Engine
///
/// Takefuji–Lee rule, applied in place:
///   state  <- state + 2 - sum(current outputs of neighbor edges)
///   output <- 1 if state > 3, 0 if state < 0, unchanged otherwise
///
/// Updates are sequential. A neighbor processed earlier in the same epoch is
/// read with its new output, so the sweep order is part of the result.

use crate::domain::{Edge, EdgeId, Network};
use crate::events::RelaxEvent;

pub const SELF_EXCITATION: i64 = 2;
/// Output switches on strictly above this state.
pub const UPPER_THRESHOLD: i64 = 3;
/// Output switches off strictly below this state.
pub const LOWER_THRESHOLD: i64 = 0;

/// What a single `update_edge` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeUpdate {
    /// Already updated this epoch; nothing happened.
    pub skipped: bool,
    pub state_changed: bool,
    pub output_flipped: bool,
}

/// Per-epoch summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EpochReport {
    pub updates: usize,
    pub state_changes: usize,
    pub output_flips: usize,
}

impl EpochReport {
    pub fn changed(&self) -> bool {
        self.state_changes > 0
    }
}

/// Start-of-epoch bookkeeping. Idempotent within an epoch.
pub fn reset_edge(edge: &mut Edge) {
    edge.updated = false;
    edge.prev_output = edge.output;
    edge.prev_state = edge.state;
}

/// Apply the update rule to `edges[id]`, at most once per epoch.
pub fn update_edge(edges: &mut [Edge], id: EdgeId) -> EdgeUpdate {
    if edges[id].updated {
        return EdgeUpdate {
            skipped: true,
            ..Default::default()
        };
    }

    let excitation: i64 = edges[id]
        .neighbors
        .iter()
        .map(|&nb| i64::from(edges[nb].output))
        .sum();

    let edge = &mut edges[id];
    edge.state += SELF_EXCITATION - excitation;
    if edge.state > UPPER_THRESHOLD {
        edge.output = 1;
    } else if edge.state < LOWER_THRESHOLD {
        edge.output = 0;
    }
    edge.updated = true;

    EdgeUpdate {
        skipped: false,
        state_changed: edge.state != edge.prev_state,
        output_flipped: edge.output != edge.prev_output,
    }
}

/// One full epoch: reset every edge, then update every edge, both walking
/// nodes in sweep order and each node's incident edges in creation order.
pub fn run_epoch(network: &mut Network) -> EpochReport {
    let Network {
        nodes, edges, sweep, ..
    } = network;

    for &node in sweep.iter() {
        for &e in &nodes[node].edges {
            reset_edge(&mut edges[e]);
        }
    }

    let mut report = EpochReport::default();
    for &node in sweep.iter() {
        for &e in &nodes[node].edges {
            let upd = update_edge(edges, e);
            if upd.skipped {
                continue;
            }
            report.updates += 1;
            if upd.state_changed {
                report.state_changes += 1;
            }
            if upd.output_flipped {
                report.output_flips += 1;
                RelaxEvent::OutputFlipped {
                    edge: e,
                    output: edges[e].output,
                }
                .emit();
            }
        }
    }
    report
}
