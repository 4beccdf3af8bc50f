/// Knight relaxation network — Restart Controller
///
/// Returns every edge to a fresh random configuration without touching
/// topology or neighbor caches.

use rand::Rng;

use crate::domain::Network;

/// Re-randomise outputs, zero states, mirror both into the snapshots and
/// clear all per-epoch and per-walk marks.
pub fn restart_network<R: Rng>(network: &mut Network, rng: &mut R) {
    for edge in &mut network.edges {
        edge.output = u8::from(rng.random::<bool>());
        edge.prev_output = edge.output;
        edge.state = 0;
        edge.prev_state = 0;
        edge.updated = false;
    }
    clear_visited(network);
}

pub fn clear_visited(network: &mut Network) {
    for node in &mut network.nodes {
        node.visited = false;
    }
}
