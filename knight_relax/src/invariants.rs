/// Knight relaxation network — Structural Invariants
///
/// Hard-fail validation of a constructed network's topology. The panicking
/// entry point is for debug assertions and tests; the `try_` variant returns
/// the first violation as a message.

use std::collections::BTreeSet;

use crate::domain::{Network, MAX_DEGREE};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every structural check. Panics on the first failure.
pub fn validate_structure(network: &Network) {
    if let Err(msg) = try_validate_structure(network) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_structure`.
pub fn try_validate_structure(network: &Network) -> Result<(), String> {
    check_endpoint_refs(network)?;
    check_degree_cap(network)?;
    check_incident_lists(network)?;
    check_no_duplicate_edges(network)?;
    check_neighbor_caches(network)?;
    check_binary_outputs(network)?;
    check_sweep_covers_nodes(network)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks
// ---------------------------------------------------------------------------

fn check_endpoint_refs(network: &Network) -> Result<(), String> {
    let n = network.node_count();
    for (id, e) in network.edges.iter().enumerate() {
        if e.start >= n || e.end >= n {
            return Err(format!(
                "[endpoint_refs] edge {} references node outside 0..{}",
                id, n
            ));
        }
        if e.start == e.end {
            return Err(format!("[endpoint_refs] edge {} is a self-loop", id));
        }
    }
    if network.origin >= n && n > 0 {
        return Err(format!("[endpoint_refs] origin {} out of range", network.origin));
    }
    Ok(())
}

fn check_degree_cap(network: &Network) -> Result<(), String> {
    for (id, node) in network.nodes.iter().enumerate() {
        if node.degree() > MAX_DEGREE {
            return Err(format!(
                "[degree_cap] node {} has {} incident edges",
                id,
                node.degree()
            ));
        }
    }
    Ok(())
}

/// Each edge appears in both endpoints' lists, and nowhere else.
fn check_incident_lists(network: &Network) -> Result<(), String> {
    for (id, node) in network.nodes.iter().enumerate() {
        for &e in &node.edges {
            if e >= network.edge_count() || !network.edges[e].touches(id) {
                return Err(format!(
                    "[incident_lists] node {} lists edge {} that does not touch it",
                    id, e
                ));
            }
        }
    }
    for (id, e) in network.edges.iter().enumerate() {
        for end in [e.start, e.end] {
            let count = network.nodes[end].edges.iter().filter(|&&x| x == id).count();
            if count != 1 {
                return Err(format!(
                    "[incident_lists] edge {} listed {} times at node {}",
                    id, count, end
                ));
            }
        }
    }
    Ok(())
}

fn check_no_duplicate_edges(network: &Network) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for (id, e) in network.edges.iter().enumerate() {
        let key = (e.start.min(e.end), e.start.max(e.end));
        if !seen.insert(key) {
            return Err(format!(
                "[duplicate_edges] edge {} duplicates the pair {:?}",
                id, key
            ));
        }
    }
    Ok(())
}

/// Neighbor cache is exactly the other edges at either endpoint.
fn check_neighbor_caches(network: &Network) -> Result<(), String> {
    for (id, e) in network.edges.iter().enumerate() {
        let expected: BTreeSet<usize> = network.nodes[e.start]
            .edges
            .iter()
            .chain(network.nodes[e.end].edges.iter())
            .copied()
            .filter(|&x| x != id)
            .collect();
        let actual: BTreeSet<usize> = e.neighbors.iter().copied().collect();
        if actual.len() != e.neighbors.len() || actual != expected {
            return Err(format!(
                "[neighbor_cache] edge {} caches {:?}, expected {:?}",
                id, e.neighbors, expected
            ));
        }
    }
    Ok(())
}

fn check_binary_outputs(network: &Network) -> Result<(), String> {
    for (id, e) in network.edges.iter().enumerate() {
        if e.output > 1 || e.prev_output > 1 {
            return Err(format!("[binary_output] edge {} output {}", id, e.output));
        }
    }
    Ok(())
}

fn check_sweep_covers_nodes(network: &Network) -> Result<(), String> {
    let unique: BTreeSet<usize> = network.sweep.iter().copied().collect();
    if network.sweep.len() != network.node_count()
        || unique.len() != network.node_count()
        || unique.iter().any(|&n| n >= network.node_count())
    {
        return Err(format!(
            "[sweep] sweep of {} entries does not cover {} nodes once each",
            network.sweep.len(),
            network.node_count()
        ));
    }
    Ok(())
}
