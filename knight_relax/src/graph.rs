/// Knight relaxation network — Board Graph
///
/// Builds the node and edge arenas once. Edges are created without
/// duplicates by scanning the source node's incident list, and each edge's
/// neighbor cache is filled only after every edge exists.

use rand::Rng;

use crate::board::{knight_targets, row_major, validate_board_size};
use crate::domain::{Edge, Network, Node, NodeId, MAX_DEGREE};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build the knight-move network for an n×n board.
///
/// Nodes are allocated x-major (`index = x*n + y`) and visited in that
/// order to discover edges. Each new edge draws its initial output from
/// `rng`; states start at zero.
pub fn build_knight_network<R: Rng>(size: usize, rng: &mut R) -> Result<Network> {
    validate_board_size(size)?;

    let mut nodes = Vec::with_capacity(size * size);
    for x in 0..size {
        for y in 0..size {
            nodes.push(Node::new(x, y));
        }
    }
    let index = |x: usize, y: usize| x * size + y;

    let mut edges: Vec<Edge> = Vec::new();
    for from in 0..nodes.len() {
        let (x, y) = (nodes[from].x, nodes[from].y);
        for (tx, ty) in knight_targets(x, y, size) {
            let to = index(tx, ty);
            if is_connected(&nodes, &edges, from, to) {
                continue;
            }
            let output = u8::from(rng.random::<bool>());
            link(&mut nodes, &mut edges, from, to, output);
        }
    }

    populate_neighbors(&nodes, &mut edges);

    let sweep = row_major(size).map(|(x, y)| index(x, y)).collect();

    Ok(Network {
        size,
        nodes,
        edges,
        sweep,
        origin: index(0, 0),
    })
}

/// Build an arbitrary network from explicit squares and links.
///
/// `outputs[i]` is the initial output of `links[i]`; a missing entry means 0.
/// Duplicate links are skipped. The sweep is arena order and the origin is
/// node 0.
pub fn build_network(
    coords: &[(usize, usize)],
    links: &[(NodeId, NodeId)],
    outputs: &[u8],
) -> Network {
    let mut nodes: Vec<Node> = coords.iter().map(|&(x, y)| Node::new(x, y)).collect();
    let mut edges: Vec<Edge> = Vec::new();

    for (i, &(a, b)) in links.iter().enumerate() {
        assert!(
            a < nodes.len() && b < nodes.len() && a != b,
            "build_network: bad link ({}, {}) for {} nodes",
            a,
            b,
            nodes.len()
        );
        if is_connected(&nodes, &edges, a, b) {
            continue;
        }
        link(&mut nodes, &mut edges, a, b, outputs.get(i).copied().unwrap_or(0));
    }

    populate_neighbors(&nodes, &mut edges);

    let sweep = (0..nodes.len()).collect();
    Network {
        size: 0,
        nodes,
        edges,
        sweep,
        origin: 0,
    }
}

/// True if `from` already has an edge whose far endpoint is `to`.
fn is_connected(nodes: &[Node], edges: &[Edge], from: NodeId, to: NodeId) -> bool {
    nodes[from]
        .edges
        .iter()
        .any(|&e| edges[e].other_end(from) == to)
}

fn link(nodes: &mut [Node], edges: &mut Vec<Edge>, start: NodeId, end: NodeId, output: u8) {
    debug_assert!(nodes[start].degree() < MAX_DEGREE && nodes[end].degree() < MAX_DEGREE);
    let id = edges.len();
    edges.push(Edge::new(start, end, output));
    nodes[start].edges.push(id);
    nodes[end].edges.push(id);
}

/// Fill each edge's neighbor cache: the start's incident edges, then the
/// end's, skipping the edge itself.
fn populate_neighbors(nodes: &[Node], edges: &mut [Edge]) {
    for id in 0..edges.len() {
        let (start, end) = (edges[id].start, edges[id].end);
        let neighbors: Vec<_> = nodes[start]
            .edges
            .iter()
            .chain(nodes[end].edges.iter())
            .copied()
            .filter(|&e| e != id)
            .collect();
        edges[id].neighbors = neighbors;
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Number of nodes at each active degree 0..=8.
pub fn degree_histogram(network: &Network) -> [usize; MAX_DEGREE + 1] {
    let mut hist = [0usize; MAX_DEGREE + 1];
    for node in 0..network.node_count() {
        hist[network.active_degree(node).min(MAX_DEGREE)] += 1;
    }
    hist
}

/// Nodes with exactly one active edge, in sweep order.
pub fn path_endpoints(network: &Network) -> Vec<NodeId> {
    network
        .sweep
        .iter()
        .copied()
        .filter(|&n| network.active_degree(n) == 1)
        .collect()
}
