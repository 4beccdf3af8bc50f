/// Knight relaxation network — Core Domain Types
///
/// Arena representation: nodes and edges live in flat vectors and refer to
/// each other by index. Topology is fixed after construction; only the
/// per-edge dynamics and the per-node `visited` mark change afterwards.

use serde::{Deserialize, Serialize};

use crate::board::PositionEncoding;

pub type NodeId = usize;
pub type EdgeId = usize;

/// Most edges a single square can carry.
pub const MAX_DEGREE: usize = 8;

// ── Graph ──────────────────────────────────────────────────────────

/// One board square.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub x: usize,
    pub y: usize,
    /// Transient mark owned by the tour validator.
    pub visited: bool,
    /// Incident edges in discovery order.
    pub edges: Vec<EdgeId>,
}

impl Node {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            visited: false,
            edges: Vec::with_capacity(MAX_DEGREE),
        }
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// One legal move, i.e. one neuron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
    pub state: i64,
    pub output: u8,
    pub prev_state: i64,
    pub prev_output: u8,
    /// Set once the edge has been updated in the current epoch.
    pub updated: bool,
    /// Every other edge incident to `start` or `end`.
    pub neighbors: Vec<EdgeId>,
}

impl Edge {
    pub fn new(start: NodeId, end: NodeId, output: u8) -> Self {
        Self {
            start,
            end,
            state: 0,
            output,
            prev_state: 0,
            prev_output: output,
            updated: false,
            neighbors: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.output == 1
    }

    /// Endpoint opposite `node`. `node` must be one of the endpoints.
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if self.start == node {
            self.end
        } else {
            self.start
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}

/// Nodes, edges and the fixed sweep order over nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Board side length; 0 for hand-built graphs that are not boards.
    pub size: usize,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Node visiting order for resets, updates and rendering.
    pub sweep: Vec<NodeId>,
    /// Node the tour validator starts from.
    pub origin: NodeId,
}

impl Network {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn find_node(&self, x: usize, y: usize) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.x == x && n.y == y)
    }

    /// Edge joining `a` and `b`, if one exists.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.nodes[a]
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges[e].other_end(a) == b)
    }

    pub fn active_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_active()).count()
    }

    /// Nodes sharing an active edge with `node`, in incident-list order.
    pub fn active_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node]
            .edges
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| e.is_active())
            .map(|e| e.other_end(node))
            .collect()
    }

    pub fn active_degree(&self, node: NodeId) -> usize {
        self.nodes[node]
            .edges
            .iter()
            .filter(|&&e| self.edges[e].is_active())
            .count()
    }
}

// ── Configuration ──────────────────────────────────────────────────

/// Epochs allowed per relaxation before it is declared expired.
pub const DEFAULT_EPOCH_CAP: u64 = 10_000;
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100;

/// Solver settings. Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelaxConfig {
    pub board_size: usize,
    pub seed: u64,
    pub epoch_cap: u64,
    /// `None` restarts until a tour is found.
    pub max_attempts: Option<u64>,
    pub encoding: PositionEncoding,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            board_size: 6,
            seed: 0,
            epoch_cap: DEFAULT_EPOCH_CAP,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            encoding: PositionEncoding::Legacy,
        }
    }
}

impl RelaxConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// ── Results ────────────────────────────────────────────────────────

/// Terminal state of one relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelaxOutcome {
    /// An epoch finished without any state change.
    Converged { epochs: u64 },
    /// The epoch cap was reached first.
    Expired { epochs: u64 },
}

impl RelaxOutcome {
    pub fn epochs(&self) -> u64 {
        match *self {
            RelaxOutcome::Converged { epochs } | RelaxOutcome::Expired { epochs } => epochs,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, RelaxOutcome::Converged { .. })
    }
}

/// An accepted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSolution {
    /// 1-based attempt that produced the tour.
    pub attempts: u64,
    pub outcome: RelaxOutcome,
    /// Canonical hash of the accepted configuration.
    pub hash: String,
}
