/// Knight relaxation network — Tour Validator
///
/// Walks active edges from the origin and accepts only a single open path
/// through every node. The visited-square counter is shared by the whole
/// walk, so when the origin sits mid-path its two branches add up to n².
/// The walk never steps back along the edge it arrived by.

use thiserror::Error;

use crate::domain::{Network, NodeId};
use crate::restart::clear_visited;

/// First reason the walk failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("node {node} reached twice")]
    Revisited { node: NodeId },
    #[error("node {node} has {active} active edges")]
    Branching { node: NodeId, active: usize },
    #[error("active edges around node {node} close a cycle")]
    Cycle { node: NodeId },
    #[error("path ends at node {node} after {checked} of {total} squares")]
    DeadEnd {
        node: NodeId,
        checked: usize,
        total: usize,
    },
}

/// Check that the active edges form one open path covering every node.
///
/// Clears visit marks first and leaves them set afterwards; the restart
/// controller clears them before the next attempt.
pub fn verify_tour(network: &mut Network) -> Result<(), Rejection> {
    clear_visited(network);
    let mut walk = Walk {
        total: network.node_count(),
        checked: 0,
    };
    let origin = network.origin;
    walk.visit(network, origin, None)
}

pub fn check_tour(network: &mut Network) -> bool {
    verify_tour(network).is_ok()
}

struct Walk {
    total: usize,
    checked: usize,
}

impl Walk {
    fn visit(
        &mut self,
        network: &mut Network,
        node: NodeId,
        from: Option<NodeId>,
    ) -> Result<(), Rejection> {
        if network.nodes[node].visited {
            return Err(Rejection::Revisited { node });
        }
        network.nodes[node].visited = true;
        self.checked += 1;

        let active = network.active_neighbors(node);
        if active.len() > 2 {
            return Err(Rejection::Branching {
                node,
                active: active.len(),
            });
        }

        let onward: Vec<NodeId> = active.into_iter().filter(|&n| Some(n) != from).collect();
        if onward.iter().any(|&n| network.nodes[n].visited) {
            return Err(Rejection::Cycle { node });
        }

        if self.checked == self.total {
            return Ok(());
        }

        match onward.as_slice() {
            [] => Err(Rejection::DeadEnd {
                node,
                checked: self.checked,
                total: self.total,
            }),
            [next] => self.visit(network, *next, Some(node)),
            [a, b] => {
                let (a, b) = (*a, *b);
                match self.visit(network, a, Some(node)) {
                    Ok(()) => Ok(()),
                    // Report the first branch's failure; the second one
                    // usually just runs into squares the first marked.
                    Err(first) => self.visit(network, b, Some(node)).map_err(|_| first),
                }
            }
            _ => Err(Rejection::Branching {
                node,
                active: onward.len(),
            }),
        }
    }
}
