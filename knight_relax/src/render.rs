/// Knight relaxation network — Solution Rendering
///
/// One line per node in sweep order: the node's position, then the
/// positions of every node sharing an active edge with it.

use crate::board::PositionEncoding;
use crate::domain::{Network, NodeId};

pub fn node_line(network: &Network, node: NodeId, encoding: PositionEncoding) -> String {
    let pos = |n: NodeId| encoding.encode(network.nodes[n].x, network.nodes[n].y);
    let mut line = format!("{}:", pos(node));
    for other in network.active_neighbors(node) {
        line.push(' ');
        line.push_str(&pos(other));
    }
    line
}

pub fn solution_lines(network: &Network, encoding: PositionEncoding) -> Vec<String> {
    network
        .sweep
        .iter()
        .map(|&n| node_line(network, n, encoding))
        .collect()
}

pub fn render_solution(network: &Network, encoding: PositionEncoding) -> String {
    solution_lines(network, encoding).join("\n")
}
