/// Knight relaxation network — Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing of a network's
/// dynamic configuration.
///
/// Rules:
///   - Edges in arena order, each as [start_x, start_y, end_x, end_y, state, output]
///   - Fixed top-level field order, no whitespace
///   - `tour_fingerprint` covers active edges only, sorted by coordinates,
///     so it ignores states and edge orientation

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::Network;
use crate::FORMAT_VERSION;

/// Canonical serialization of the network to UTF-8 JSON bytes.
pub fn canonical_serialize(network: &Network) -> Vec<u8> {
    let obj = build_canonical_value(network);
    serde_json::to_string(&obj)
        .expect("canonical_serialize: JSON serialization failed")
        .into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex.
pub fn canonical_hash(network: &Network) -> String {
    hex_digest(&canonical_serialize(network))
}

/// SHA-256 over the sorted active edge set.
pub fn tour_fingerprint(network: &Network) -> String {
    let mut active: Vec<[usize; 4]> = network
        .edges
        .iter()
        .filter(|e| e.is_active())
        .map(|e| {
            let a = (network.nodes[e.start].x, network.nodes[e.start].y);
            let b = (network.nodes[e.end].x, network.nodes[e.end].y);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            [lo.0, lo.1, hi.0, hi.1]
        })
        .collect();
    active.sort();
    let bytes = serde_json::to_vec(&active).expect("tour_fingerprint: JSON serialization failed");
    hex_digest(&bytes)
}

fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

/// Field order: format_version, size, nodes, edges.
fn build_canonical_value(network: &Network) -> Value {
    let edges: Vec<Value> = network
        .edges
        .iter()
        .map(|e| {
            let s = &network.nodes[e.start];
            let t = &network.nodes[e.end];
            Value::Array(vec![
                Value::from(s.x),
                Value::from(s.y),
                Value::from(t.x),
                Value::from(t.y),
                Value::from(e.state),
                Value::from(e.output),
            ])
        })
        .collect();

    let mut root = Map::new();
    root.insert(
        "format_version".to_string(),
        Value::from(FORMAT_VERSION),
    );
    root.insert("size".to_string(), Value::from(network.size));
    root.insert("nodes".to_string(), Value::from(network.node_count()));
    root.insert("edges".to_string(), Value::Array(edges));
    Value::Object(root)
}
