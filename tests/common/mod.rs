#![allow(dead_code)]

use rand::Rng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use webhook_solver::domain::graph::{GraphSnapshot, Node, NodeId};

pub const REG_NO: &str = "REG001";

/// Token response carrying the 1 -> {2,3} -> 4 diamond with `n = 2`.
pub fn token_body(webhook: &str) -> Value {
    json!({
        "accessToken": "test-access-token",
        "webhook": webhook,
        "data": {
            "users": [
                {"id": 1, "follows": [2, 3]},
                {"id": 2, "follows": [4]},
                {"id": 3, "follows": [4]},
                {"id": 4, "follows": []}
            ],
            "findId": 1,
            "n": 2
        }
    })
}

/// Random directed graph. Some edge targets fall outside the node range on purpose.
pub fn random_graph(rng: &mut StdRng, nodes: i64, max_edges: usize) -> Vec<Node> {
    (0..nodes)
        .map(|id| {
            let edges = rng.gen_range(0..=max_edges);
            let follows = (0..edges).map(|_| rng.gen_range(0..nodes + 3)).collect();
            Node::new(id, follows)
        })
        .collect()
}

/// Unbounded BFS distances, used as a reference for the depth-limited solver.
pub fn shortest_hops(snapshot: &GraphSnapshot) -> HashMap<NodeId, usize> {
    let adjacency: HashMap<NodeId, Vec<NodeId>> = snapshot
        .users
        .iter()
        .map(|node| (node.id, node.follows.clone()))
        .collect();

    let mut distances = HashMap::from([(snapshot.find_id, 0)]);
    let mut queue = VecDeque::from([snapshot.find_id]);
    while let Some(current) = queue.pop_front() {
        let distance = distances[&current];
        for &next in adjacency.get(&current).into_iter().flatten() {
            distances.entry(next).or_insert_with(|| {
                queue.push_back(next);
                distance + 1
            });
        }
    }
    distances
}
