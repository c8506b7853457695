//! Level-N traversal over the follow graph.
//!
//! A breadth-first walk from `find_id` assigns every discovered node its shortest hop
//! count. Expansion stops at depth `n`, so nodes beyond the target level are never
//! discovered. All working containers are local to one call.

use super::graph::{GraphSnapshot, NodeId, Outcome};
use std::collections::{HashMap, HashSet, VecDeque};

/// Returns the hop level of every node discovered within `snapshot.n` hops.
pub fn levels(snapshot: &GraphSnapshot) -> HashMap<NodeId, usize> {
    let adjacency = snapshot.adjacency();
    let target = snapshot.n;

    let mut queue = VecDeque::from([snapshot.find_id]);
    let mut visited = HashSet::from([snapshot.find_id]);
    let mut levels = HashMap::from([(snapshot.find_id, 0)]);

    while let Some(current) = queue.pop_front() {
        let level = levels[&current];
        if level >= target {
            continue;
        }

        // Ids without a node entry have no outgoing edges.
        let Some(follows) = adjacency.get(&current) else {
            continue;
        };

        for &next in follows.iter() {
            if visited.insert(next) {
                levels.insert(next, level + 1);
                queue.push_back(next);
            }
        }
    }

    levels
}

/// Collects the nodes at exactly `snapshot.n` hops, sorted ascending.
pub fn solve(snapshot: &GraphSnapshot) -> Outcome {
    let mut ids: Vec<NodeId> = levels(snapshot)
        .into_iter()
        .filter(|&(_, level)| level == snapshot.n)
        .map(|(id, _)| id)
        .collect();
    ids.sort_unstable();

    Outcome::single(ids)
}
