use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type NodeId = i64;

/// A user in the follow graph together with the users it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub follows: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, follows: Vec<NodeId>) -> Self {
        Self { id, follows }
    }
}

/// The problem payload delivered alongside the access token.
///
/// Edge targets are not required to appear in `users`; such ids are dead ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    pub users: Vec<Node>,
    pub find_id: NodeId,
    pub n: usize,
}

impl GraphSnapshot {
    pub fn new(users: Vec<Node>, find_id: NodeId, n: usize) -> Self {
        Self { users, find_id, n }
    }

    /// Builds the id -> follows lookup. A repeated id keeps its last edge list.
    pub fn adjacency(&self) -> HashMap<NodeId, &[NodeId]> {
        self.users
            .iter()
            .map(|node| (node.id, node.follows.as_slice()))
            .collect()
    }
}

/// The submitted answer: exactly one sorted sequence of node ids, wrapped once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(Vec<Vec<NodeId>>);

impl Outcome {
    pub fn single(ids: Vec<NodeId>) -> Self {
        Self(vec![ids])
    }

    pub fn ids(&self) -> &[NodeId] {
        self.0.first().map(Vec::as_slice).unwrap_or_default()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
