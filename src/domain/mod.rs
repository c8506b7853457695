//! Domain layer: the follow graph, the level-N solver, wire payloads and the ports
//! through which the workflow reaches the network.

pub mod graph;
pub mod payload;
pub mod ports;
pub mod solver;
