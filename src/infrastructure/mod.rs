//! Adapters for the domain ports: the reqwest HTTP client and scripted in-memory fakes.

pub mod http;
pub mod in_memory;
