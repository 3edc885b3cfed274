//! Dependency and lineage graph model
//!
//! Pure data: petgraph-backed containers validated on construction.
//! Graph builders live outside this crate; everything here consumes
//! finished graphs.

pub mod store;
pub mod store_models;

pub use store::{CodeGraph, DependencyGraph, GraphError, GraphSnapshot, LineageGraph};
pub use store_models::{EdgeKind, GraphEdge, GraphNode, Layer};
