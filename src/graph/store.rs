//! Validated, immutable graph containers
//!
//! A [`CodeGraph`] owns its node and edge listings plus a petgraph index for
//! neighbour lookups. It can only be built through [`CodeGraph::new`] (or
//! deserialization, which routes through the same check), so every edge is
//! guaranteed to reference a known node. There is no mutation API: callers
//! that need a different graph build a new one, which keeps a single
//! instance safe to share across parallel detectors.

use super::store_models::{EdgeKind, GraphEdge, GraphNode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Deref;

/// Errors raised while constructing a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Malformed graph: edge '{edge_id}' references unknown node '{node_id}'")]
    MalformedGraph { edge_id: String, node_id: String },

    #[error("Malformed graph: duplicate node id '{0}'")]
    DuplicateNode(String),
}

/// Plain node/edge listing used on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// Directed graph of nodes and typed edges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct CodeGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    /// Node id -> petgraph index
    index: HashMap<String, NodeIndex>,
    /// Node weights are positions in `nodes`, edge weights positions in `edges`
    graph: DiGraph<usize, usize>,
}

impl CodeGraph {
    /// Build a graph, rejecting duplicate node ids and dangling edges
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self, GraphError> {
        let mut graph: DiGraph<usize, usize> =
            DiGraph::with_capacity(nodes.len(), edges.len());
        let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for (pos, node) in nodes.iter().enumerate() {
            if index.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            index.insert(node.id.clone(), graph.add_node(pos));
        }

        for (pos, edge) in edges.iter().enumerate() {
            let lookup = |id: &str| {
                index.get(id).copied().ok_or_else(|| GraphError::MalformedGraph {
                    edge_id: edge.id.clone(),
                    node_id: id.to_string(),
                })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            graph.add_edge(from, to, pos);
        }

        Ok(Self {
            nodes,
            edges,
            index,
            graph,
        })
    }

    /// Graph with nodes only
    pub fn from_nodes(nodes: Vec<GraphNode>) -> Result<Self, GraphError> {
        Self::new(nodes, Vec::new())
    }

    /// Nodes in listing order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in listing order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&ix| &self.nodes[self.graph[ix]])
    }

    /// Edges of one kind, in listing order
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Outgoing edges of `kind` from `id`, in edge listing order
    pub fn outgoing(&self, id: &str, kind: EdgeKind) -> Vec<&GraphEdge> {
        self.adjacent(id, kind, Direction::Outgoing)
    }

    /// Incoming edges of `kind` into `id`, in edge listing order
    pub fn incoming(&self, id: &str, kind: EdgeKind) -> Vec<&GraphEdge> {
        self.adjacent(id, kind, Direction::Incoming)
    }

    /// All nodes attached to a file path
    pub fn nodes_in_file(&self, file: &str) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.file == file).collect()
    }

    fn adjacent(&self, id: &str, kind: EdgeKind, dir: Direction) -> Vec<&GraphEdge> {
        let Some(&ix) = self.index.get(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest-first; restore listing order
        let mut positions: Vec<usize> = self
            .graph
            .edges_directed(ix, dir)
            .map(|e| *e.weight())
            .filter(|&pos| self.edges[pos].kind == kind)
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|pos| &self.edges[pos]).collect()
    }
}

impl TryFrom<GraphSnapshot> for CodeGraph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        Self::new(snapshot.nodes, snapshot.edges)
    }
}

impl From<CodeGraph> for GraphSnapshot {
    fn from(graph: CodeGraph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

/// Graph of import relationships between source-file nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph(CodeGraph);

impl DependencyGraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self, GraphError> {
        CodeGraph::new(nodes, edges).map(Self)
    }

    pub fn into_inner(self) -> CodeGraph {
        self.0
    }
}

impl From<CodeGraph> for DependencyGraph {
    fn from(graph: CodeGraph) -> Self {
        Self(graph)
    }
}

impl Deref for DependencyGraph {
    type Target = CodeGraph;

    fn deref(&self) -> &CodeGraph {
        &self.0
    }
}

/// Graph approximating data flow across architectural layers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageGraph(CodeGraph);

impl LineageGraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self, GraphError> {
        CodeGraph::new(nodes, edges).map(Self)
    }

    pub fn into_inner(self) -> CodeGraph {
        self.0
    }
}

impl From<CodeGraph> for LineageGraph {
    fn from(graph: CodeGraph) -> Self {
        Self(graph)
    }
}

impl Deref for LineageGraph {
    type Target = CodeGraph;

    fn deref(&self) -> &CodeGraph {
        &self.0
    }
}
