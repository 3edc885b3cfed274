use serde::{Deserialize, Serialize};

/// Coarse architectural tier attached to a lineage node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Frontend,
    Backend,
    Database,
    Api,
    Shared,
    /// Any tier the builder names that has no variant here
    #[serde(other)]
    Other,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Frontend => write!(f, "frontend"),
            Layer::Backend => write!(f, "backend"),
            Layer::Database => write!(f, "database"),
            Layer::Api => write!(f, "api"),
            Layer::Shared => write!(f, "shared"),
            Layer::Other => write!(f, "other"),
        }
    }
}

/// Edge types in dependency and lineage graphs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Import,
    Call,
    ApiCall,
    DatabaseQuery,
    DataFlow,
    Render,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Import => write!(f, "import"),
            EdgeKind::Call => write!(f, "call"),
            EdgeKind::ApiCall => write!(f, "api-call"),
            EdgeKind::DatabaseQuery => write!(f, "database-query"),
            EdgeKind::DataFlow => write!(f, "data-flow"),
            EdgeKind::Render => write!(f, "render"),
            EdgeKind::Other => write!(f, "other"),
        }
    }
}

/// A node in a dependency or lineage graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
}

impl GraphNode {
    pub fn new(id: &str, file: &str) -> Self {
        Self {
            id: id.to_string(),
            file: file.to_string(),
            layer: None,
        }
    }

    /// Node whose id is its file path (the usual shape of a dependency graph)
    pub fn file(path: &str) -> Self {
        Self::new(path, path)
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// File path, or `None` when the builder could not resolve one
    pub fn resolved_file(&self) -> Option<&str> {
        if self.file.is_empty() {
            None
        } else {
            Some(&self.file)
        }
    }
}

/// A directed edge between two nodes of the same graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl GraphEdge {
    pub fn new(id: &str, from: &str, to: &str, kind: EdgeKind) -> Self {
        Self {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }

    /// Import edge with an id derived from its endpoints
    pub fn import(from: &str, to: &str) -> Self {
        Self::new(&format!("{from}->{to}"), from, to, EdgeKind::Import)
    }

    pub fn is_import(&self) -> bool {
        self.kind == EdgeKind::Import
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
