// Dependency graph built from the import traversal
//
// Nodes live in an arena keyed by canonical path; edges are directional
// and the imported-by view is always derived from them, never stored.

use crate::analysis::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Unique identifier for a node in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Parse outcome of a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NodeStatus {
    /// File read and parsed (or not yet expanded)
    #[default]
    Ok,
    /// File could not be read or has invalid syntax
    ParseError,
    /// Import target outside the project tree, never traversed
    UnresolvedExternal,
}

/// A file in the dependency graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Project-relative display path
    pub path: PathBuf,
    pub status: NodeStatus,
    pub metadata: Option<Metadata>,
    /// Depth at which the traversal first reached this file
    pub discovery_depth: usize,
    /// Whether the file was ever parsed and its imports followed
    pub expanded: bool,
}

/// Kind of import edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Absolute,
    Relative,
}

/// A directed import edge between two files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

/// An import-level problem recorded against the importing file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportIssue {
    /// Project-relative path of the importer
    pub file: PathBuf,
    /// Line of the offending import, when known
    pub line: Option<usize>,
    pub message: String,
}

/// The dependency graph for one traversal
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: Vec<ModuleNode>,
    /// Canonical absolute path -> node, the identity map
    index: HashMap<PathBuf, NodeId>,
    edges: Vec<Edge>,
    issues: Vec<ImportIssue>,
    /// Nodes reached past the depth limit (raw marks; read via cut_off_nodes)
    cutoff_marks: Vec<NodeId>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the node for a canonical path, creating it on first discovery
    pub fn intern(&mut self, canonical: &Path, display: PathBuf, depth: usize) -> NodeId {
        if let Some(&id) = self.index.get(canonical) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(ModuleNode {
            path: display,
            status: NodeStatus::Ok,
            metadata: None,
            discovery_depth: depth,
            expanded: false,
        });
        self.index.insert(canonical.to_path_buf(), id);
        id
    }

    pub fn node(&self, id: NodeId) -> &ModuleNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ModuleNode {
        &mut self.nodes[id.0]
    }

    /// Look up a node by its canonical path
    pub fn by_canonical(&self, canonical: &Path) -> Option<NodeId> {
        self.index.get(canonical).copied()
    }

    /// The entry node, present once anything has been interned
    pub fn entry(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Record an edge; exact duplicates are collapsed
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) {
        let edge = Edge { from, to, kind };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub fn add_issue(&mut self, file: PathBuf, line: Option<usize>, message: impl Into<String>) {
        self.issues.push(ImportIssue {
            file,
            line,
            message: message.into(),
        });
    }

    pub fn mark_cutoff(&mut self, id: NodeId) {
        if !self.cutoff_marks.contains(&id) {
            self.cutoff_marks.push(id);
        }
    }

    /// Imports of a node, in edge insertion order (= per-file import order)
    pub fn imports_of(&self, id: NodeId) -> Vec<(NodeId, EdgeKind)> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| (e.to, e.kind))
            .collect()
    }

    /// Importers of a node, derived from the edge list
    pub fn imported_by(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        for edge in &self.edges {
            if edge.to == id && !result.contains(&edge.from) {
                result.push(edge.from);
            }
        }
        result
    }

    /// Nodes that were cut off by the depth limit and never expanded later
    pub fn cut_off_nodes(&self) -> Vec<NodeId> {
        self.cutoff_marks
            .iter()
            .copied()
            .filter(|&id| !self.node(id).expanded)
            .collect()
    }

    /// All nodes in first-discovery order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ModuleNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn issues(&self) -> &[ImportIssue] {
        &self.issues
    }
}
