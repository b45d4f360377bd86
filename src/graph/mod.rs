//! Abstract graph: typed nodes in a keyed registry plus labeled, styled edges.
//!
//! Built once per render by [`build`] and discarded afterwards.

mod build;
mod error;
mod registry;

pub use build::build;
pub use error::BuildError;
pub use registry::{Lookup, NodeId, NodeRegistry};

use crate::style::{self, EdgeStyle, Label, NodeStyle, StylePreset};
use std::fmt;

/// Node identity.
///
/// Channels and outputs share the `Channel` namespace: an output event and a
/// channel consumed downstream under the same name are one node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    /// `{name}_{algorithm}`
    Operator(String),
    Channel(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Operator(key) | NodeKey::Channel(key) => f.write_str(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Operator,
    Channel,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub key: NodeKey,
    pub kind: NodeKind,
    pub label: Label,
    pub preset: StylePreset,
}

impl Node {
    pub fn new(key: NodeKey, kind: NodeKind, label: Label, preset: StylePreset) -> Self {
        Self {
            key,
            kind,
            label,
            preset,
        }
    }

    pub fn style(&self) -> NodeStyle {
        self.preset.node_style()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Trigger,
    Input { offset: i32 },
    Latest,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub kind: EdgeKind,
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    pub style: EdgeStyle,
}

impl Edge {
    pub fn new(kind: EdgeKind, from: NodeId, to: NodeId) -> Self {
        Self {
            kind,
            from,
            to,
            label: style::edge_label(kind),
            style: style::edge_style(kind),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbstractGraph {
    nodes: NodeRegistry,
    edges: Vec<Edge>,
}

impl AbstractGraph {
    pub(crate) fn from_parts(nodes: NodeRegistry, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Edges in the order the builder emitted them.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id)
    }

    pub fn find(&self, key: &NodeKey) -> Option<NodeId> {
        self.nodes.find(key)
    }

    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.find(key).map(|id| self.nodes.get(id))
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|(_, n)| n.kind == kind).count()
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
}
