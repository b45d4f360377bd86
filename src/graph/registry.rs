use super::{Node, NodeKey};
use std::collections::BTreeMap;

/// Stable handle to a node inside one [`NodeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of [`NodeRegistry::lookup_or_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Created(NodeId),
    Found(NodeId),
}

impl Lookup {
    pub fn id(self) -> NodeId {
        match self {
            Lookup::Created(id) | Lookup::Found(id) => id,
        }
    }

    pub fn is_created(self) -> bool {
        matches!(self, Lookup::Created(_))
    }
}

/// Insertion-ordered node arena with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: BTreeMap<NodeKey, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, key: &NodeKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Return the node registered under `key`, building it with `make` if absent.
    pub fn lookup_or_create<F>(&mut self, key: &NodeKey, make: F) -> Lookup
    where
        F: FnOnce() -> Node,
    {
        if let Some(id) = self.find(key) {
            return Lookup::Found(id);
        }
        let node = make();
        debug_assert_eq!(&node.key, key);
        Lookup::Created(self.push(node))
    }

    /// Register a node whose key must be new; on collision the existing id is returned.
    pub fn insert_new(&mut self, node: Node) -> Result<NodeId, NodeId> {
        match self.find(&node.key) {
            Some(existing) => Err(existing),
            None => Ok(self.push(node)),
        }
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.key.clone(), id);
        self.nodes.push(node);
        id
    }
}
