use std::collections::BTreeMap;

/// NodeId is an index into the Tree's node arena.
/// It is lightweight (Copy) and safe (no pointers).
pub type NodeId = usize;

/// Reserved key in `params` that mirrors `length`.
pub const LENGTH_KEY: &str = "length";

#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for the node (index in the arena)
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// List of child node IDs
    pub children: Vec<NodeId>,

    // --- Payload ---
    /// Node name/label (e.g., "otu_42", "node1")
    pub name: Option<String>,

    /// Branch length to parent.
    /// In rooted trees, edge length is an attribute of the child node.
    /// `None` is distinct from `0.0` and must be preserved.
    pub length: Option<f64>,

    /// Numeric per-edge parameters (e.g., rates parsed from NHX comments).
    /// The key "length" is reserved and mirrors `length`.
    /// Using BTreeMap ensures deterministic output order.
    pub params: BTreeMap<String, f64>,

    /// Soft deletion flag.
    /// If true, this node is considered removed.
    /// Use Tree::compact() to permanently drop deleted nodes and reclaim memory.
    pub deleted: bool,
}

impl Node {
    /// Create a new empty node with a specific ID
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            params: BTreeMap::new(),
            deleted: false,
        }
    }

    /// Set the name of the node
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Set the branch length, mirroring it into the reserved "length" param.
    pub fn set_length(&mut self, length: f64) {
        self.length = Some(length);
        self.params.insert(LENGTH_KEY.to_string(), length);
    }

    /// Set a per-edge parameter
    pub fn set_param(&mut self, key: impl Into<String>, value: f64) {
        self.params.insert(key.into(), value);
    }

    /// Check if the node is a tip (no children)
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }
}
