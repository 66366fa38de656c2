use super::error::TreeError;
use super::node::{Node, NodeId};
use super::parser;
use super::writer;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let tree = Tree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single Newick string into a tree.
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let tree = Tree::from_newick("((A:1,B:2)X:1,C:3);").unwrap();
    /// assert_eq!(tree.tips().len(), 3);
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parser::parse_newick(input)
    }

    /// Parse a string possibly containing several Newick trees.
    pub fn from_newick_multi(input: &str) -> Result<Vec<Self>, TreeError> {
        parser::parse_newick_multi(input)
    }

    /// Add a new node to the tree. Returns the new node's ID.
    /// The node is initially detached (no parent).
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let id = tree.add_node();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        let node = Node::new(id);
        self.nodes.push(node);
        id
    }

    /// Get a reference to a node by ID. Returns None if ID is invalid or node is deleted.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    /// Set a node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    /// Get the root node ID
    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    /// Add a child to a parent node.
    /// Updates both parent's `children` list and child's `parent` field.
    ///
    /// # Errors
    /// Returns an error if parent/child are invalid, deleted, or already linked.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        if parent_id == child_id {
            return Err(TreeError::InvalidArgument(
                "cannot add node as child of itself".to_string(),
            ));
        }
        if self.get_node(parent_id).is_none() {
            return Err(TreeError::InvalidArgument(format!(
                "parent node {} not found or deleted",
                parent_id
            )));
        }
        if self.get_node(child_id).is_none() {
            return Err(TreeError::InvalidArgument(format!(
                "child node {} not found or deleted",
                child_id
            )));
        }

        if let Some(old_parent) = self.nodes[child_id].parent {
            return Err(TreeError::InvalidArgument(format!(
                "node {} already has parent {}",
                child_id, old_parent
            )));
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);

        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree intact.
    /// The node becomes parentless; the parent loses the child.
    /// No-op for the root or an already detached node.
    pub fn detach(&mut self, id: NodeId) {
        if self.get_node(id).is_none() {
            return;
        }
        if let Some(parent_id) = self.nodes[id].parent {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
            self.nodes[id].parent = None;
        }
    }

    /// Soft remove a node and, optionally, its descendants.
    /// If recursive is false, children are orphaned (parent set to None).
    pub fn remove_node(&mut self, id: NodeId, recursive: bool) {
        if id >= self.nodes.len() || self.nodes[id].deleted {
            return;
        }

        // Unlink from parent
        if let Some(parent_id) = self.nodes[id].parent {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }

        let children = self.nodes[id].children.clone();
        for child_id in children {
            if recursive {
                self.remove_node(child_id, true);
            } else if let Some(child) = self.nodes.get_mut(child_id) {
                child.parent = None;
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.deleted = true;
            node.children.clear();
            node.parent = None;
        }

        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Collapse a single-child node: the child is promoted into the node's
    /// position among its parent's children. When both edges carry a length,
    /// the child's length becomes their sum; otherwise the child keeps its
    /// own length. Non-length params are never merged here.
    ///
    /// # Errors
    /// Fails on the root, on a missing node, or on a node whose child count
    /// is not exactly one.
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::from_newick("((A:1)X:2,B:3);").unwrap();
    /// let x = tree.get_node_by_name("X").unwrap();
    /// tree.collapse_node(x).unwrap();
    /// assert_eq!(tree.to_newick(), "(A:3,B:3);");
    /// ```
    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), TreeError> {
        if self.get_node(id).is_none() {
            return Err(TreeError::InvalidArgument(format!("node {} not found", id)));
        }
        if self.root == Some(id) {
            return Err(TreeError::InvalidArgument(
                "cannot collapse the root node".to_string(),
            ));
        }
        if self.nodes[id].children.len() != 1 {
            return Err(TreeError::InvalidArgument(format!(
                "node {} does not have exactly one child",
                id
            )));
        }

        let parent_id = self.nodes[id].parent.ok_or_else(|| {
            TreeError::InvalidArgument(format!("node {} has no parent", id))
        })?;
        let node_length = self.nodes[id].length;
        let child_id = self.nodes[id].children[0];

        if let (Some(a), Some(b)) = (node_length, self.nodes[child_id].length) {
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.set_length(a + b);
            }
        }
        self.nodes[child_id].parent = Some(parent_id);

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            if let Some(pos) = parent.children.iter().position(|&x| x == id) {
                parent.children[pos] = child_id;
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.deleted = true;
            node.children.clear();
            node.parent = None;
        }

        Ok(())
    }

    /// Repeatedly collapse any node that has exactly one child until none
    /// remains. A single-child root is replaced by its child, which becomes
    /// the new root and keeps its own branch length.
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::from_newick("(((A:1)X:2)Y:4,B:1);").unwrap();
    /// tree.prune();
    /// assert_eq!(tree.to_newick(), "(A:7,B:1);");
    /// ```
    pub fn prune(&mut self) {
        loop {
            let Some(root) = self.root else {
                return;
            };
            let ids = self.postorder(&root).unwrap_or_default();
            let mut changed = false;
            for id in ids {
                let Some(node) = self.get_node(id) else {
                    continue;
                };
                if node.children.len() != 1 {
                    continue;
                }
                if self.root == Some(id) {
                    let child_id = node.children[0];
                    self.set_root(child_id);
                    self.remove_node(id, false);
                } else {
                    // checked child count above
                    self.collapse_node(id).unwrap();
                }
                changed = true;
            }
            if !changed {
                break;
            }
        }
    }

    /// Compact the tree by removing soft-deleted nodes and remapping IDs.
    /// This invalidates all existing NodeIds held outside!
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let _n1 = tree.add_node();
    /// tree.remove_node(n0, false);
    /// tree.compact();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn compact(&mut self) {
        let mut old_to_new = HashMap::new();
        let mut new_nodes = Vec::with_capacity(self.nodes.len());
        let mut new_idx = 0;

        // Build mapping and new node list, edges reconstructed afterwards
        for old_node in &self.nodes {
            if !old_node.deleted {
                old_to_new.insert(old_node.id, new_idx);
                let mut new_node = old_node.clone();
                new_node.id = new_idx;
                new_node.parent = None;
                new_node.children.clear();
                new_nodes.push(new_node);
                new_idx += 1;
            }
        }

        for (old_idx, node) in self.nodes.iter().enumerate() {
            if node.deleted {
                continue;
            }

            let new_self_idx = *old_to_new.get(&old_idx).unwrap();

            if let Some(old_parent) = node.parent {
                if let Some(&new_parent) = old_to_new.get(&old_parent) {
                    new_nodes[new_self_idx].parent = Some(new_parent);
                }
            }

            for &old_child in &node.children {
                if let Some(&new_child) = old_to_new.get(&old_child) {
                    new_nodes[new_self_idx].children.push(new_child);
                }
            }
        }

        if let Some(old_root) = self.root {
            self.root = old_to_new.get(&old_root).copied();
        }

        self.nodes = new_nodes;
    }

    /// Perform a preorder traversal starting from a given node.
    /// Returns a vector of NodeIds in visitation order.
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// tree.add_child(n0, n1).unwrap();
    /// tree.add_child(n0, n2).unwrap();
    /// let traversal = tree.preorder(&n0).unwrap();
    /// assert_eq!(traversal, vec![n0, n1, n2]);
    /// ```
    pub fn preorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if self.get_node(*start_node).is_none() {
            return Err(TreeError::InvalidArgument(format!(
                "node {} not found",
                start_node
            )));
        }

        let mut result = Vec::new();
        let mut stack = vec![*start_node];

        while let Some(curr) = stack.pop() {
            result.push(curr);
            // Push children in reverse order so they are popped left-to-right
            if let Some(node) = self.get_node(curr) {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        Ok(result)
    }

    /// Perform a postorder traversal starting from a given node.
    /// Returns a vector of NodeIds in visitation order (children before parent).
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// tree.add_child(n0, n1).unwrap();
    /// tree.add_child(n0, n2).unwrap();
    /// let traversal = tree.postorder(&n0).unwrap();
    /// assert_eq!(traversal, vec![n1, n2, n0]);
    /// ```
    pub fn postorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if self.get_node(*start_node).is_none() {
            return Err(TreeError::InvalidArgument(format!(
                "node {} not found",
                start_node
            )));
        }

        // Visit root-right-left with an explicit stack, then reverse
        let mut stack = vec![*start_node];
        let mut output_stack = Vec::new();

        while let Some(curr) = stack.pop() {
            output_stack.push(curr);

            if let Some(node) = self.get_node(curr) {
                for &child in node.children.iter() {
                    stack.push(child);
                }
            }
        }

        output_stack.reverse();
        Ok(output_stack)
    }

    /// Internal (non-tip) node IDs in preorder, including the start node if
    /// it is internal.
    pub fn internals(&self, start_node: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        Ok(self
            .preorder(start_node)?
            .into_iter()
            .filter(|&id| self.get_node(id).map(|n| !n.is_tip()).unwrap_or(false))
            .collect())
    }

    /// Get all tip (leaf) node IDs in the tree.
    pub fn tips(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| !n.deleted && n.is_tip())
            .map(|n| n.id)
            .collect()
    }

    /// The set of tip names. Unnamed tips are skipped.
    pub fn tip_names(&self) -> BTreeSet<String> {
        self.tips()
            .iter()
            .filter_map(|&id| self.get_node(id).and_then(|n| n.name.clone()))
            .collect()
    }

    /// Map from name to node ID for all named nodes.
    pub fn get_name_id(&self) -> BTreeMap<String, NodeId> {
        self.nodes
            .iter()
            .filter(|n| !n.deleted)
            .filter_map(|n| n.name.clone().map(|name| (name, n.id)))
            .collect()
    }

    /// Find the first node with the given name.
    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| !n.deleted && n.name.as_deref() == Some(name))
            .map(|n| n.id)
    }

    /// Deep-copy the subtree rooted at `src_id` into another arena.
    /// Returns the ID of the copied subtree root in `dst`. The copy never
    /// aliases this tree's nodes. The copied root is left detached.
    pub fn copy_subtree_into(&self, src_id: NodeId, dst: &mut Tree) -> Result<NodeId, TreeError> {
        let order = self.preorder(&src_id)?;
        let mut id_map: HashMap<NodeId, NodeId> = HashMap::new();

        for old_id in order {
            let new_id = dst.add_node();
            id_map.insert(old_id, new_id);

            let src = self.get_node(old_id).ok_or_else(|| {
                TreeError::InvalidArgument(format!("node {} not found", old_id))
            })?;
            if let Some(node) = dst.get_node_mut(new_id) {
                node.name = src.name.clone();
                node.length = src.length;
                node.params = src.params.clone();
            }

            if old_id != src_id {
                // preorder guarantees the parent was copied already
                if let Some(parent) = src.parent {
                    let new_parent = *id_map.get(&parent).ok_or_else(|| {
                        TreeError::InvalidArgument(format!(
                            "parent of node {} outside the copied subtree",
                            old_id
                        ))
                    })?;
                    dst.add_child(new_parent, new_id)?;
                }
            }
        }

        Ok(id_map[&src_id])
    }

    /// Get number of active nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the tree to a Newick string (compact format).
    ///
    /// # Example
    /// ```
    /// use nwt::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let root = tree.add_node();
    /// tree.set_root(root);
    /// tree.get_node_mut(root).unwrap().set_name("A");
    /// assert_eq!(tree.to_newick(), "A;");
    /// ```
    pub fn to_newick(&self) -> String {
        writer::write_newick(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_traversals() {
        let mut tree = Tree::new();
        //    0
        //   / \
        //  1   2
        // / \   \
        //3   4   5
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();
        let n3 = tree.add_node();
        let n4 = tree.add_node();
        let n5 = tree.add_node();

        tree.set_root(n0);
        tree.add_child(n0, n1).unwrap();
        tree.add_child(n0, n2).unwrap();
        tree.add_child(n1, n3).unwrap();
        tree.add_child(n1, n4).unwrap();
        tree.add_child(n2, n5).unwrap();

        let pre = tree.preorder(&n0).unwrap();
        assert_eq!(pre, vec![n0, n1, n3, n4, n2, n5]);

        let post = tree.postorder(&n0).unwrap();
        assert_eq!(post, vec![n3, n4, n1, n5, n2, n0]);

        let internal = tree.internals(&n0).unwrap();
        assert_eq!(internal, vec![n0, n1, n2]);
    }

    #[test]
    fn test_tree_basic_ops() {
        let mut tree = Tree::new();
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();
        let n3 = tree.add_node();

        tree.set_root(n0);

        tree.add_child(n0, n1).unwrap();
        tree.add_child(n0, n2).unwrap();
        tree.add_child(n1, n3).unwrap();

        assert_eq!(tree.len(), 4);

        let root = tree.get_node(n0).unwrap();
        assert_eq!(root.children, vec![n1, n2]);

        let node1 = tree.get_node(n1).unwrap();
        assert_eq!(node1.parent, Some(n0));
        assert_eq!(node1.children, vec![n3]);

        // Linking a node twice is rejected
        assert!(tree.add_child(n2, n3).is_err());
        // Self-loops are rejected
        assert!(tree.add_child(n2, n2).is_err());
    }

    #[test]
    fn test_tree_detach_and_reattach() {
        let mut tree = Tree::from_newick("((A,B)X,C);").unwrap();
        let x = tree.get_node_by_name("X").unwrap();
        let c = tree.get_node_by_name("C").unwrap();

        tree.detach(c);
        assert_eq!(tree.get_node(c).unwrap().parent, None);
        assert_eq!(tree.to_newick(), "((A,B)X);");

        // The detached subtree is intact and can be reattached elsewhere
        tree.add_child(x, c).unwrap();
        assert_eq!(tree.to_newick(), "((A,B,C)X);");
    }

    #[test]
    fn test_tree_remove_and_compact() {
        let mut tree = Tree::new();
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();

        tree.add_child(n0, n1).unwrap();
        tree.add_child(n1, n2).unwrap();
        tree.set_root(n0);

        tree.remove_node(n1, false);

        assert!(tree.get_node(n1).is_none());
        assert_eq!(tree.len(), 2);
        assert!(!tree.get_node(n0).unwrap().children.contains(&n1));
        assert_eq!(tree.get_node(n2).unwrap().parent, None);

        tree.compact();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_node(0).unwrap().children.len(), 0);
        assert_eq!(tree.get_node(1).unwrap().parent, None);
    }

    #[test]
    fn test_collapse_node_lengths() {
        // Both edges have lengths: they add up
        let mut tree = Tree::from_newick("((A:1.5)X:2.5,B:1);").unwrap();
        let x = tree.get_node_by_name("X").unwrap();
        tree.collapse_node(x).unwrap();
        let a = tree.get_node_by_name("A").unwrap();
        assert_eq!(tree.get_node(a).unwrap().length, Some(4.0));

        // Child has no length: it keeps None, nothing propagates
        let mut tree = Tree::from_newick("((A)X:2.5,B:1);").unwrap();
        let x = tree.get_node_by_name("X").unwrap();
        tree.collapse_node(x).unwrap();
        let a = tree.get_node_by_name("A").unwrap();
        assert_eq!(tree.get_node(a).unwrap().length, None);
    }

    #[test]
    fn test_collapse_node_rejects() {
        let mut tree = Tree::from_newick("((A,B)X,C);").unwrap();
        let root = tree.get_root().unwrap();
        let x = tree.get_node_by_name("X").unwrap();

        // Root and multi-child nodes cannot be collapsed
        assert!(tree.collapse_node(root).is_err());
        assert!(tree.collapse_node(x).is_err());
    }

    #[test]
    fn test_prune_chain_and_root() {
        // A whole chain above a tip collapses in one go
        let mut tree = Tree::from_newick("(((A:1)X:2)Y:4,B:1);").unwrap();
        tree.prune();
        assert_eq!(tree.to_newick(), "(A:7,B:1);");

        // A single-child root is replaced by its child
        let mut tree = Tree::from_newick("((A:1,B:2)X:3);").unwrap();
        tree.prune();
        let root = tree.get_root().unwrap();
        assert_eq!(tree.get_node(root).unwrap().name.as_deref(), Some("X"));
        assert_eq!(tree.to_newick(), "(A:1,B:2)X:3;");
    }

    #[test]
    fn test_copy_subtree_into() {
        let tree = Tree::from_newick("((A:1,B:2)X:1,C:3);").unwrap();
        let x = tree.get_node_by_name("X").unwrap();

        let mut dst = Tree::new();
        let copied = tree.copy_subtree_into(x, &mut dst).unwrap();
        dst.set_root(copied);

        assert_eq!(dst.to_newick(), "(A:1,B:2)X:1;");
        // The source is untouched
        assert_eq!(tree.to_newick(), "((A:1,B:2)X:1,C:3);");
    }

    #[test]
    fn test_tree_queries() {
        let tree = Tree::from_newick("((A,B)X,C)root;").unwrap();

        assert_eq!(tree.tips().len(), 3);
        let names = tree.tip_names();
        assert!(names.contains("A"));
        assert!(names.contains("C"));
        assert!(!names.contains("X"));

        let id_of = tree.get_name_id();
        assert_eq!(id_of.len(), 5);
        assert_eq!(tree.get_node_by_name("X"), id_of.get("X").copied());
        assert_eq!(tree.get_node_by_name("nonexistent"), None);
    }
}
