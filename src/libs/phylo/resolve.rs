use super::error::TreeError;
use super::tree::Tree;

/// Return a copy of the tree in which no node has more than `max_children`
/// children. The source tree is untouched.
///
/// Oversized child lists are resolved by repeatedly peeling the *last*
/// `max_children` children off into a fresh synthetic node (branch length
/// `eps`) appended as the new last child. This grouping from the tail is
/// deliberate and must not be rebalanced: downstream consumers expect the
/// exact shape.
///
/// # Errors
/// Fails with `TreeError::InvalidArgument` if `max_children < 2`.
///
/// # Example
/// ```
/// use nwt::libs::phylo::resolve::multifurcating;
/// use nwt::libs::phylo::tree::Tree;
///
/// let tree = Tree::from_newick("(A,B,C,D,E);").unwrap();
/// let resolved = multifurcating(&tree, 3, 0.0).unwrap();
/// assert_eq!(resolved.to_newick(), "(A,B,(C,D,E):0);");
/// assert_eq!(tree.to_newick(), "(A,B,C,D,E);");
/// ```
pub fn multifurcating(tree: &Tree, max_children: usize, eps: f64) -> Result<Tree, TreeError> {
    if max_children < 2 {
        return Err(TreeError::InvalidArgument(
            "minimum number of children must be >= 2".to_string(),
        ));
    }

    let mut new_tree = tree.clone();
    let Some(root) = new_tree.get_root() else {
        return Ok(new_tree);
    };

    // Synthetic nodes always carry exactly max_children children, so the
    // snapshot of the original nodes is enough to visit.
    let ids = new_tree.preorder(&root)?;
    for id in ids {
        loop {
            let children = match new_tree.get_node(id) {
                Some(node) if node.children.len() > max_children => node.children.clone(),
                _ => break,
            };

            let tail = children[children.len() - max_children..].to_vec();
            let synthetic = new_tree.add_node();
            if let Some(node) = new_tree.get_node_mut(synthetic) {
                node.set_length(eps);
            }
            for child in tail {
                new_tree.detach(child);
                new_tree.add_child(synthetic, child)?;
            }
            new_tree.add_child(id, synthetic)?;
        }
    }

    Ok(new_tree)
}

/// `multifurcating` with `max_children = 2`.
pub fn bifurcating(tree: &Tree, eps: f64) -> Result<Tree, TreeError> {
    multifurcating(tree, 2, eps)
}
