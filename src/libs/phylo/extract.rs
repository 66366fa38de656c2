use super::error::TreeError;
use super::node::{NodeId, LENGTH_KEY};
use super::tree::Tree;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Return the minimal subtree whose tip set equals `names`, by iterative
/// delete-and-collapse on a deep copy of the tree.
///
/// Each round removes every tip whose name is not wanted, then collapses the
/// resulting single-child chains, until the tip count matches. Collapsing
/// adds branch lengths when both edges carry one; non-length params are not
/// merged in this variant (see `induced_subtree_fast`).
///
/// # Errors
/// - `TreeError::NameNotFound` if any requested name is not a tip of the
///   tree. Checking up front keeps the loop from running forever on input
///   it can never satisfy.
/// - `TreeError::EmptyResult` for an empty name set.
///
/// # Example
/// ```
/// use nwt::libs::phylo::extract::induced_subtree;
/// use nwt::libs::phylo::tree::Tree;
/// use std::collections::BTreeSet;
///
/// let tree = Tree::from_newick("((A:1,B:2)X:1,(C:1,D:1,E:1)Y:1)root;").unwrap();
/// let names: BTreeSet<String> = ["A", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let sub = induced_subtree(&tree, &names).unwrap();
/// assert_eq!(sub.tip_names(), names);
/// ```
pub fn induced_subtree(tree: &Tree, names: &BTreeSet<String>) -> Result<Tree, TreeError> {
    if names.is_empty() {
        return Err(TreeError::EmptyResult);
    }
    let tip_names = tree.tip_names();
    for name in names {
        if !tip_names.contains(name) {
            return Err(TreeError::NameNotFound(name.clone()));
        }
    }

    let mut tcopy = tree.clone();

    // Internal nodes emptied by a deletion round become unwanted tips
    // themselves and fall in a later round, so the count only reaches
    // |names| once exactly the wanted tips remain.
    loop {
        let tips = tcopy.tips();
        if tips.len() == names.len() {
            break;
        }
        for id in tips {
            let wanted = tcopy
                .get_node(id)
                .and_then(|n| n.name.as_ref())
                .map(|n| names.contains(n))
                .unwrap_or(false);
            if !wanted {
                tcopy.remove_node(id, true);
            }
        }
        tcopy.prune();
    }

    tcopy.compact();
    Ok(tcopy)
}

/// Return the minimal subtree whose tip set equals `names`, in a single
/// post-order pass driven by an explicit stack (no recursion, so tree depth
/// is not limited by the call stack).
///
/// Nodes whose name is in `names` are deep-copied verbatim. Any other node
/// is replaced according to how many of its children survived: none — it is
/// dropped; one — the surviving child is promoted and, when both edges carry
/// a branch length, their params are merged as a branch-length-weighted
/// average (the reserved "length" key becoming the summed length); two or
/// more — a new internal node keeps the survivors in order.
///
/// # Errors
/// `TreeError::EmptyResult` when nothing survives (including an empty name
/// set or an empty tree).
///
/// # Example
/// ```
/// use nwt::libs::phylo::extract::induced_subtree_fast;
/// use nwt::libs::phylo::tree::Tree;
/// use std::collections::BTreeSet;
///
/// let tree = Tree::from_newick("((A:1,B:2)X:1,(C:1,D:1,E:1)Y:1)root;").unwrap();
/// let names: BTreeSet<String> = ["A", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let sub = induced_subtree_fast(&tree, &names).unwrap();
/// assert_eq!(sub.to_newick(), "(A:2,(C:1,D:1)Y:1)root;");
/// ```
pub fn induced_subtree_fast(tree: &Tree, names: &BTreeSet<String>) -> Result<Tree, TreeError> {
    let root = tree.get_root().ok_or(TreeError::EmptyResult)?;
    let mut out = Tree::new();

    // (source node, number of its children still unvisited)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();
    // One survivor list per internal node currently on the stack, plus the
    // top-level one that finally holds the root's replacement
    let mut result: Vec<Vec<NodeId>> = vec![Vec::new()];

    let child_count = |id: NodeId| tree.get_node(id).map(|n| n.children.len()).unwrap_or(0);

    stack.push((root, child_count(root)));
    if child_count(root) > 0 {
        result.push(Vec::new());
    }

    while let Some(&(id, unvisited)) = stack.last() {
        let node = tree.get_node(id).ok_or_else(|| {
            TreeError::InvalidArgument(format!("node {} not found", id))
        })?;

        let kept = node
            .name
            .as_ref()
            .map(|n| names.contains(n))
            .unwrap_or(false);

        if kept {
            // Kept verbatim, children and all
            let copied = tree.copy_subtree_into(id, &mut out)?;
            if !node.children.is_empty() {
                // Its own survivor frame is unused
                result.pop();
            }
            result
                .last_mut()
                .ok_or(TreeError::EmptyResult)?
                .push(copied);
            stack.pop();
        } else if unvisited > 0 {
            stack.last_mut().unwrap().1 -= 1;
            let next = node.children[node.children.len() - unvisited];
            let n = child_count(next);
            stack.push((next, n));
            if n > 0 {
                result.push(Vec::new());
            }
        } else {
            stack.pop();

            let replacement: Option<NodeId> = if node.children.is_empty() {
                // A tip that is not wanted
                None
            } else {
                let survivors = result.pop().ok_or(TreeError::EmptyResult)?;
                match survivors.len() {
                    0 => None,
                    1 => {
                        let child_id = survivors[0];
                        merge_collapsed(node.length, &node.params, &mut out, child_id);
                        Some(child_id)
                    }
                    _ => {
                        let new_id = out.add_node();
                        if let Some(new_node) = out.get_node_mut(new_id) {
                            new_node.name = node.name.clone();
                            new_node.length = node.length;
                            new_node.params = node.params.clone();
                        }
                        for child in survivors {
                            out.add_child(new_id, child)?;
                        }
                        Some(new_id)
                    }
                }
            };

            if let Some(r) = replacement {
                result
                    .last_mut()
                    .ok_or(TreeError::EmptyResult)?
                    .push(r);
            }
        }
    }

    match result.pop().and_then(|mut v| v.pop()) {
        Some(new_root) => {
            out.set_root(new_root);
            Ok(out)
        }
        None => Err(TreeError::EmptyResult),
    }
}

// Collapse a dropped single-child node onto its surviving child: when both
// edges carry a length, shared non-length params are combined as a
// branch-length-weighted average and the reserved "length" key (and the
// child's length) become the sum. With either length absent the child is
// left exactly as it is.
fn merge_collapsed(
    node_length: Option<f64>,
    node_params: &BTreeMap<String, f64>,
    out: &mut Tree,
    child_id: NodeId,
) {
    let Some(a) = node_length else { return };
    let Some(b) = out.get_node(child_id).and_then(|n| n.length) else {
        return;
    };

    let total = a + b;
    let mut merged = BTreeMap::new();
    if total != 0.0 {
        if let Some(child) = out.get_node(child_id) {
            for (key, &value) in node_params {
                if key == LENGTH_KEY {
                    continue;
                }
                if let Some(&child_value) = child.params.get(key) {
                    merged.insert(key.clone(), (value * a + child_value * b) / total);
                }
            }
        }
    }
    if let Some(child) = out.get_node_mut(child_id) {
        child.params = merged;
        child.set_length(total);
    }
}
