use super::tree::Tree;
use std::collections::HashSet;

/// Assign a unique synthetic name ("node1", "node2", ...) to every unnamed
/// internal node, in preorder. Every name already present anywhere in the
/// tree is off-limits, so a tip that happens to be called "node3" can never
/// collide with a synthetic name. Tip names are never assigned.
///
/// On a collision the counter probes upward until a free integer is found
/// and the next assignment resumes from there.
///
/// # Example
/// ```
/// use nwt::libs::phylo::namer::name_unnamed_nodes;
/// use nwt::libs::phylo::tree::Tree;
///
/// let mut tree = Tree::from_newick("((A,B),(C,D));").unwrap();
/// name_unnamed_nodes(&mut tree);
/// assert_eq!(tree.to_newick(), "((A,B)node2,(C,D)node3)node1;");
/// ```
pub fn name_unnamed_nodes(tree: &mut Tree) {
    let Some(root) = tree.get_root() else {
        return;
    };

    let mut in_use: HashSet<String> = tree.get_name_id().into_keys().collect();

    let internals = match tree.internals(&root) {
        Ok(ids) => ids,
        Err(_) => return,
    };

    let mut name_index: usize = 1;
    for id in internals {
        let unnamed = tree
            .get_node(id)
            .map(|n| n.name.as_deref().unwrap_or("").is_empty())
            .unwrap_or(false);
        if !unnamed {
            continue;
        }

        let mut new_name = format!("node{}", name_index);
        while in_use.contains(&new_name) {
            name_index += 1;
            new_name = format!("node{}", name_index);
        }

        if let Some(node) = tree.get_node_mut(id) {
            node.set_name(new_name.clone());
        }
        in_use.insert(new_name);
        name_index += 1;
    }
}
