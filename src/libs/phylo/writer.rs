use super::node::{NodeId, LENGTH_KEY};
use super::tree::Tree;

/// Serialize the tree to a Newick string (compact format).
///
/// Per-edge params other than the reserved "length" key are written back as
/// an NHX comment.
///
/// # Example
/// ```
/// use nwt::libs::phylo::tree::Tree;
/// use nwt::libs::phylo::writer;
/// let mut tree = Tree::new();
/// let root = tree.add_node();
/// tree.set_root(root);
/// tree.get_node_mut(root).unwrap().set_name("A");
/// assert_eq!(writer::write_newick(&tree), "A;");
/// ```
pub fn write_newick(tree: &Tree) -> String {
    if let Some(root) = tree.get_root() {
        let mut s = String::new();
        format_subtree(tree, root, &mut s);
        s.push(';');
        s
    } else {
        ";".to_string()
    }
}

// Iterative serialization with an explicit frame stack, so deep trees do not
// exhaust the call stack.
fn format_subtree(tree: &Tree, start: NodeId, out: &mut String) {
    enum Frame {
        Enter(NodeId),
        Close(NodeId),
        Comma,
    }

    let mut stack = vec![Frame::Enter(start)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                let node = tree.get_node(id).unwrap();
                if node.is_tip() {
                    out.push_str(&node_info(tree, id));
                } else {
                    out.push('(');
                    stack.push(Frame::Close(id));
                    for (i, &child) in node.children.iter().enumerate().rev() {
                        stack.push(Frame::Enter(child));
                        if i > 0 {
                            stack.push(Frame::Comma);
                        }
                    }
                }
            }
            Frame::Close(id) => {
                out.push(')');
                out.push_str(&node_info(tree, id));
            }
            Frame::Comma => out.push(','),
        }
    }
}

// Label + length + NHX params for one node
fn node_info(tree: &Tree, id: NodeId) -> String {
    let node = tree.get_node(id).unwrap();
    let mut s = String::new();

    if let Some(name) = &node.name {
        s.push_str(&quote_label(name));
    }

    if let Some(len) = node.length {
        s.push_str(&format!(":{}", len));
    }

    let extra: Vec<(&String, &f64)> = node
        .params
        .iter()
        .filter(|(k, _)| k.as_str() != LENGTH_KEY)
        .collect();
    if !extra.is_empty() {
        s.push_str("[&&NHX");
        for (k, v) in extra {
            s.push_str(&format!(":{}={}", k, v));
        }
        s.push(']');
    }

    s
}

fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[] \t\n".contains(c));
    if needs_quote {
        format!("'{}'", label)
    } else {
        label.to_string()
    }
}
