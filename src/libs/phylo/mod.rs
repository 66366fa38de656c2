pub mod error;
pub mod extract;
pub mod namer;
pub mod node;
pub mod parser;
pub mod reader;
pub mod resolve;
pub mod tree;
pub mod writer;

pub use error::TreeError;
pub use extract::{induced_subtree, induced_subtree_fast};
pub use namer::name_unnamed_nodes;
pub use node::{Node, NodeId};
pub use resolve::{bifurcating, multifurcating};
pub use tree::Tree;
