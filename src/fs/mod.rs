pub mod node;
pub mod walker;

pub use node::{Node, NodeKey, NodeKind};
pub use walker::{walk, WalkIssue, WalkOptions, Walker};
