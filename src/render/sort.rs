use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::fs::node::Node;

/// Sort modes for tree children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive, ascending.
    Name,
    /// Largest first; directories weigh their aggregated size.
    Size,
    /// Newest first; unset timestamps last.
    Date,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Date => "date",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            "date" => Ok(SortKey::Date),
            other => Err(format!(
                "invalid sort key '{other}' (expected name, size or date)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reorder the children of every node in the subtree. Stable, so sorting an
/// already-sorted tree with the same key leaves it unchanged.
pub fn sort_tree(node: &mut Node, key: SortKey) {
    match key {
        SortKey::Name => node
            .children
            .sort_by_cached_key(|child| child.name.to_lowercase()),
        SortKey::Size => node
            .children
            .sort_by_cached_key(|child| Reverse(effective_size(child))),
        SortKey::Date => node.children.sort_by(|a, b| match (a.modified, b.modified) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
    }
    for child in &mut node.children {
        sort_tree(child, key);
    }
}

fn effective_size(node: &Node) -> u64 {
    if node.is_dir() {
        node.aggregate_size()
    } else {
        node.size
    }
}
