//! Row layout: turns a tree into an ordered list of display rows.
//!
//! The same layout serves the CLI (everything expanded) and the browser
//! (expansion decided by its overlay map).

use crate::fs::node::Node;

use super::{Decoration, RenderOptions};

pub const BRANCH: &str = "├── ";
pub const LAST: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const SPACE: &str = "    ";

const PLAIN_INDENT: &str = "  ";

/// One visible line before annotation and coloring.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub node: &'a Node,
    /// Depth relative to the laid-out root.
    pub depth: usize,
    pub prefix: String,
    pub connector: &'static str,
    pub is_root: bool,
}

impl Row<'_> {
    /// Prefix and connector, i.e. everything left of the name.
    pub fn lead(&self) -> String {
        format!("{}{}", self.prefix, self.connector)
    }
}

/// Lay out `root` depth-first. `expand` decides whether a directory's
/// children are included; it is also asked about the root.
pub fn layout<'a>(
    root: &'a Node,
    options: &RenderOptions,
    expand: &dyn Fn(&Node) -> bool,
) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    if options.show_root {
        rows.push(Row {
            node: root,
            depth: 0,
            prefix: String::new(),
            connector: "",
            is_root: true,
        });
    }
    if expand(root) {
        lay_out_children(root, "", 1, options.decoration, expand, &mut rows);
    }
    rows
}

fn lay_out_children<'a>(
    parent: &'a Node,
    prefix: &str,
    depth: usize,
    decoration: Decoration,
    expand: &dyn Fn(&Node) -> bool,
    rows: &mut Vec<Row<'a>>,
) {
    let count = parent.children.len();
    for (i, child) in parent.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let (row_prefix, connector) = match decoration {
            Decoration::BoxDrawing => (prefix.to_string(), if is_last { LAST } else { BRANCH }),
            Decoration::Plain => (PLAIN_INDENT.repeat(depth), ""),
        };
        rows.push(Row {
            node: child,
            depth,
            prefix: row_prefix,
            connector,
            is_root: false,
        });

        if child.is_dir() && expand(child) {
            let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            lay_out_children(child, &child_prefix, depth + 1, decoration, expand, rows);
        }
    }
}

/// Undecorated rows for a flat list of nodes, as shown for a search result.
pub fn flat<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<Row<'a>> {
    nodes
        .into_iter()
        .map(|node| Row {
            node,
            depth: 0,
            prefix: String::new(),
            connector: "",
            is_root: false,
        })
        .collect()
}
