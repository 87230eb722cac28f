//! Layout engine: turns a finished [`Node`] tree into display lines.

pub mod format;
pub mod layout;
pub mod sort;
pub mod stats;

pub use layout::{layout, Row};
pub use sort::{sort_tree, SortKey};
pub use stats::TreeStats;

use crate::fs::node::Node;

/// Decorates a display name. Applied to names only, never to connectors or
/// annotations.
pub trait Colorize {
    fn colorize(&self, name: &str, is_dir: bool, is_symlink: bool, mode: u32) -> String;
}

/// Leaves names untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColor;

impl Colorize for NoColor {
    fn colorize(&self, name: &str, _is_dir: bool, _is_symlink: bool, _mode: u32) -> String {
        name.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decoration {
    /// `├── ` / `└── ` connectors.
    #[default]
    BoxDrawing,
    /// Two spaces of indent per level, no connectors.
    Plain,
}

/// Which inline annotations follow each name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotate {
    pub size: bool,
    pub date: bool,
    /// Long date format; turns on both size and date.
    pub long_date: bool,
}

impl Annotate {
    pub fn shows_size(&self) -> bool {
        self.size || self.long_date
    }

    pub fn shows_date(&self) -> bool {
        self.date || self.long_date
    }

    pub fn any(&self) -> bool {
        self.shows_size() || self.shows_date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_root: bool,
    pub decoration: Decoration,
    pub annotate: Annotate,
    /// Print the `name (N items, SIZE)` header and the totals footer.
    pub summary: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_root: true,
            decoration: Decoration::BoxDrawing,
            annotate: Annotate::default(),
            summary: false,
        }
    }
}

/// Sort (if requested), then lay out and annotate the whole tree.
pub fn render(
    root: &mut Node,
    options: &RenderOptions,
    sort: Option<SortKey>,
    colorize: &dyn Colorize,
) -> Vec<String> {
    if let Some(key) = sort {
        sort_tree(root, key);
    }
    render_lines(root, options, colorize)
}

/// Read-only rendering of an already-sorted tree.
pub fn render_lines(root: &Node, options: &RenderOptions, colorize: &dyn Colorize) -> Vec<String> {
    let stats = options.summary.then(|| TreeStats::collect(root));
    let rows = layout(root, options, &|_| true);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    for row in &rows {
        if row.is_root {
            lines.push(match &stats {
                Some(stats) => stats.header(&root.name),
                None => colorize_node(root, colorize),
            });
        } else {
            lines.push(row_line(row, &options.annotate, colorize));
        }
    }

    if let Some(stats) = stats {
        lines.push(String::new());
        lines.push(stats.footer());
    }
    lines
}

/// `prefix + connector + name [+ "  " + annotations]` for a non-root row.
pub fn row_line(row: &Row, annotate: &Annotate, colorize: &dyn Colorize) -> String {
    let mut line = row.lead();
    line.push_str(&colorize_node(row.node, colorize));
    let parts = format::annotations(row.node, annotate);
    if !parts.is_empty() {
        line.push_str("  ");
        line.push_str(&parts.join("  "));
    }
    line
}

fn colorize_node(node: &Node, colorize: &dyn Colorize) -> String {
    colorize.colorize(&node.name, node.is_dir(), node.is_symlink(), node.mode)
}
