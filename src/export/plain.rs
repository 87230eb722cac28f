use std::io::Write;

use crate::error::Result;
use crate::fs::node::Node;
use crate::render::{render_lines, Decoration, NoColor, RenderOptions};

/// One line per node below the root, indented two spaces per level.
pub fn write_plain<W: Write>(root: &Node, writer: &mut W) -> Result<()> {
    let options = RenderOptions {
        show_root: false,
        decoration: Decoration::Plain,
        ..Default::default()
    };
    for line in render_lines(root, &options, &NoColor) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
