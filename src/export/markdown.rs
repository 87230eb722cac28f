//! Markdown export: a heading plus the decorated tree in a fenced block.

use std::io::Write;

use crate::error::Result;
use crate::fs::node::Node;
use crate::render::{render_lines, Annotate, Decoration, NoColor, RenderOptions};

pub fn write_markdown<W: Write>(root: &Node, annotate: &Annotate, writer: &mut W) -> Result<()> {
    let options = RenderOptions {
        show_root: false,
        decoration: Decoration::BoxDrawing,
        annotate: *annotate,
        summary: false,
    };
    writeln!(writer, "# Directory Tree: {}", root.name)?;
    writeln!(writer)?;
    writeln!(writer, "```")?;
    for line in render_lines(root, &options, &NoColor) {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "```")?;
    Ok(())
}
