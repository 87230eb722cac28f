//! Exports of a finished tree.

pub mod json;
pub mod markdown;
pub mod plain;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::fs::node::Node;
use crate::render::Annotate;

pub use json::write_json;
pub use markdown::write_markdown;
pub use plain::write_plain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    Plain,
}

impl ExportFormat {
    /// Pick a format from the CLI switches. JSON wins over Markdown, which
    /// wins over plain text.
    pub fn select(json: bool, markdown: bool, plain: bool) -> Option<Self> {
        if json {
            Some(ExportFormat::Json)
        } else if markdown {
            Some(ExportFormat::Markdown)
        } else if plain {
            Some(ExportFormat::Plain)
        } else {
            None
        }
    }
}

/// Write `root` in `format`. Only Markdown honors `annotate`.
pub fn export<W: Write>(
    format: ExportFormat,
    root: &Node,
    annotate: &Annotate,
    writer: &mut W,
) -> Result<()> {
    match format {
        ExportFormat::Json => write_json(root, writer),
        ExportFormat::Markdown => write_markdown(root, annotate, writer),
        ExportFormat::Plain => write_plain(root, writer),
    }
}

/// Create (or truncate) an output file.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| AppError::OutputDestination {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "writing output file");
    Ok(BufWriter::new(file))
}
