//! JSON export

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::error::Result;
use crate::fs::node::{Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
    Symlink,
}

impl From<NodeKind> for EntryType {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::File => EntryType::File,
            NodeKind::Directory => EntryType::Directory,
            NodeKind::SymlinkFile | NodeKind::SymlinkDir | NodeKind::BrokenSymlink => {
                EntryType::Symlink
            }
        }
    }
}

/// Serialized form of a [`Node`]. `path` is the containing directory.
#[derive(Debug, Clone, Serialize)]
pub struct JsonNode {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "modTime", skip_serializing_if = "Option::is_none")]
    pub mod_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        let (size, mod_time) = if node.is_dir() {
            (None, None)
        } else {
            (
                Some(node.size),
                node.modified.map(|t| {
                    DateTime::<Local>::from(t).to_rfc3339_opts(SecondsFormat::Secs, true)
                }),
            )
        };
        Self {
            name: node.name.clone(),
            path: node.dir_path.clone(),
            entry_type: node.kind.into(),
            size,
            mod_time,
            children: node.children.iter().map(JsonNode::from).collect(),
        }
    }
}

/// Pretty-print the tree as JSON (two-space indent, trailing newline).
pub fn write_json<W: Write>(root: &Node, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &JsonNode::from(root))?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> Node {
        let mut root = Node::new("root", "/tmp", NodeKind::Directory);
        root.push_child(
            Node::new("a.txt", "/tmp/root", NodeKind::File)
                .with_size(10)
                .with_modified(UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
        );
        let mut sub = Node::new("sub", "/tmp/root", NodeKind::Directory);
        sub.push_child(Node::new("b.txt", "/tmp/root/sub", NodeKind::File).with_size(2048));
        root.push_child(sub);
        root.push_child(Node::new("empty", "/tmp/root", NodeKind::Directory));
        root.push_child(Node::new("link", "/tmp/root", NodeKind::SymlinkFile).with_size(3));
        root
    }

    fn export(root: &Node) -> Value {
        let mut buf = Vec::new();
        write_json(root, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        serde_json::from_str(&text).unwrap()
    }

    fn assert_children_match(node: &Node, value: &Value) {
        match value.get("children") {
            None => assert!(node.children.is_empty(), "{} lost its children", node.name),
            Some(children) => {
                let children = children.as_array().unwrap();
                assert!(!children.is_empty());
                assert_eq!(children.len(), node.children.len());
                for (child, child_value) in node.children.iter().zip(children) {
                    assert_children_match(child, child_value);
                }
            }
        }
    }

    #[test]
    fn children_mirror_the_tree() {
        let root = sample();
        assert_children_match(&root, &export(&root));
    }

    #[test]
    fn empty_directory_has_no_children_key() {
        let value = export(&sample());
        let empty = &value["children"][2];
        assert_eq!(empty["name"], "empty");
        assert!(empty.get("children").is_none());
    }

    #[test]
    fn fields_and_types() {
        let value = export(&sample());
        assert_eq!(value["name"], "root");
        assert_eq!(value["path"], "/tmp");
        assert_eq!(value["type"], "directory");
        assert!(value.get("size").is_none());
        assert!(value.get("modTime").is_none());

        let a = &value["children"][0];
        assert_eq!(a["type"], "file");
        assert_eq!(a["path"], "/tmp/root");
        assert_eq!(a["size"], 10);
        assert!(a["modTime"].as_str().unwrap().starts_with("2023-11-1"));

        let link = &value["children"][3];
        assert_eq!(link["type"], "symlink");
        assert_eq!(link["size"], 3);
    }

    #[test]
    fn unset_mod_time_is_omitted() {
        let value = export(&sample());
        let b = &value["children"][1]["children"][0];
        assert_eq!(b["size"], 2048);
        assert!(b.get("modTime").is_none());
    }

    #[test]
    fn output_uses_two_space_indent() {
        let mut buf = Vec::new();
        write_json(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\n  \"name\": \"root\""));
    }
}
