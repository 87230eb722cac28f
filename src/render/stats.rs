use std::time::SystemTime;

use crate::fs::node::Node;

use super::format::format_size;

/// Totals over every node below the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub files: u64,
    pub directories: u64,
    pub total_size: u64,
    pub largest_file: u64,
    pub oldest: Option<SystemTime>,
    pub newest: Option<SystemTime>,
}

impl TreeStats {
    /// Walk all descendants of `root` (the root itself is not counted).
    pub fn collect(root: &Node) -> Self {
        let mut stats = Self::default();
        for node in root.descendants() {
            if node.is_dir() {
                stats.directories += 1;
            } else {
                stats.add_file(node.size, node.modified);
            }
        }
        stats
    }

    fn add_file(&mut self, size: u64, modified: Option<SystemTime>) {
        self.files += 1;
        self.total_size += size;
        self.largest_file = self.largest_file.max(size);
        if let Some(t) = modified {
            self.oldest = Some(self.oldest.map_or(t, |o| o.min(t)));
            self.newest = Some(self.newest.map_or(t, |n| n.max(t)));
        }
    }

    pub fn items(&self) -> u64 {
        self.files + self.directories
    }

    /// `name (N items, SIZE)`
    pub fn header(&self, name: &str) -> String {
        format!(
            "{} ({} items, {})",
            name,
            self.items(),
            format_size(self.total_size)
        )
    }

    /// `Total: F files, D directories, SIZE`
    pub fn footer(&self) -> String {
        format!(
            "Total: {} files, {} directories, {}",
            self.files,
            self.directories,
            format_size(self.total_size)
        )
    }
}
