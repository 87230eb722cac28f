use std::path::PathBuf;
use std::time::SystemTime;

/// Kind of filesystem entry a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    /// Symlink whose target resolved to something other than a directory.
    SymlinkFile,
    /// Symlink whose target resolved to a directory; the walker descends into it.
    SymlinkDir,
    /// Symlink whose target could not be resolved. Always a leaf.
    BrokenSymlink,
}

/// Identifies a node for overlay maps: `(containing directory, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub dir_path: PathBuf,
    pub name: String,
}

/// A node in the filesystem tree.
///
/// Children are owned exclusively by their parent. Instead of a parent
/// back-reference each node carries its nesting depth, stamped when the node
/// is attached with [`Node::push_child`].
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Path of the directory holding this entry, not the entry's own path.
    pub dir_path: PathBuf,
    pub kind: NodeKind,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Raw permission bits, used only for executable detection.
    pub mode: u32,
    pub children: Vec<Node>,
    pub depth: usize,
}

impl Node {
    /// Create a childless node at depth 0 with no metadata.
    pub fn new(name: impl Into<String>, dir_path: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            dir_path: dir_path.into(),
            kind,
            size: 0,
            modified: None,
            mode: 0,
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Append a child, re-stamping the depth of its whole subtree.
    pub fn push_child(&mut self, mut child: Node) {
        child.set_depth(self.depth + 1);
        self.children.push(child);
    }

    fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        for child in &mut self.children {
            child.set_depth(depth + 1);
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            dir_path: self.dir_path.clone(),
            name: self.name.clone(),
        }
    }

    /// Whether this node answers to `key`, without allocating a `NodeKey`.
    pub fn has_key(&self, key: &NodeKey) -> bool {
        self.name == key.name && self.dir_path == key.dir_path
    }

    /// Full (logical) path of the entry.
    pub fn path(&self) -> PathBuf {
        if self.dir_path.as_os_str().is_empty() {
            return PathBuf::from(&self.name);
        }
        self.dir_path.join(&self.name)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory | NodeKind::SymlinkDir)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::SymlinkFile | NodeKind::SymlinkDir | NodeKind::BrokenSymlink
        )
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }

    /// Sum of the sizes of every non-directory descendant.
    ///
    /// Recomputed on each call; directory sizes are never stored.
    pub fn aggregate_size(&self) -> u64 {
        self.children
            .iter()
            .map(|child| {
                if child.is_dir() {
                    child.aggregate_size()
                } else {
                    child.size
                }
            })
            .sum()
    }

    /// Depth-first, pre-order iterator over all descendants (self excluded).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Find a node by key anywhere in this subtree, self included.
    pub fn find(&self, key: &NodeKey) -> Option<&Node> {
        if self.has_key(key) {
            return Some(self);
        }
        self.descendants().find(|node| node.has_key(key))
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::new("root", "/tmp", NodeKind::Directory);
        root.push_child(Node::new("a.txt", "/tmp/root", NodeKind::File).with_size(10));
        let mut sub = Node::new("sub", "/tmp/root", NodeKind::Directory);
        sub.push_child(Node::new("b.txt", "/tmp/root/sub", NodeKind::File).with_size(2048));
        root.push_child(sub);
        root
    }

    #[test]
    fn push_child_stamps_depth_recursively() {
        let root = sample();
        assert_eq!(root.depth, 0);
        assert_eq!(root.children[0].depth, 1);
        assert_eq!(root.children[1].depth, 1);
        assert_eq!(root.children[1].children[0].depth, 2);
    }

    #[test]
    fn restamps_depth_when_subtree_moves() {
        let mut outer = Node::new("outer", "/", NodeKind::Directory);
        let mut mid = Node::new("mid", "/outer", NodeKind::Directory);
        mid.push_child(sample());
        outer.push_child(mid);
        let deepest = outer.descendants().find(|n| n.name == "b.txt").unwrap();
        assert_eq!(deepest.depth, 4);
    }

    #[test]
    fn aggregate_size_sums_descendant_files() {
        let root = sample();
        assert_eq!(root.aggregate_size(), 2058);
        assert_eq!(root.children[1].aggregate_size(), 2048);
        assert_eq!(root.children[0].aggregate_size(), 0);
    }

    #[test]
    fn aggregate_size_ignores_directory_own_size() {
        let mut root = Node::new("root", "/", NodeKind::Directory).with_size(4096);
        root.push_child(Node::new("empty", "/root", NodeKind::Directory).with_size(4096));
        assert_eq!(root.aggregate_size(), 0);
    }

    #[test]
    fn descendants_are_depth_first_preorder() {
        let root = sample();
        let names: Vec<&str> = root.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "sub", "b.txt"]);
    }

    #[test]
    fn key_and_path() {
        let root = sample();
        let b = &root.children[1].children[0];
        assert_eq!(
            b.key(),
            NodeKey {
                dir_path: PathBuf::from("/tmp/root/sub"),
                name: "b.txt".to_string()
            }
        );
        assert_eq!(b.path(), PathBuf::from("/tmp/root/sub/b.txt"));
        assert!(root.find(&b.key()).is_some());
    }

    #[test]
    fn kind_predicates() {
        let link = Node::new("l", "/", NodeKind::SymlinkDir);
        assert!(link.is_dir());
        assert!(link.is_symlink());
        let broken = Node::new("b", "/", NodeKind::BrokenSymlink);
        assert!(!broken.is_dir());
        assert!(broken.is_symlink());
        assert!(Node::new(".env", "/", NodeKind::File).is_hidden());
        assert!(Node::new("run.sh", "/", NodeKind::File).with_mode(0o755).is_executable());
        assert!(!Node::new("a.txt", "/", NodeKind::File).with_mode(0o644).is_executable());
    }
}
