//! Walker - builds the whole tree in memory before anything is rendered.

use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::error::{AppError, Result};

use super::node::{Node, NodeKind};

/// Hard recursion ceiling, independent of the user's depth limit.
pub const MAX_WALK_DEPTH: usize = 256;

/// Options controlling a walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub show_hidden: bool,
    /// Maximum nesting depth to list; 0 means unlimited.
    pub max_depth: usize,
}

/// A failure below the root that the walker recovered from.
#[derive(Debug, Error)]
pub enum WalkIssue {
    /// A directory listing failed; the directory is kept with no children.
    #[error("cannot read directory '{}': {source}", path.display())]
    DirectoryRead { path: PathBuf, source: io::Error },

    /// A symlink target is missing or unreadable; the node becomes a broken symlink.
    #[error("cannot resolve symlink '{}': {source}", path.display())]
    SymlinkResolution { path: PathBuf, source: io::Error },

    /// An entry could not be stat'ed; it is skipped.
    #[error("cannot stat '{}': {source}", path.display())]
    EntryStat { path: PathBuf, source: io::Error },

    /// A directory resolves to one of its own ancestors; it is not descended.
    #[error("directory cycle at '{}'", path.display())]
    CycleDetected { path: PathBuf },

    /// The hard recursion ceiling was reached.
    #[error("depth ceiling reached at '{}'", path.display())]
    DepthCeiling { path: PathBuf },
}

/// Builds a [`Node`] tree from a filesystem path.
pub struct Walker {
    options: WalkOptions,
}

impl Walker {
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// Walk `root` and return the finished tree.
    ///
    /// Fails only when `root` itself cannot be resolved.
    pub fn walk(&self, root: &Path) -> Result<Node> {
        self.walk_with_issues(root).map(|(node, _)| node)
    }

    /// Walk `root`, also returning every failure that was recovered from.
    pub fn walk_with_issues(&self, root: &Path) -> Result<(Node, Vec<WalkIssue>)> {
        let abs = absolutize(root).map_err(|source| AppError::PathResolution {
            path: root.to_path_buf(),
            source,
        })?;
        let meta = fs::metadata(&abs).map_err(|source| AppError::PathResolution {
            path: root.to_path_buf(),
            source,
        })?;

        let name = abs
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| abs.to_string_lossy().to_string());
        let dir_path = abs.parent().map(Path::to_path_buf).unwrap_or_default();
        let kind = if meta.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        let mut node = node_from_metadata(name, dir_path, kind, &meta);
        let mut traversal = Traversal {
            options: self.options,
            branch: HashSet::new(),
            issues: Vec::new(),
        };
        if node.is_dir() {
            traversal.walk_dir(&mut node, &abs, &abs);
        }

        tracing::debug!(
            root = %abs.display(),
            entries = node.descendants().count(),
            issues = traversal.issues.len(),
            "walk finished"
        );
        Ok((node, traversal.issues))
    }
}

/// Shorthand for `Walker::new(options).walk(root)`.
pub fn walk(root: &Path, options: WalkOptions) -> Result<Node> {
    Walker::new(options).walk(root)
}

/// State of one walk: the canonical directories on the current branch and
/// the failures recovered so far.
struct Traversal {
    options: WalkOptions,
    branch: HashSet<PathBuf>,
    issues: Vec<WalkIssue>,
}

impl Traversal {
    fn record(&mut self, issue: WalkIssue) {
        tracing::debug!(%issue, "recovered during walk");
        self.issues.push(issue);
    }

    /// List `physical` into `parent`. `logical` is the path the user sees,
    /// which differs from `physical` below a directory symlink.
    fn walk_dir(&mut self, parent: &mut Node, logical: &Path, physical: &Path) {
        let depth = parent.depth;
        if self.options.max_depth > 0 && depth >= self.options.max_depth {
            return;
        }
        if depth >= MAX_WALK_DEPTH {
            self.record(WalkIssue::DepthCeiling {
                path: logical.to_path_buf(),
            });
            return;
        }

        let canonical = fs::canonicalize(physical).ok();
        if let Some(ref c) = canonical {
            if self.branch.contains(c) {
                self.record(WalkIssue::CycleDetected {
                    path: logical.to_path_buf(),
                });
                return;
            }
        }

        let entries = match fs::read_dir(physical) {
            Ok(e) => e,
            Err(source) => {
                self.record(WalkIssue::DirectoryRead {
                    path: logical.to_path_buf(),
                    source,
                });
                return;
            }
        };

        let mut listed = Vec::new();
        for entry in entries {
            match entry {
                Ok(e) => listed.push(e),
                Err(source) => self.record(WalkIssue::EntryStat {
                    path: logical.to_path_buf(),
                    source,
                }),
            }
        }
        listed.sort_by_key(|e| e.file_name());

        if let Some(ref c) = canonical {
            self.branch.insert(c.clone());
        }

        for entry in listed {
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.options.show_hidden && name.starts_with('.') {
                continue;
            }

            let entry_path = entry.path();
            // DirEntry::metadata does not follow symlinks.
            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(source) => {
                    self.record(WalkIssue::EntryStat {
                        path: logical.join(&name),
                        source,
                    });
                    continue;
                }
            };

            let (mut node, descend_into) = if meta.file_type().is_symlink() {
                match resolve_symlink(&entry_path) {
                    Ok((target, target_meta)) if target_meta.is_dir() => (
                        node_from_metadata(
                            name.clone(),
                            logical.to_path_buf(),
                            NodeKind::SymlinkDir,
                            &target_meta,
                        ),
                        Some(target),
                    ),
                    Ok((_, target_meta)) => (
                        node_from_metadata(
                            name.clone(),
                            logical.to_path_buf(),
                            NodeKind::SymlinkFile,
                            &target_meta,
                        ),
                        None,
                    ),
                    Err(source) => {
                        self.record(WalkIssue::SymlinkResolution {
                            path: logical.join(&name),
                            source,
                        });
                        (
                            node_from_metadata(
                                name.clone(),
                                logical.to_path_buf(),
                                NodeKind::BrokenSymlink,
                                &meta,
                            ),
                            None,
                        )
                    }
                }
            } else if meta.is_dir() {
                (
                    node_from_metadata(
                        name.clone(),
                        logical.to_path_buf(),
                        NodeKind::Directory,
                        &meta,
                    ),
                    Some(entry_path),
                )
            } else {
                (
                    node_from_metadata(name.clone(), logical.to_path_buf(), NodeKind::File, &meta),
                    None,
                )
            };

            node.depth = depth + 1;
            if let Some(target) = descend_into {
                self.walk_dir(&mut node, &logical.join(&name), &target);
            }
            parent.children.push(node);
        }

        if let Some(ref c) = canonical {
            self.branch.remove(c);
        }
    }
}

/// Resolve a symlink one level and stat the target.
fn resolve_symlink(path: &Path) -> io::Result<(PathBuf, Metadata)> {
    let link = fs::read_link(path)?;
    let target = if link.is_absolute() {
        link
    } else {
        path.parent().unwrap_or_else(|| Path::new("")).join(link)
    };
    let meta = fs::metadata(&target)?;
    Ok((target, meta))
}

fn node_from_metadata(name: String, dir_path: PathBuf, kind: NodeKind, meta: &Metadata) -> Node {
    let mut node = Node::new(name, dir_path, kind).with_size(meta.len());
    node.modified = meta.modified().ok();
    node.mode = mode_bits(meta);
    node
}

#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_bits(_meta: &Metadata) -> u32 {
    0
}

/// Make `path` absolute and fold `.` and `..` lexically, without touching
/// symlinks.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
