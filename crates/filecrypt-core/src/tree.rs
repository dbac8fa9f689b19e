//! Filesystem tree model backing the interactive browser.
//!
//! Nodes live in an arena indexed by [`NodeId`]; parent/child links are
//! indices into it, and child lists grow without a fixed cap. Children are
//! sorted by name so the flattened pre-order used for display and selection
//! is stable across scans of an unchanged directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("cannot scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Index of a node within its [`FileTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
}

#[derive(Debug)]
pub struct FileTree {
    nodes: Vec<FileNode>,
}

impl FileTree {
    /// Build a tree rooted at `root_path`. Entries starting with '.' are
    /// skipped unless `show_hidden` is set. A root that cannot be read is an
    /// error; unreadable subdirectories are skipped.
    pub fn scan(root_path: &Path, show_hidden: bool) -> Result<Self, TreeError> {
        let meta = std::fs::metadata(root_path).map_err(|source| TreeError::Scan {
            path: root_path.to_path_buf(),
            source,
        })?;

        let mut tree = FileTree { nodes: Vec::new() };
        let root = tree.push_node(root_path, meta.is_dir(), None, 0);
        if meta.is_dir() {
            tree.scan_children(root, root_path, show_hidden);
        }
        Ok(tree)
    }

    fn push_node(&mut self, path: &Path, is_dir: bool, parent: Option<NodeId>, depth: usize) -> NodeId {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            // The filesystem root and paths like "." have no file name.
            None => path.display().to_string(),
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(FileNode {
            name,
            path: path.to_path_buf(),
            is_dir,
            parent,
            children: Vec::new(),
            depth,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn scan_children(&mut self, parent: NodeId, dir: &Path, show_hidden: bool) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir.display(), "skipping unreadable directory: {e}");
                return;
            }
        };

        let mut children: Vec<(String, PathBuf, bool)> = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !show_hidden && name.starts_with('.') {
                continue;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            children.push((name, entry.path(), is_dir));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        let depth = self.nodes[parent.0].depth + 1;
        for (_name, path, is_dir) in children {
            let id = self.push_node(&path, is_dir, Some(parent), depth);
            if is_dir {
                self.scan_children(id, &path, show_hidden);
            }
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.0]
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in pre-order (the order the browser displays them in).
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.preorder(self.root(), &mut order);
        order
    }

    fn preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.nodes[id.0].children {
            self.preorder(child, out);
        }
    }

    /// The `index`-th node in display order.
    pub fn nth_preorder(&self, index: usize) -> Option<NodeId> {
        self.flatten().get(index).copied()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.path == path)
            .map(NodeId)
    }
}
