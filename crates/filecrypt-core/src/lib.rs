pub mod config;
pub mod error;
pub mod tree;

pub use error::{FilecryptError, FilecryptResult};
pub use tree::{FileNode, FileTree, NodeId};
