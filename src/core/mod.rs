pub mod concat;
pub mod error;
pub mod pattern;
pub mod progress;
pub mod rules;
pub mod structure;
pub mod walker;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distinguishes the two kinds of tree entries. Serialized in lowercase
/// (`"file"` / `"folder"`) for the IPC boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One filesystem entry in a browsed repository tree.
///
/// Trees are rebuilt from scratch on every walk and never mutated in place;
/// `path` is the only stable identity across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Children in the documented sibling order. Always empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn folder(name: String, path: PathBuf, children: Vec<TreeNode>) -> Self {
        Self {
            name,
            path,
            kind: NodeKind::Folder,
            children,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

/// Result of one generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The output document was written. `entries` counts the emitted blocks:
    /// files in code mode, top-level selections in structure mode.
    Written { entries: usize },
    /// Nothing survived ignore filtering; the output path was not touched.
    Empty,
}

pub use concat::CodeAggregator;
pub use error::CoreError;
pub use pattern::PatternSet;
pub use progress::{ChannelSink, NullSink, ProgressSink};
pub use rules::{IgnoreRuleSet, RuleCache};
pub use structure::StructureEmitter;
pub use walker::{build_tree, flatten_files};
