//! The collaborator-facing surface of the engine: what a UI or IPC shell
//! drives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::CoreError;
use crate::core::progress::ProgressSink;
use crate::core::rules::RuleCache;
use crate::core::{walker, CodeAggregator, JobOutcome, StructureEmitter, TreeNode};

/// Which artifact a generation job produces. Serialized in lowercase
/// (`"code"` / `"structure"`) for the IPC boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateMode {
    Code,
    Structure,
}

/// The engine facade: owns the rule cache and exposes tree listing, rule
/// inspection and invalidation, and generation.
///
/// One instance per process is the intended shape. All methods take `&self`,
/// so sharing it behind an `Arc` across shell tasks is cheap.
#[derive(Debug, Default)]
pub struct Engine {
    rules: RuleCache,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`Engine::new`], but global ignore rules are read from `path`
    /// instead of the per-user configuration area.
    pub fn with_global_rules_path(path: impl Into<PathBuf>) -> Self {
        Self {
            rules: RuleCache::with_global_rules_path(path),
        }
    }

    /// Builds the filtered browsing tree for `repo_root`.
    ///
    /// The walk runs on the blocking thread pool; unreadable subtrees come
    /// back empty rather than failing the listing.
    pub async fn list_tree(&self, repo_root: &Path) -> Result<Vec<TreeNode>, CoreError> {
        if !repo_root.is_dir() {
            return Err(CoreError::NotADirectory(repo_root.to_path_buf()));
        }
        let rules = self.rules.resolve(repo_root);
        let root = repo_root.to_path_buf();
        let nodes = tokio::task::spawn_blocking(move || walker::build_tree(&root, &rules)).await?;
        Ok(nodes)
    }

    /// The currently effective ignore patterns for `repo_root`, in resolution
    /// order: built-ins, then global, then repo-local. Resolution is cached
    /// and never fails; a root without rule files still yields the built-ins.
    pub fn resolve_ignore_rules(&self, repo_root: &Path) -> Vec<String> {
        self.rules.resolve(repo_root).patterns().to_vec()
    }

    /// Drops cached rules for `repo_root`, or for every root when `None`.
    /// The next operation re-reads all rule sources. Call this after a rule
    /// file was edited.
    pub fn reset_rules(&self, repo_root: Option<&Path>) {
        self.rules.invalidate(repo_root);
    }

    /// Runs one generation job, reporting progress through `sink`.
    ///
    /// Invalid invocations (empty selection, missing root, empty output
    /// path) are rejected before any I/O. A selection that filters down to
    /// nothing completes as [`JobOutcome::Empty`] without touching
    /// `output_path`.
    pub async fn generate<S>(
        &self,
        mode: GenerateMode,
        repo_root: &Path,
        selection: &[PathBuf],
        output_path: &Path,
        sink: &S,
    ) -> Result<JobOutcome, CoreError>
    where
        S: ProgressSink + ?Sized,
    {
        if selection.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        if !repo_root.is_dir() {
            return Err(CoreError::NotADirectory(repo_root.to_path_buf()));
        }
        if output_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidOutput(output_path.to_path_buf()));
        }

        let rules = self.rules.resolve(repo_root);
        tracing::info!(
            "Starting {:?} generation for {:?} with {} selected path(s)",
            mode,
            repo_root,
            selection.len()
        );
        match mode {
            GenerateMode::Code => {
                CodeAggregator::generate(selection, rules, output_path, sink).await
            }
            GenerateMode::Structure => {
                StructureEmitter::generate(selection, rules, output_path, sink).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GenerateMode::Code).unwrap(), "\"code\"");
        assert_eq!(
            serde_json::from_str::<GenerateMode>("\"structure\"").unwrap(),
            GenerateMode::Structure
        );
    }
}
