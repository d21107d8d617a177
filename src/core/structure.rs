//! Structure mode: render each selected path's filtered subtree as an
//! indented listing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::CoreError;
use super::progress::{percent_done, ProgressSink};
use super::rules::IgnoreRuleSet;
use super::walker;
use super::{JobOutcome, TreeNode};

/// Generates the structure-mode artifact. Stateless; everything travels
/// through [`StructureEmitter::generate`].
pub struct StructureEmitter;

impl StructureEmitter {
    /// Writes the indented listing of the selected paths to `output_path`.
    ///
    /// The selection is deduplicated and pre-filtered (ignored or vanished
    /// paths are dropped); each surviving path becomes one block rooted at
    /// its own name, blocks are joined by a blank line and written in a
    /// single pass. Progress is published once per surviving path, plus a
    /// final 100 after the write. An empty survivor list leaves the output
    /// path untouched and publishes nothing.
    pub async fn generate<S>(
        selection: &[PathBuf],
        rules: Arc<IgnoreRuleSet>,
        output_path: &Path,
        sink: &S,
    ) -> Result<JobOutcome, CoreError>
    where
        S: ProgressSink + ?Sized,
    {
        let survivors = prefilter(selection, &rules);
        let total = survivors.len();
        if total == 0 {
            tracing::info!("No selected paths survived filtering; nothing to write");
            return Ok(JobOutcome::Empty);
        }

        let mut blocks: Vec<String> = Vec::with_capacity(total);
        for (index, selected) in survivors.into_iter().enumerate() {
            let block_rules = Arc::clone(&rules);
            let node =
                tokio::task::spawn_blocking(move || build_top_node(&selected, &block_rules))
                    .await?;
            if let Some(node) = node {
                blocks.push(render_block(&node));
            }
            sink.publish(percent_done(index + 1, total));
        }

        if blocks.is_empty() {
            return Ok(JobOutcome::Empty);
        }

        let document = blocks.join("\n\n");
        fs::write(output_path, document)
            .map_err(|e| CoreError::Io(e, output_path.to_path_buf()))?;
        sink.publish(100);

        tracing::info!(
            "Wrote structure of {} selection(s) to {:?}",
            blocks.len(),
            output_path
        );
        Ok(JobOutcome::Written {
            entries: blocks.len(),
        })
    }
}

/// Deduplicates the selection and drops paths that are ignored or gone.
fn prefilter(selection: &[PathBuf], rules: &IgnoreRuleSet) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut survivors = Vec::new();
    for selected in selection {
        if !seen.insert(selected.clone()) {
            continue;
        }
        if rules.is_ignored(selected) {
            tracing::debug!("Selected path {:?} is ignored; skipping", selected);
            continue;
        }
        if let Err(e) = fs::symlink_metadata(selected) {
            tracing::warn!("Selected path {:?} is not accessible: {}", selected, e);
            continue;
        }
        survivors.push(selected.clone());
    }
    survivors
}

/// Builds the block root for one selected path: a folder with its filtered
/// subtree, or a single file leaf.
fn build_top_node(path: &Path, rules: &IgnoreRuleSet) -> Option<TreeNode> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("Selected path {:?} vanished before rendering: {}", path, e);
            return None;
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if metadata.is_dir() {
        let children = walker::build_tree(path, rules);
        Some(TreeNode::folder(name, path.to_path_buf(), children))
    } else {
        Some(TreeNode::file(name, path.to_path_buf()))
    }
}

/// Renders one block: two spaces of indentation per depth, a trailing slash
/// on folder lines, no trailing newline.
fn render_block(node: &TreeNode) -> String {
    let mut lines = Vec::new();
    push_lines(node, 0, &mut lines);
    lines.join("\n")
}

fn push_lines(node: &TreeNode, depth: usize, lines: &mut Vec<String>) {
    let suffix = if node.is_folder() { "/" } else { "" };
    lines.push(format!("{}{}{}", "  ".repeat(depth), node.name, suffix));
    for child in &node.children {
        push_lines(child, depth + 1, lines);
    }
}
