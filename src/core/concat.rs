//! Code mode: expand a selection into a flat file list and weave the file
//! contents into one delimited document.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::CoreError;
use super::pattern;
use super::progress::{percent_done, ProgressSink};
use super::rules::IgnoreRuleSet;
use super::walker;
use super::JobOutcome;

/// Generates the code-mode artifact. Stateless; everything travels through
/// [`CodeAggregator::generate`].
pub struct CodeAggregator;

impl CodeAggregator {
    /// Concatenates the selected files into `output_path`.
    ///
    /// Directories in the selection are expanded through the shared pruning
    /// traversal; duplicates keep their first-seen position. When nothing
    /// survives filtering the output path is left untouched and the job
    /// completes as [`JobOutcome::Empty`] without publishing progress.
    ///
    /// Each written file is framed as
    /// `"\n// ===== File: <relative path> =====\n" + content + "\n"`.
    /// A file that cannot be read as text is skipped with a warning and the
    /// job continues; skipped files still advance the progress percentage.
    pub async fn generate<S>(
        selection: &[PathBuf],
        rules: Arc<IgnoreRuleSet>,
        output_path: &Path,
        sink: &S,
    ) -> Result<JobOutcome, CoreError>
    where
        S: ProgressSink + ?Sized,
    {
        let owned = selection.to_vec();
        let expand_rules = Arc::clone(&rules);
        let files =
            tokio::task::spawn_blocking(move || expand_selection(&owned, &expand_rules)).await?;

        let total = files.len();
        if total == 0 {
            tracing::info!("Selection expanded to no files; nothing to write");
            return Ok(JobOutcome::Empty);
        }

        let io_err = |e: std::io::Error| CoreError::Io(e, output_path.to_path_buf());
        let out = fs::File::create(output_path).map_err(io_err)?;
        let mut writer = std::io::BufWriter::new(out);

        let mut written = 0usize;
        for (index, file) in files.iter().enumerate() {
            match fs::read_to_string(file) {
                Ok(content) => {
                    write!(
                        writer,
                        "\n// ===== File: {} =====\n",
                        display_path(file, rules.root())
                    )
                    .map_err(io_err)?;
                    writer.write_all(content.as_bytes()).map_err(io_err)?;
                    writer.write_all(b"\n").map_err(io_err)?;
                    written += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable file {:?}: {}", file, e);
                }
            }

            sink.publish(percent_done(index + 1, total));
            if (index + 1) % 10 == 0 {
                tokio::task::yield_now().await;
            }
        }

        writer.flush().map_err(io_err)?;

        tracing::info!(
            "Wrote {} of {} file(s) to {:?}",
            written,
            total,
            output_path
        );
        Ok(JobOutcome::Written { entries: written })
    }
}

/// Expands selected paths to a flat, deduplicated file list. Directories are
/// walked with the shared pruning traversal; files are taken as-is unless
/// ignored; first-seen order wins.
fn expand_selection(selection: &[PathBuf], rules: &IgnoreRuleSet) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for selected in selection {
        if rules.is_ignored(selected) {
            tracing::debug!("Selected path {:?} is ignored; skipping", selected);
            continue;
        }
        let metadata = match fs::symlink_metadata(selected) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Selected path {:?} is not accessible: {}", selected, e);
                continue;
            }
        };

        if metadata.is_dir() {
            let tree = walker::build_tree(selected, rules);
            let mut flat = Vec::new();
            walker::flatten_files(&tree, &mut flat);
            for file in flat {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        } else if seen.insert(selected.clone()) {
            files.push(selected.clone());
        }
    }

    files
}

/// Root-relative POSIX path for the delimiter line. A selected file outside
/// the repo root keeps its absolute path.
fn display_path(file: &Path, root: &Path) -> String {
    match file.strip_prefix(root) {
        Ok(rel) => pattern::to_posix(rel),
        Err(_) => file.display().to_string(),
    }
}
