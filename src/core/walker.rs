//! The unified tree traversal: one recursive, ignore-pruning walk shared by
//! tree listing, code aggregation and structure emission.

use std::fs;
use std::path::{Path, PathBuf};

use super::rules::IgnoreRuleSet;
use super::{NodeKind, TreeNode};

/// Recursively builds the filtered tree under `dir`.
///
/// Ignored entries are pruned: an ignored directory is not descended into, so
/// its contents are never visited. A directory that cannot be read
/// (permissions, vanished between calls) contributes an empty child list
/// instead of failing the walk. Symbolic links are not followed and appear
/// as file leaves.
///
/// Siblings are ordered case-insensitively by name, files and directories
/// interleaved, with byte order as tie-break. Generated documents rely on
/// this order being stable.
pub fn build_tree(dir: &Path, rules: &IgnoreRuleSet) -> Vec<TreeNode> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot read directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut nodes = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if rules.is_ignored(&path) {
            tracing::debug!("Skipping ignored entry {:?}", path);
            continue;
        }

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::debug!("Cannot stat {:?}: {}", path, e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_dir() {
            let children = build_tree(&path, rules);
            nodes.push(TreeNode::folder(name, path, children));
        } else {
            nodes.push(TreeNode::file(name, path));
        }
    }

    nodes.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    nodes
}

/// Flattens a built tree into its file paths, in traversal order.
pub fn flatten_files(nodes: &[TreeNode], out: &mut Vec<PathBuf>) {
    for node in nodes {
        match node.kind {
            NodeKind::File => out.push(node.path.clone()),
            NodeKind::Folder => flatten_files(&node.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::RuleCache;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_file(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    fn rules_for(temp: &TempDir) -> Arc<IgnoreRuleSet> {
        RuleCache::with_global_rules_path(temp.path().join("global-docignore.json"))
            .resolve(temp.path())
    }

    #[test]
    fn siblings_sort_case_insensitively_and_interleaved() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "b.txt");
        create_file(temp.path(), "A.txt");
        create_file(temp.path(), "cloud/nested.txt");
        create_file(temp.path(), "Beta/inner.txt");

        let nodes = build_tree(temp.path(), &rules_for(&temp));
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A.txt", "b.txt", "Beta", "cloud"]);
    }

    #[test]
    fn ignored_directories_are_pruned_not_just_filtered() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "keep.txt");
        create_file(temp.path(), "node_modules/pkg/index.js");

        let nodes = build_tree(temp.path(), &rules_for(&temp));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "keep.txt");
    }

    #[test]
    fn flatten_preserves_traversal_order() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "a.txt");
        create_file(temp.path(), "b/one.txt");
        create_file(temp.path(), "b/two.txt");
        create_file(temp.path(), "c.txt");

        let nodes = build_tree(temp.path(), &rules_for(&temp));
        let mut files = Vec::new();
        flatten_files(&nodes, &mut files);

        let rels: Vec<PathBuf> = files
            .iter()
            .map(|f| f.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rels,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b/one.txt"),
                PathBuf::from("b/two.txt"),
                PathBuf::from("c.txt"),
            ]
        );
    }

    #[test]
    fn missing_directory_yields_empty_tree() {
        let temp = TempDir::new().unwrap();
        let rules = rules_for(&temp);
        let gone = temp.path().join("never-created");
        assert!(build_tree(&gone, &rules).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_leaves_not_descended() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "real/inner.txt");
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let nodes = build_tree(temp.path(), &rules_for(&temp));
        let link = nodes.iter().find(|n| n.name == "link").unwrap();
        assert_eq!(link.kind, NodeKind::File);
        assert!(link.children.is_empty());
    }
}
