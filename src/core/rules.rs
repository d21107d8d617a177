//! Layered ignore-rule resolution and the per-root rule cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::pattern::{self, PatternSet};
use crate::config;

/// The resolved, combined ignore configuration for one repository root.
///
/// Patterns are the concatenation of built-in defaults, global user rules and
/// repo-local rules, in that order. Matching is OR-semantics: any pattern hit
/// ignores the path. Order carries no negation or precedence.
#[derive(Debug)]
pub struct IgnoreRuleSet {
    root: PathBuf,
    patterns: Vec<String>,
    matchers: PatternSet,
}

impl IgnoreRuleSet {
    /// The repository root this rule set applies to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The merged pattern list in resolution order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns `true` if `path` is excluded by this rule set.
    ///
    /// Paths outside the root, and the root itself, are never ignored: the
    /// rules only speak about entries below the root.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let rel = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            Err(_) => return false,
        };
        if rel.as_os_str().is_empty() {
            return false;
        }
        self.matchers.is_match(&pattern::to_posix(rel))
    }
}

/// Process-wide cache of resolved rule sets, keyed by repository root.
///
/// Resolution is lazy; a cached set stays valid until explicitly invalidated,
/// so edits to rule files become visible only after [`RuleCache::invalidate`].
/// Concurrent resolution of the same uncached root may duplicate work; the
/// last writer wins, which is harmless because the inputs are identical.
#[derive(Debug, Default)]
pub struct RuleCache {
    global_rules_override: Option<PathBuf>,
    sets: Mutex<HashMap<PathBuf, Arc<IgnoreRuleSet>>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache whose global rules are read from `path` instead of the
    /// per-user configuration area.
    pub fn with_global_rules_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_rules_override: Some(path.into()),
            sets: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the rule set for `repo_root`, resolving and caching it on
    /// first access.
    pub fn resolve(&self, repo_root: &Path) -> Arc<IgnoreRuleSet> {
        if let Some(set) = self
            .sets
            .lock()
            .expect("Rule cache mutex was poisoned. This should not happen.")
            .get(repo_root)
        {
            tracing::debug!("Rule cache hit for {:?}", repo_root);
            return Arc::clone(set);
        }

        let set = Arc::new(self.load(repo_root));
        self.sets
            .lock()
            .expect("Rule cache mutex was poisoned. This should not happen.")
            .insert(repo_root.to_path_buf(), Arc::clone(&set));
        set
    }

    /// Drops the cached set for `repo_root`, or every cached set when `None`.
    /// The next resolve re-reads all three rule sources.
    pub fn invalidate(&self, repo_root: Option<&Path>) {
        let mut sets = self
            .sets
            .lock()
            .expect("Rule cache mutex was poisoned. This should not happen.");
        match repo_root {
            Some(root) => {
                sets.remove(root);
                tracing::info!("Invalidated ignore rules for {:?}", root);
            }
            None => {
                sets.clear();
                tracing::info!("Invalidated all cached ignore rules");
            }
        }
    }

    fn load(&self, repo_root: &Path) -> IgnoreRuleSet {
        let mut patterns: Vec<String> = config::DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect();

        let global = config::settings::load_global_rules(self.global_rules_override.as_deref());
        let local = load_repo_rules(repo_root);
        tracing::info!(
            "Resolved ignore rules for {:?}: {} built-in, {} global, {} local",
            repo_root,
            patterns.len(),
            global.len(),
            local.len()
        );
        patterns.extend(global);
        patterns.extend(local);

        let matchers = PatternSet::compile(&patterns);
        IgnoreRuleSet {
            root: repo_root.to_path_buf(),
            patterns,
            matchers,
        }
    }
}

/// Reads `<repo_root>/.docignore` as newline-delimited patterns. Absence and
/// unreadability both yield no patterns from this source.
fn load_repo_rules(repo_root: &Path) -> Vec<String> {
    let path = repo_root.join(config::REPO_RULES_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No repo rules file at {:?}", path);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(
                "Failed to read repo rules at {:?}: {}. Treating as empty.",
                path,
                e
            );
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
