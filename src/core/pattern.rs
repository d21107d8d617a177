//! Glob compilation and matching for ignore rules.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// A compiled set of ignore patterns, matched against root-relative paths in
/// POSIX form.
///
/// Compilation is deliberately lossy: blank lines and `#` comments are
/// skipped, and a pattern that fails to compile degrades to "never matches"
/// instead of failing the whole set.
#[derive(Debug)]
pub struct PatternSet {
    set: GlobSet,
}

impl PatternSet {
    /// Compiles `patterns` with case-sensitive matching.
    pub fn compile(patterns: &[String]) -> Self {
        Self::compile_with_case(patterns, false)
    }

    /// Compiles `patterns`, optionally matching case-insensitively.
    ///
    /// A bare pattern matches at any depth (`b.txt` becomes `**/b.txt`). A
    /// trailing slash targets a directory and everything below it
    /// (`target/` becomes both `**/target` and `**/target/**`).
    pub fn compile_with_case(patterns: &[String], case_insensitive: bool) -> Self {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(dir_pattern) = trimmed.strip_suffix('/') {
                if dir_pattern.is_empty() {
                    continue;
                }
                // Match the directory itself, and everything inside it.
                add_glob(&mut builder, &format!("**/{}", dir_pattern), case_insensitive);
                add_glob(
                    &mut builder,
                    &format!("**/{}/**", dir_pattern),
                    case_insensitive,
                );
            } else {
                add_glob(&mut builder, &format!("**/{}", trimmed), case_insensitive);
            }
        }

        let set = builder.build().unwrap_or_else(|e| {
            tracing::error!("Failed to build glob set from patterns: {}", e);
            GlobSet::empty()
        });

        Self { set }
    }

    /// Returns `true` if `rel_path` (POSIX separators, relative to a repo
    /// root) matches any compiled pattern.
    pub fn is_match(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }

    /// Number of compiled matchers. Directory patterns contribute two.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

fn add_glob(builder: &mut GlobSetBuilder, glob: &str, case_insensitive: bool) {
    // `literal_separator` keeps `*` and `?` from crossing path separators;
    // `**` still does.
    match GlobBuilder::new(glob)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(compiled) => {
            builder.add(compiled);
        }
        Err(e) => {
            tracing::warn!("Skipping invalid ignore pattern {:?}: {}", glob, e);
        }
    }
}

/// Converts a root-relative path to its POSIX form for matching.
pub fn to_posix(rel_path: &Path) -> String {
    let mut unix = String::new();
    for component in rel_path.components() {
        if !unix.is_empty() {
            unix.push('/');
        }
        unix.push_str(&component.as_os_str().to_string_lossy());
    }
    unix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn set(patterns: &[&str]) -> PatternSet {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        PatternSet::compile(&owned)
    }

    #[test]
    fn bare_name_matches_at_any_depth() {
        let s = set(&["b.txt"]);
        assert!(s.is_match("b.txt"));
        assert!(s.is_match("src/b.txt"));
        assert!(s.is_match("a/deep/b.txt"));
        assert!(!s.is_match("src/nb.txt"));
    }

    #[test]
    fn star_does_not_cross_separators() {
        let s = set(&["*.log"]);
        assert!(s.is_match("run.log"));
        assert!(s.is_match("logs/run.log"));
        assert!(!s.is_match("run.log/keep"));
    }

    #[test]
    fn question_mark_matches_exactly_one_character() {
        let s = set(&["fo?.txt"]);
        assert!(s.is_match("foo.txt"));
        assert!(s.is_match("src/fob.txt"));
        assert!(!s.is_match("fo.txt"));
        assert!(!s.is_match("fo/x.txt"));
    }

    #[test]
    fn character_classes_match_members_only() {
        let s = set(&["[ab].rs"]);
        assert!(s.is_match("a.rs"));
        assert!(s.is_match("src/b.rs"));
        assert!(!s.is_match("c.rs"));
    }

    #[test]
    fn directory_pattern_matches_dir_and_contents() {
        let s = set(&["target/"]);
        assert!(s.is_match("target"));
        assert!(s.is_match("target/debug/app"));
        assert!(s.is_match("crates/foo/target"));
        assert!(!s.is_match("targets"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let s = set(&["# note", "", "   ", "*.tmp"]);
        assert_eq!(s.len(), 1);
        assert!(s.is_match("a.tmp"));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        let s = set(&["["]);
        assert!(s.is_empty());
        assert!(!s.is_match("["));
    }

    #[test]
    fn dotfiles_are_matchable() {
        let s = set(&[".git"]);
        assert!(s.is_match(".git"));
        assert!(s.is_match("vendor/.git"));
    }

    #[test]
    fn case_sensitivity_is_tunable() {
        let patterns = vec!["README".to_string()];

        let sensitive = PatternSet::compile(&patterns);
        assert!(sensitive.is_match("README"));
        assert!(!sensitive.is_match("readme"));

        let insensitive = PatternSet::compile_with_case(&patterns, true);
        assert!(insensitive.is_match("readme"));
        assert!(insensitive.is_match("docs/ReadMe"));
    }

    #[test]
    fn to_posix_joins_components_with_slashes() {
        let rel: PathBuf = ["src", "core", "mod.rs"].iter().collect();
        assert_eq!(to_posix(&rel), "src/core/mod.rs");
        assert_eq!(to_posix(Path::new("flat.txt")), "flat.txt");
    }
}
