pub mod settings;

/// File name of the per-repository ignore rule file, looked up at the repo
/// root. Newline-delimited glob patterns; `#` starts a comment line.
pub const REPO_RULES_FILE: &str = ".docignore";

/// File name of the user-global ignore rule file inside the configuration
/// directory. A JSON array of glob pattern strings.
pub const GLOBAL_RULES_FILE: &str = "global-docignore.json";

/// Patterns applied to every repository, ahead of global and repo-local
/// rules: version-control internals, dependency and build-output directories,
/// OS metadata files. Kept small on purpose; everything else is the user's
/// call.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "target",
    "build",
    "dist",
    ".idea",
    ".DS_Store",
    "Thumbs.db",
];
