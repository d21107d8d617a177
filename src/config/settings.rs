use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::{GLOBAL_RULES_FILE, REPO_RULES_FILE};

const APP_NAME: &str = "Docweave";

/// Placeholder content for a repo rules file created on demand.
const REPO_RULES_TEMPLATE: &str = "\
# Glob patterns excluded from generated documents.
# One pattern per line; lines starting with '#' are comments.
";

/// Returns the platform-specific configuration directory for the application.
pub fn config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "docweave", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the global ignore rule file.
pub fn global_rules_path() -> Option<PathBuf> {
    config_directory().map(|dir| dir.join(GLOBAL_RULES_FILE))
}

/// Loads the global ignore rules as a list of glob strings.
///
/// `override_path` substitutes the default location (used by tests and by
/// shells that relocate their configuration). A missing file yields an empty
/// list; so does a file that cannot be read or parsed, after a warning.
/// Rule resolution is best-effort, so this never fails.
pub fn load_global_rules(override_path: Option<&Path>) -> Vec<String> {
    let path = match override_path.map(Path::to_path_buf).or_else(global_rules_path) {
        Some(path) => path,
        None => {
            tracing::warn!("Could not determine config directory; skipping global rules");
            return Vec::new();
        }
    };

    if !path.exists() {
        tracing::debug!("No global rules file at {:?}", path);
        return Vec::new();
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "Failed to read global rules at {:?}: {}. Treating as empty.",
                path,
                e
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&content) {
        Ok(rules) => {
            tracing::debug!("Loaded {} global rule(s) from {:?}", rules.len(), path);
            rules
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse global rules at {:?}: {}. Treating as empty.",
                path,
                e
            );
            Vec::new()
        }
    }
}

/// Saves the global ignore rules, creating the config directory if needed.
pub fn save_global_rules(rules: &[String], override_path: Option<&Path>) -> Result<()> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(global_rules_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created config directory: {:?}", parent);
        }
    }

    let json = serde_json::to_string_pretty(rules)?;
    fs::write(&path, json)?;
    tracing::info!("Saved {} global rule(s) to {:?}", rules.len(), path);

    Ok(())
}

/// Ensures `<repo_root>/.docignore` exists, creating it with a placeholder
/// comment when absent, and returns its path for the shell to open in an
/// editor. Callers should reset cached rules for the root after the user
/// edits the file.
pub fn ensure_repo_rules_file(repo_root: &Path) -> Result<PathBuf> {
    let path = repo_root.join(REPO_RULES_FILE);
    if !path.exists() {
        fs::write(&path, REPO_RULES_TEMPLATE)?;
        tracing::info!("Created repo rules file at {:?}", path);
    }
    Ok(path)
}

// Platform-specific locations of the global rules file for reference:
// macOS:   ~/Library/Application Support/com.docweave.Docweave/global-docignore.json
// Linux:   ~/.config/docweave/global-docignore.json
// Windows: %APPDATA%\docweave\Docweave\config\global-docignore.json
