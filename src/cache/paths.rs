// Cache path utilities.
// Lays out `<root>/<owner>/<repo>/{issues,schema}.json`.

use std::path::{Path, PathBuf};

/// Default cache root, relative to the working directory.
pub const DEFAULT_CACHE_ROOT: &str = ".cache";

const ISSUES_FILE: &str = "issues.json";
const SCHEMA_FILE: &str = "schema.json";

/// Filesystem layout of the cache rooted at a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to a repository's directory.
    pub fn repo_dir(&self, owner: &str, repo: &str) -> PathBuf {
        self.root.join(sanitize_name(owner)).join(sanitize_name(repo))
    }

    /// Path to a repository's cached issue list.
    pub fn issues_path(&self, owner: &str, repo: &str) -> PathBuf {
        self.repo_dir(owner, repo).join(ISSUES_FILE)
    }

    /// Path to a repository's cached schema document.
    pub fn schema_path(&self, owner: &str, repo: &str) -> PathBuf {
        self.repo_dir(owner, repo).join(SCHEMA_FILE)
    }
}

impl Default for CacheLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ROOT)
    }
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    // Never let a name climb out of the cache root.
    match cleaned.as_str() {
        "" | "." | ".." => format!("{}_", cleaned.replace('.', "_")),
        _ => cleaned,
    }
}
