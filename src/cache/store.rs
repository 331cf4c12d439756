// Cache store for reading and writing cached data.
// Handles JSON serialization and filesystem operations for issues and schema.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::issue::IssueRecord;

use super::paths::CacheLayout;

/// Read cached JSON data from a file, `None` if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&contents)?;
    Ok(Some(data))
}

/// Write data to cache as JSON, replacing whatever was there.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(data)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    if let Err(e) = write_then_rename(&temp_path, path, json.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = json.len(), "wrote cache file");
    Ok(())
}

fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(temp_path, path)
}

/// Replace the cached issue list for a repository.
pub fn store_issues(
    layout: &CacheLayout,
    owner: &str,
    repo: &str,
    issues: &[IssueRecord],
) -> Result<()> {
    write_json(&layout.issues_path(owner, repo), issues)
}

/// Load the cached issue list for a repository.
///
/// Fails with [`ScrapeError::CacheMiss`] when nothing has been cached yet.
pub fn load_issues(layout: &CacheLayout, owner: &str, repo: &str) -> Result<Vec<IssueRecord>> {
    let path = layout.issues_path(owner, repo);
    read_json(&path)?.ok_or(ScrapeError::CacheMiss(path))
}

/// Read the cached schema document, if any.
pub fn read_schema(
    layout: &CacheLayout,
    owner: &str,
    repo: &str,
) -> Result<Option<serde_json::Value>> {
    read_json(&layout.schema_path(owner, repo))
}

/// Persist a schema document.
pub fn write_schema(
    layout: &CacheLayout,
    owner: &str,
    repo: &str,
    schema: &serde_json::Value,
) -> Result<()> {
    write_json(&layout.schema_path(owner, repo), schema)
}
