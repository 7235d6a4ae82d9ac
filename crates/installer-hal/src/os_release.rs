//! Parsing helpers for `/etc/os-release`.

use anyhow::{Context, Result};
use std::path::Path;

/// The subset of os-release the wizard shows (title bar, review screen).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub name: Option<String>,
    pub pretty_name: Option<String>,
    pub version_id: Option<String>,
}

impl OsRelease {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read os-release: {}", path.display()))?;
        Ok(parse_os_release(&content))
    }

    /// Human readable product name, preferring `PRETTY_NAME`.
    pub fn display_name(&self) -> String {
        if let Some(pretty) = &self.pretty_name {
            return pretty.clone();
        }
        match (&self.name, &self.version_id) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name.clone(),
            _ => self.id.clone(),
        }
    }
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches('"').trim_matches('\'').to_string()
}

/// Parses `os-release` content. `id` is lowercased and falls back to the
/// lowercased `NAME`, then to `unknown`.
pub fn parse_os_release(content: &str) -> OsRelease {
    let mut id: Option<String> = None;
    let mut release = OsRelease::default();

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some(value) = line.strip_prefix("ID=") {
            id = Some(unquote(value).to_lowercase());
        } else if let Some(value) = line.strip_prefix("NAME=") {
            release.name = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
            release.pretty_name = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
            release.version_id = Some(unquote(value));
        }
    }

    release.id = id
        .or_else(|| release.name.as_ref().map(|n| n.to_lowercase()))
        .unwrap_or_else(|| "unknown".to_string());
    release
}
