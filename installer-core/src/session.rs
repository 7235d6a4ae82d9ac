//! Session-scoped key/value persistence.
//!
//! The wizard only persists the chosen storage scenario so that a reload of
//! the front-end within the same installer session keeps it. The medium is
//! injected: memory for tests, a JSON file for the live installer.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SCENARIO_KEY: &str = "storage-scenario-id";

pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut session = Self::default();
        session.values.insert(key.to_string(), value.to_string());
        session
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file session store, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSession {
    /// Open the session file. A missing file is an empty session; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: &Path) -> Self {
        let values = match load_values(path) {
            Ok(values) => values,
            Err(err) => {
                log::warn!("Ignoring session file {}: {:#}", path.display(), err);
                BTreeMap::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            values,
        }
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        save_values_atomic(&self.path, &self.values)
    }
}

fn load_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse session file")
}

fn save_values_atomic(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
    }

    let tmp_path = temp_path(path);
    let payload = serde_json::to_string_pretty(values).context("Failed to serialize session")?;

    let mut file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp session file: {}", tmp_path.display()))?;
    file.write_all(payload.as_bytes())
        .context("Failed to write session")?;
    file.sync_all().context("Failed to flush session")?;

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to atomically replace session file: {}",
            path.display()
        )
    })?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("session.json");
    path.with_file_name(format!("{}.tmp", file_name))
}
