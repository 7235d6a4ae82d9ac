//! Storage data as reported by the storage service: the devices present,
//! which disks the user picked, and the partitioning computed so far.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Child device names (partitions, LVs).
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPointRequest {
    pub mount_point: String,
    pub device_spec: String,
    #[serde(default)]
    pub reformat: bool,
}

/// A partitioning the storage service already computed (e.g. from mount
/// point assignment). `path` is the backend's handle for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partitioning {
    pub path: String,
    #[serde(default)]
    pub requests: Vec<MountPointRequest>,
}

impl Partitioning {
    pub fn has_root(&self) -> bool {
        self.requests.iter().any(|r| r.mount_point == "/")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageData {
    #[serde(default)]
    pub devices: BTreeMap<String, Device>,
    #[serde(default)]
    pub selected_disks: Vec<String>,
    #[serde(default)]
    pub partitioning: Option<Partitioning>,
}

impl StorageData {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read storage data: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse storage data: {}", path.display()))
    }

    /// Two disks and a prepared partitioning, for dry runs against the fake backend.
    pub fn demo() -> Self {
        let gib = 1024 * 1024 * 1024;
        let disk = |name: &str, description: &str, size: u64, children: &[&str]| Device {
            name: name.to_string(),
            description: description.to_string(),
            size,
            children: children.iter().map(|c| c.to_string()).collect(),
        };
        let devices = [
            disk("vda", "Virtio Block Device", 40 * gib, &["vda1", "vda2"]),
            disk("vdb", "Virtio Block Device", 20 * gib, &[]),
        ]
        .into_iter()
        .map(|d| (d.name.clone(), d))
        .collect();
        Self {
            devices,
            selected_disks: Vec::new(),
            partitioning: Some(Partitioning {
                path: "/org/installer/Storage/Partitioning/1".to_string(),
                requests: vec![
                    MountPointRequest {
                        mount_point: "/boot".to_string(),
                        device_spec: "vda1".to_string(),
                        reformat: true,
                    },
                    MountPointRequest {
                        mount_point: "/".to_string(),
                        device_spec: "vda2".to_string(),
                        reformat: true,
                    },
                ],
            }),
        }
    }

    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// Whether going from `self` to `other` changes the available device set
    /// or the disk selection. Either one invalidates reused partitioning.
    pub fn selection_differs(&self, other: &StorageData) -> bool {
        !self.device_names().eq(other.device_names()) || self.selected_disks != other.selected_disks
    }

    pub fn selected_devices(&self) -> impl Iterator<Item = &Device> {
        self.selected_disks
            .iter()
            .filter_map(|name| self.devices.get(name))
    }

    pub fn toggle_disk(&mut self, name: &str) {
        if let Some(pos) = self.selected_disks.iter().position(|d| d == name) {
            self.selected_disks.remove(pos);
        } else if self.devices.contains_key(name) {
            self.selected_disks.push(name.to_string());
        }
    }
}

/// Format a byte count the way the review screen shows disk sizes.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_differs_on_disk_change() {
        let before = StorageData::demo();
        let mut after = before.clone();
        after.toggle_disk("vda");
        assert!(before.selection_differs(&after));
    }

    #[test]
    fn selection_differs_on_device_set_change() {
        let before = StorageData::demo();
        let mut after = before.clone();
        after.devices.remove("vdb");
        assert!(before.selection_differs(&after));
    }

    #[test]
    fn selection_ignores_partitioning_changes() {
        let before = StorageData::demo();
        let mut after = before.clone();
        after.partitioning = None;
        assert!(!before.selection_differs(&after));
    }

    #[test]
    fn toggle_disk_ignores_unknown_devices() {
        let mut data = StorageData::demo();
        data.toggle_disk("sdz");
        assert!(data.selected_disks.is_empty());
        data.toggle_disk("vdb");
        data.toggle_disk("vdb");
        assert!(data.selected_disks.is_empty());
    }

    #[test]
    fn format_size_uses_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(20 * 1024 * 1024 * 1024), "20.0 GiB");
    }
}
