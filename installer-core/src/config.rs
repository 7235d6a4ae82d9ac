//! Installer configuration file.
//!
//! ```toml
//! [storage]
//! apply_command = { program = "/usr/libexec/installer/apply-storage" }
//! reset_command = { program = "/usr/libexec/installer/apply-storage", args = ["--reset"] }
//! timeout_secs = 600
//!
//! [system]
//! reboot_command = { program = "systemctl", args = ["reboot"] }
//! ```

use anyhow::{Context, Result};
use installer_hal::hal::command_hal::DEFAULT_STORAGE_TIMEOUT;
use installer_hal::{CommandHalConfig, CommandSpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    pub storage: StorageConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub apply_command: Option<CommandSpec>,
    pub reset_command: Option<CommandSpec>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    pub reboot_command: Option<CommandSpec>,
    pub quit_command: Option<CommandSpec>,
}

impl InstallerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Backend settings; unset entries keep the backend defaults.
    pub fn command_hal_config(&self) -> CommandHalConfig {
        let defaults = CommandHalConfig::default();
        CommandHalConfig {
            apply_storage: self.storage.apply_command.clone(),
            reset_partitioning: self.storage.reset_command.clone(),
            reboot: self.system.reboot_command.clone().or(defaults.reboot),
            quit: self.system.quit_command.clone().or(defaults.quit),
            storage_timeout: self
                .storage
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT),
        }
    }
}

pub fn parse_config(text: &str) -> Result<InstallerConfig> {
    let config: InstallerConfig = toml::from_str(text).context("failed to parse config TOML")?;
    if config.storage.timeout_secs == Some(0) {
        anyhow::bail!("storage.timeout_secs must be greater than zero");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_backend_defaults() {
        let config = parse_config("").unwrap();
        let hal = config.command_hal_config();
        assert!(hal.apply_storage.is_none());
        assert_eq!(hal.reboot, Some(CommandSpec::new("systemctl", &["reboot"])));
        assert_eq!(hal.storage_timeout, DEFAULT_STORAGE_TIMEOUT);
    }

    #[test]
    fn parses_commands_and_timeout() {
        let doc = r#"
[storage]
apply_command = { program = "/usr/libexec/apply", args = ["--json"] }
reset_command = { program = "/usr/libexec/apply", args = ["--reset"] }
timeout_secs = 30

[system]
quit_command = { program = "true" }
"#;
        let hal = parse_config(doc).unwrap().command_hal_config();
        assert_eq!(
            hal.apply_storage,
            Some(CommandSpec::new("/usr/libexec/apply", &["--json"]))
        );
        assert_eq!(
            hal.reset_partitioning,
            Some(CommandSpec::new("/usr/libexec/apply", &["--reset"]))
        );
        assert_eq!(hal.quit, Some(CommandSpec::new("true", &[])));
        assert_eq!(hal.storage_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_unknown_keys_and_zero_timeout() {
        assert!(parse_config("[storage]\napply = \"x\"\n").is_err());
        assert!(parse_config("[storage]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InstallerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read config"));
    }
}
