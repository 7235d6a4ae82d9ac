use anyhow::Result;
use clap::Parser;
use installer_core::cli::{Cli, Command};
use installer_core::config::InstallerConfig;
use installer_core::localization::LanguageCatalog;
use installer_core::logging;
use installer_core::session::{FileSession, MemorySession, SessionStore};
use installer_core::storage::StorageData;
use installer_core::{Wizard, WizardInputs};
use installer_hal::{CommandHal, FakeHal, InstallerHal, OsRelease};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with(cli.log_file.clone());

    let wizard = build_wizard(&cli)?;
    match cli.command {
        Some(Command::Dump) => {
            print!("{}", installer_tui::wizard::dump_all_steps(wizard));
            Ok(())
        }
        None => {
            let hal = build_hal(&cli)?;
            installer_tui::wizard::run(wizard, hal)
        }
    }
}

fn build_wizard(cli: &Cli) -> Result<Wizard> {
    let localization = match &cli.localization {
        Some(path) => LanguageCatalog::load(path)?,
        None => LanguageCatalog::builtin(),
    };
    let storage = match &cli.storage {
        Some(path) => StorageData::load(path)?,
        None if cli.fake_storage => StorageData::demo(),
        None => {
            log::warn!("No storage data given, no disks will be offered");
            StorageData::default()
        }
    };
    let os_release = OsRelease::load(&cli.os_release).unwrap_or_else(|err| {
        log::warn!("{:#}", err);
        OsRelease::default()
    });
    let session: Box<dyn SessionStore> = match &cli.session_file {
        Some(path) => Box::new(FileSession::open(path)),
        None => Box::new(MemorySession::new()),
    };

    Ok(Wizard::new(
        WizardInputs {
            is_boot_iso: cli.boot_iso,
            localization,
            storage,
            os_release,
        },
        session,
    ))
}

fn build_hal(cli: &Cli) -> Result<Arc<dyn InstallerHal>> {
    if cli.fake_storage {
        log::info!("Using the fake storage backend");
        return Ok(Arc::new(FakeHal::new()));
    }
    let config = match &cli.config {
        Some(path) => InstallerConfig::load(path)?,
        None => InstallerConfig::default(),
    };
    Ok(Arc::new(CommandHal::new(config.command_hal_config())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use installer_core::session::SCENARIO_KEY;
    use installer_core::ScenarioId;

    #[test]
    fn dump_with_fake_storage_lists_every_visible_step() {
        let cli = Cli::try_parse_from(["os-installer", "dump", "--boot-iso", "--fake-storage"])
            .unwrap();
        let dump = installer_tui::wizard::dump_all_steps(build_wizard(&cli).unwrap());
        assert!(dump.contains("STEP: Welcome"));
        assert!(dump.contains("vda"));
        assert!(dump.contains("STEP: Disk encryption"));
        assert!(dump.contains("STEP: Review and install"));
    }

    #[test]
    fn scenario_is_read_from_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSession::open(&path)
            .set(SCENARIO_KEY, "mount-point-mapping")
            .unwrap();

        let cli = Cli::try_parse_from([
            "os-installer",
            "--fake-storage",
            "--session-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let wizard = build_wizard(&cli).unwrap();
        assert_eq!(
            wizard.state().storage_scenario_id,
            ScenarioId::MountPointMapping
        );
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["os-installer", "--config", "/nonexistent/installer.toml"])
            .unwrap();
        assert!(build_hal(&cli).is_err());
    }
}
