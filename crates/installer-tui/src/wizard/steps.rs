//! Per-step key handling and form validation.
//!
//! Each step consumes the keys it understands; everything else falls through
//! to the footer bindings in `App::handle_step_input`.

use super::app::{App, EncryptionFocus, MethodFocus};
use crossterm::event::{KeyCode, KeyEvent};
use installer_core::scenario::ScenarioId;
use installer_core::{StepHost, StepId, StorageEncryption};

pub(super) fn handle_key(app: &mut App, step: StepId, key: KeyEvent) -> bool {
    match step {
        StepId::InstallationLanguage => handle_language(app, key),
        StepId::InstallationMethod => handle_method(app, key),
        StepId::MountPointMapping => handle_mount_point_mapping(app, key),
        StepId::DiskEncryption => handle_encryption(app, key),
        StepId::DiskConfiguration | StepId::InstallationReview => false,
    }
}

/// Whether the step's form allows Next.
pub fn is_valid(app: &App, step: StepId) -> bool {
    let wizard = &app.wizard;
    match step {
        StepId::InstallationLanguage => wizard.localization().resolve_language().is_some(),
        StepId::InstallationMethod => !wizard.storage().selected_disks.is_empty(),
        StepId::MountPointMapping => wizard
            .storage()
            .partitioning
            .as_ref()
            .map(|partitioning| partitioning.has_root())
            .unwrap_or(false),
        StepId::DiskEncryption => wizard.state().storage_encryption.is_valid(),
        StepId::DiskConfiguration | StepId::InstallationReview => true,
    }
}

/// Raise a notification when the language step has nothing sensible to
/// preselect.
pub(super) fn check_language(app: &mut App) {
    if !app.wizard.sequence().contains(StepId::InstallationLanguage) {
        return;
    }
    let catalog = app.wizard.localization();
    if catalog.locales().next().is_none() {
        app.wizard.on_add_error_notification("No languages are available.");
    } else if catalog.resolve_language().is_none() {
        let message = format!(
            "Language {} is not available, pick one from the list.",
            catalog.language
        );
        app.wizard.on_add_error_notification(&message);
    }
}

fn move_index(index: &mut usize, len: usize, up: bool) {
    if len == 0 {
        *index = 0;
    } else if up {
        *index = index.saturating_sub(1);
    } else {
        *index = (*index + 1).min(len - 1);
    }
}

fn direction(key: &KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(true),
        KeyCode::Down | KeyCode::Char('j') => Some(false),
        _ => None,
    }
}

fn handle_language(app: &mut App, key: KeyEvent) -> bool {
    let Some(up) = direction(&key) else {
        return false;
    };
    let locales: Vec<String> = app
        .wizard
        .localization()
        .ordered_locales()
        .iter()
        .map(|locale| locale.locale_id.clone())
        .collect();
    move_index(&mut app.language_index, locales.len(), up);
    if let Some(locale_id) = locales.get(app.language_index) {
        app.wizard.select_language(locale_id);
    }
    true
}

fn handle_method(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Tab {
        app.method_focus = match app.method_focus {
            MethodFocus::Scenarios => MethodFocus::Disks,
            MethodFocus::Disks => MethodFocus::Scenarios,
        };
        return true;
    }

    let scenarios = ScenarioId::all();
    let disks: Vec<String> = app.wizard.storage().device_names().map(String::from).collect();

    if let Some(up) = direction(&key) {
        match app.method_focus {
            MethodFocus::Scenarios => move_index(&mut app.scenario_index, scenarios.len(), up),
            MethodFocus::Disks => move_index(&mut app.disk_index, disks.len(), up),
        }
        return true;
    }

    if key.code != KeyCode::Char(' ') {
        return false;
    }
    match app.method_focus {
        MethodFocus::Scenarios => {
            if let Some(id) = scenarios.get(app.scenario_index) {
                app.wizard.set_storage_scenario_id(*id);
            }
        }
        MethodFocus::Disks => {
            if let Some(name) = disks.get(app.disk_index) {
                app.wizard.toggle_disk(name);
            }
        }
    }
    true
}

fn handle_mount_point_mapping(app: &mut App, key: KeyEvent) -> bool {
    if key.code != KeyCode::Char('r') {
        return false;
    }
    let reuse = !app.wizard.state().reuse_partitioning;
    app.wizard.set_reuse_partitioning(reuse);
    true
}

fn handle_encryption(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Tab {
        app.encryption_focus = app.encryption_focus.next();
        return true;
    }

    let mut encryption = app.wizard.state().storage_encryption.clone();
    let changed = match app.encryption_focus {
        EncryptionFocus::Toggle => {
            if key.code != KeyCode::Char(' ') {
                return false;
            }
            encryption.encrypt = !encryption.encrypt;
            true
        }
        EncryptionFocus::Password => app.password.handle_key(key),
        EncryptionFocus::Confirm => app.confirm_password.handle_key(key),
    };
    if !changed {
        return false;
    }

    app.wizard.set_storage_encryption(StorageEncryption {
        encrypt: encryption.encrypt,
        password: app.password.value().to_string(),
        confirm_password: app.confirm_password.value().to_string(),
    });
    true
}
