use super::super::app::{App, EncryptionFocus, MethodFocus};
use crate::widgets::{button, checkbox, cursor, radio};
use installer_core::footer::BACK_LABEL;
use installer_core::scenario::ScenarioId;
use installer_core::storage::format_size;
use installer_core::{StepData, StepId};

/// Body lines for `step`. Cursor markers are only drawn for the active step.
pub(crate) fn step_lines(app: &App, step: StepId, data: Option<&StepData>) -> Vec<String> {
    let active = app.current_step() == step;
    let mut lines = match data {
        Some(StepData::Language { catalog }) => {
            let mut lines = vec!["Select the language used during the installation.".to_string()];
            lines.push(String::new());
            for (index, locale) in catalog.ordered_locales().iter().enumerate() {
                lines.push(format!(
                    "{} {} {} ({})",
                    cursor(active && index == app.language_index),
                    radio(locale.locale_id == catalog.language),
                    locale.native_name,
                    locale.english_name
                ));
            }
            lines
        }
        Some(StepData::InstallationMethod {
            devices,
            selected_disks,
        }) => {
            let current = app.wizard.state().storage_scenario_id;
            let mut lines = vec!["How would you like to install?".to_string()];
            for (index, id) in ScenarioId::all().iter().enumerate() {
                let focused = active
                    && app.method_focus == MethodFocus::Scenarios
                    && index == app.scenario_index;
                let scenario = id.scenario();
                lines.push(format!(
                    "{} {} {}",
                    cursor(focused),
                    radio(*id == current),
                    scenario.label
                ));
                lines.push(format!("      {}", scenario.detail));
            }
            lines.push(String::new());
            lines.push("Destination".to_string());
            if devices.is_empty() {
                lines.push("  No usable disks were found.".to_string());
            }
            for (index, device) in devices.iter().enumerate() {
                let focused =
                    active && app.method_focus == MethodFocus::Disks && index == app.disk_index;
                lines.push(format!(
                    "{} {} {} {} ({})",
                    cursor(focused),
                    checkbox(selected_disks.contains(&device.name)),
                    device.name,
                    device.description,
                    format_size(device.size)
                ));
            }
            lines
        }
        Some(StepData::MountPointMapping {
            selected_disks,
            partitioning,
        }) => {
            let mut lines = vec![format!("Selected disks: {}", selected_disks.join(", "))];
            lines.push(String::new());
            match partitioning {
                Some(partitioning) => {
                    for request in &partitioning.requests {
                        lines.push(format!(
                            "  {:<12} {:<12} {}",
                            request.mount_point,
                            request.device_spec,
                            if request.reformat { "reformat" } else { "keep" }
                        ));
                    }
                    if !partitioning.has_root() {
                        lines.push("A root (/) mount point is required.".to_string());
                    }
                }
                None => lines.push("No mount points have been assigned.".to_string()),
            }
            lines.push(String::new());
            lines.push(format!(
                "{} Reuse the existing partitioning",
                checkbox(app.wizard.state().reuse_partitioning)
            ));
            lines
        }
        Some(StepData::DiskEncryption) => {
            let encryption = &app.wizard.state().storage_encryption;
            let focus = |field: EncryptionFocus| cursor(active && app.encryption_focus == field);
            let mut lines = vec![format!(
                "{} {} Encrypt my data",
                focus(EncryptionFocus::Toggle),
                checkbox(encryption.encrypt)
            )];
            if encryption.encrypt {
                for (field, input) in [
                    (EncryptionFocus::Password, &app.password),
                    (EncryptionFocus::Confirm, &app.confirm_password),
                ] {
                    lines.push(format!("{} {}: {}", focus(field), input.label, input.display()));
                }
                if encryption.password.is_empty() {
                    lines.push("Enter a passphrase.".to_string());
                } else if encryption.password != encryption.confirm_password {
                    lines.push("Passphrases do not match.".to_string());
                }
            }
            lines
        }
        Some(StepData::Review {
            language,
            selected,
            partitioning,
            scenario,
        }) => {
            let mut lines = Vec::new();
            // An unresolved language is left out rather than shown as an error.
            if let Some(language) = language {
                lines.push(format!("Language: {}", language.native_name));
            }
            lines.push(format!("Installation method: {}", scenario.scenario().label));
            lines.push("Disks:".to_string());
            for device in selected {
                lines.push(format!(
                    "  {} {} ({})",
                    device.name,
                    device.description,
                    format_size(device.size)
                ));
            }
            if *scenario == ScenarioId::MountPointMapping {
                if let Some(partitioning) = partitioning {
                    lines.push("Mount points:".to_string());
                    for request in &partitioning.requests {
                        lines.push(format!("  {} on {}", request.mount_point, request.device_spec));
                    }
                }
            } else {
                let encrypt = app.wizard.state().storage_encryption.encrypt;
                lines.push(format!(
                    "Encryption: {}",
                    if encrypt { "enabled" } else { "disabled" }
                ));
            }
            lines
        }
        None => vec!["(no content)".to_string()],
    };

    if active {
        if let Some(notification) = app.wizard.step_props().own_notification() {
            lines.push(String::new());
            lines.push(format!("⚠ {}", notification.message));
        }
    }
    lines
}

/// Footer block: buttons, advisories, then key help.
pub(crate) fn footer_lines(app: &App) -> Vec<String> {
    let Some(view) = app.wizard.footer_view() else {
        return vec!["⏳ Applying storage configuration...".to_string()];
    };
    let mut lines = vec![format!(
        "{}  {}  {}",
        button(BACK_LABEL, view.back_disabled),
        button(view.next_label, view.next_disabled),
        button(view.quit_label, false)
    )];
    if let Some(warning) = view.warning {
        lines.push(format!("⚠ {}", warning));
    }
    if let Some(hint) = view.hint {
        lines.push(hint.to_string());
    }
    if let Some(status) = &app.status_message {
        lines.push(status.clone());
    }
    for message in app.wizard.error_notifications() {
        lines.push(format!("✖ {}", message));
    }
    if !app.wizard.error_notifications().is_empty() {
        lines.push("x: dismiss notifications".to_string());
    }
    lines.push(expected_actions(app.current_step()).to_string());
    lines
}

pub(crate) fn expected_actions(step: StepId) -> &'static str {
    match step {
        StepId::InstallationMethod => {
            "↑/↓: move  Tab: method/disks  Space: select  Enter: next  Esc: back  q: quit  1-9: go to step"
        }
        StepId::MountPointMapping => {
            "r: reuse partitioning  Enter: next  Esc: back  q: quit  1-9: go to step"
        }
        StepId::DiskEncryption => {
            "Tab: next field  Space: toggle  Enter: next  Esc: back  q: quit  1-9: go to step"
        }
        StepId::InstallationLanguage => "↑/↓: language  Enter: next  q: quit",
        _ => "Enter: next  Esc: back  q: quit  1-9: go to step",
    }
}
