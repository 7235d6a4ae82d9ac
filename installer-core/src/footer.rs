//! Footer controller: Next / Back / Quit for the active step.

use crate::errors::WizardError;
use crate::steps::StepId;
use crate::wizard::{Effect, Wizard};
use installer_hal::ApplyStorageRequest;

pub const NEXT_LABEL: &str = "Next";
pub const BACK_LABEL: &str = "Back";
pub const REQUIRED_SELECTION_HINT: &str = "To continue, select the devices to install to.";

/// Confirmation flags, scoped to the active step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FooterState {
    pub next_waits_confirmation: bool,
    pub quit_waits_confirmation: bool,
}

impl FooterState {
    pub fn is_waiting(&self) -> bool {
        self.next_waits_confirmation || self.quit_waits_confirmation
    }
}

/// How the footer renders for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub back_disabled: bool,
    pub next_disabled: bool,
    pub next_label: &'static str,
    pub quit_label: &'static str,
    pub warning: Option<&'static str>,
    pub hint: Option<&'static str>,
}

pub fn quit_label(is_boot_iso: bool) -> &'static str {
    if is_boot_iso {
        "Reboot"
    } else {
        "Quit"
    }
}

impl Wizard {
    /// `None` while a storage operation is in flight: no actions are offered.
    pub fn footer_view(&self) -> Option<FooterView> {
        if self.state.is_in_progress {
            return None;
        }
        let step = self.current_step();
        let scenario = self.state.storage_scenario_id.scenario();
        let is_review = step == StepId::InstallationReview;

        Some(FooterView {
            back_disabled: self.sequence().first() == Some(step),
            next_disabled: !self.state.is_form_valid || self.footer.next_waits_confirmation,
            next_label: if is_review {
                scenario.button_label
            } else {
                NEXT_LABEL
            },
            quit_label: quit_label(self.is_boot_iso()),
            warning: if is_review {
                scenario.screen_warning
            } else {
                None
            },
            hint: (step == StepId::InstallationMethod && !self.state.is_form_valid)
                .then_some(REQUIRED_SELECTION_HINT),
        })
    }

    /// Next button.
    pub fn next(&mut self) -> Result<Option<Effect>, WizardError> {
        self.ensure_interactive()?;
        if self.footer.quit_waits_confirmation {
            return Err(WizardError::ModalOpen);
        }
        let step = self.current_step();
        if !self.state.is_form_valid || self.footer.next_waits_confirmation {
            return Err(WizardError::NextDisabled(step));
        }

        // The next step runs its own validation.
        self.state.is_form_valid = true;

        match step {
            StepId::DiskEncryption => {
                let encryption = &self.state.storage_encryption;
                let request =
                    ApplyStorageRequest::with_encryption(encryption.encrypt, &encryption.password);
                Ok(Some(self.start_apply_storage(step, request)))
            }
            StepId::InstallationReview => {
                self.footer.next_waits_confirmation = true;
                Ok(None)
            }
            StepId::MountPointMapping => {
                let path = self
                    .storage()
                    .partitioning
                    .as_ref()
                    .map(|partitioning| partitioning.path.clone());
                let request = ApplyStorageRequest::with_partitioning(path);
                Ok(Some(self.start_apply_storage(step, request)))
            }
            _ => match self.sequence().next_after(step) {
                Some(next) => Ok(self.on_step_change(next, step)),
                None => Err(WizardError::NextDisabled(step)),
            },
        }
    }

    /// Back button.
    pub fn back(&mut self) -> Result<Option<Effect>, WizardError> {
        self.ensure_interactive()?;
        if self.footer.is_waiting() {
            return Err(WizardError::ModalOpen);
        }
        let step = self.current_step();
        let previous = self
            .sequence()
            .previous_before(step)
            .ok_or(WizardError::BackDisabled(step))?;

        self.state.is_form_valid = true;
        Ok(self.on_step_change(previous, step))
    }

    /// Quit/Reboot button. Only raises the confirmation.
    pub fn quit(&mut self) -> Result<(), WizardError> {
        self.ensure_interactive()?;
        if self.footer.next_waits_confirmation {
            return Err(WizardError::ModalOpen);
        }
        self.footer.quit_waits_confirmation = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StepHost;
    use crate::localization::LanguageCatalog;
    use crate::scenario::ScenarioId;
    use crate::session::MemorySession;
    use crate::storage::StorageData;
    use crate::wizard::WizardInputs;
    use installer_hal::OsRelease;

    fn wizard(is_boot_iso: bool) -> Wizard {
        Wizard::new(
            WizardInputs {
                is_boot_iso,
                localization: LanguageCatalog::builtin(),
                storage: StorageData::demo(),
                os_release: OsRelease::default(),
            },
            Box::new(MemorySession::new()),
        )
    }

    #[test]
    fn back_is_disabled_on_first_step() {
        let mut wizard = wizard(true);
        assert!(wizard.footer_view().unwrap().back_disabled);
        assert_eq!(
            wizard.back(),
            Err(WizardError::BackDisabled(StepId::InstallationLanguage))
        );
    }

    #[test]
    fn next_is_disabled_while_form_invalid() {
        let mut wizard = wizard(false);
        let view = wizard.footer_view().unwrap();
        assert!(view.next_disabled);
        assert_eq!(view.hint, Some(REQUIRED_SELECTION_HINT));
        assert_eq!(
            wizard.next(),
            Err(WizardError::NextDisabled(StepId::InstallationMethod))
        );
    }

    #[test]
    fn plain_step_advances_without_effect() {
        let mut wizard = wizard(true);
        wizard.set_is_form_valid(true);
        assert_eq!(wizard.next(), Ok(None));
        assert_eq!(wizard.current_step(), StepId::InstallationMethod);
        assert!(wizard.state().is_form_valid);
    }

    #[test]
    fn review_next_waits_for_confirmation() {
        let mut wizard = wizard(false);
        wizard.set_storage_scenario_id(ScenarioId::UseFreeSpace);
        wizard.navigate(StepId::InstallationReview);
        wizard.set_is_form_valid(true);

        let view = wizard.footer_view().unwrap();
        assert_eq!(view.next_label, "Install");
        assert_eq!(view.warning, None);

        assert_eq!(wizard.next(), Ok(None));
        assert!(wizard.footer_state().next_waits_confirmation);
        assert!(wizard.footer_view().unwrap().next_disabled);
        assert_eq!(wizard.current_step(), StepId::InstallationReview);
    }

    #[test]
    fn review_shows_scenario_warning() {
        let mut wizard = wizard(false);
        wizard.navigate(StepId::InstallationReview);
        let view = wizard.footer_view().unwrap();
        assert_eq!(view.next_label, "Erase data and install");
        assert!(view.warning.is_some());
    }

    #[test]
    fn quit_label_follows_boot_mode() {
        assert_eq!(wizard(true).footer_view().unwrap().quit_label, "Reboot");
        assert_eq!(wizard(false).footer_view().unwrap().quit_label, "Quit");
    }

    #[test]
    fn footer_is_hidden_while_in_progress() {
        let mut wizard = wizard(false);
        wizard.navigate(StepId::DiskEncryption);
        wizard.set_is_form_valid(true);
        let effect = wizard.next().unwrap();
        assert!(matches!(effect, Some(Effect::ApplyStorage(_))));
        assert!(wizard.footer_view().is_none());
        assert_eq!(wizard.next(), Err(WizardError::Busy));
        assert_eq!(wizard.back(), Err(WizardError::Busy));
        assert_eq!(wizard.quit(), Err(WizardError::Busy));
    }

    #[test]
    fn footer_state_resets_on_step_change() {
        let mut wizard = wizard(false);
        wizard.navigate(StepId::InstallationReview);
        wizard.set_is_form_valid(true);
        wizard.next().unwrap();
        wizard.cancel_installation().unwrap();
        wizard.quit().unwrap();
        wizard.cancel_quit().unwrap();
        wizard.navigate(StepId::DiskEncryption);
        assert_eq!(wizard.footer_state(), FooterState::default());
    }
}
