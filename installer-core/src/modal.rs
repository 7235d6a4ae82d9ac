//! Confirmation dialogs raised from the footer.

use crate::errors::WizardError;
use crate::scenario::ScenarioId;
use crate::wizard::{Effect, Wizard};
use installer_hal::ExitAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Quit,
    ReviewConfirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub body: String,
    pub action_label: &'static str,
    pub cancel_label: &'static str,
    /// Render the action as dangerous.
    pub destructive: bool,
}

pub fn quit_modal_view(is_boot_iso: bool, os_name: &str) -> ModalView {
    if is_boot_iso {
        ModalView {
            title: "Reboot system?".to_string(),
            body: format!(
                "This action will reboot your system, and all the data entered in {} installation will be lost.",
                os_name
            ),
            action_label: "Reboot",
            cancel_label: "Continue installation",
            destructive: true,
        }
    } else {
        ModalView {
            title: format!("Quit {} installation?", os_name),
            body: "Your progress will not be saved.".to_string(),
            action_label: "Quit",
            cancel_label: "Continue installation",
            destructive: true,
        }
    }
}

pub fn review_modal_view(scenario: ScenarioId) -> ModalView {
    let scenario = scenario.scenario();
    ModalView {
        title: scenario.dialog_title.to_string(),
        body: scenario.dialog_warning.to_string(),
        action_label: scenario.button_label,
        cancel_label: "Back",
        destructive: scenario.destructive,
    }
}

impl Wizard {
    pub fn modal(&self) -> Option<Modal> {
        if self.footer.quit_waits_confirmation {
            Some(Modal::Quit)
        } else if self.footer.next_waits_confirmation {
            Some(Modal::ReviewConfirm)
        } else {
            None
        }
    }

    pub fn modal_view(&self) -> Option<ModalView> {
        self.modal().map(|modal| match modal {
            Modal::Quit => quit_modal_view(self.is_boot_iso(), &self.os_release().display_name()),
            Modal::ReviewConfirm => review_modal_view(self.state.storage_scenario_id),
        })
    }

    /// Confirm the quit dialog. The host performs the returned exit.
    pub fn confirm_quit(&mut self) -> Result<Effect, WizardError> {
        if !self.footer.quit_waits_confirmation {
            return Err(WizardError::NoModal);
        }
        self.footer.quit_waits_confirmation = false;
        let action = ExitAction::for_boot_mode(self.is_boot_iso());
        log::info!("Quit confirmed, requesting {}", action);
        Ok(Effect::Exit(action))
    }

    pub fn cancel_quit(&mut self) -> Result<(), WizardError> {
        if !self.footer.quit_waits_confirmation {
            return Err(WizardError::NoModal);
        }
        self.footer.quit_waits_confirmation = false;
        Ok(())
    }

    /// Confirm the review dialog; the wizard is replaced by the progress
    /// view for good.
    pub fn confirm_installation(&mut self) -> Result<Effect, WizardError> {
        if !self.footer.next_waits_confirmation {
            return Err(WizardError::NoModal);
        }
        self.footer.next_waits_confirmation = false;
        self.state.is_installation_progress = true;
        log::info!(
            "Installation confirmed (scenario: {})",
            self.state.storage_scenario_id
        );
        Ok(Effect::BeginInstallation)
    }

    pub fn cancel_installation(&mut self) -> Result<(), WizardError> {
        if !self.footer.next_waits_confirmation {
            return Err(WizardError::NoModal);
        }
        self.footer.next_waits_confirmation = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StepHost;
    use crate::session::MemorySession;
    use crate::steps::StepId;
    use crate::wizard::{View, WizardInputs};

    fn wizard(is_boot_iso: bool) -> Wizard {
        Wizard::new(
            WizardInputs {
                is_boot_iso,
                ..WizardInputs::default()
            },
            Box::new(MemorySession::new()),
        )
    }

    #[test]
    fn quit_confirm_exits_once() {
        let mut wizard = wizard(true);
        wizard.quit().unwrap();
        assert_eq!(wizard.modal(), Some(Modal::Quit));
        assert_eq!(
            wizard.confirm_quit(),
            Ok(Effect::Exit(ExitAction::Reboot))
        );
        assert_eq!(wizard.modal(), None);
        assert_eq!(wizard.confirm_quit(), Err(WizardError::NoModal));
    }

    #[test]
    fn quit_cancel_keeps_wizard() {
        let mut wizard = wizard(false);
        wizard.quit().unwrap();
        wizard.cancel_quit().unwrap();
        assert_eq!(
            wizard.view(),
            View::Wizard {
                step: StepId::InstallationMethod,
                modal: None
            }
        );
    }

    #[test]
    fn quit_view_follows_boot_mode() {
        let boot = quit_modal_view(true, "Fedora");
        assert_eq!(boot.action_label, "Reboot");
        assert!(boot.body.contains("Fedora"));
        let live = quit_modal_view(false, "Fedora");
        assert_eq!(live.action_label, "Quit");
        assert_eq!(live.title, "Quit Fedora installation?");
    }

    #[test]
    fn review_modal_uses_scenario_texts() {
        let view = review_modal_view(ScenarioId::UseFreeSpace);
        assert_eq!(view.action_label, "Install");
        assert!(!view.destructive);
        assert!(review_modal_view(ScenarioId::EraseAll).destructive);
    }

    #[test]
    fn confirming_installation_switches_to_progress() {
        let mut wizard = wizard(false);
        wizard.navigate(StepId::InstallationReview);
        wizard.set_is_form_valid(true);
        wizard.next().unwrap();
        assert_eq!(wizard.modal(), Some(Modal::ReviewConfirm));

        assert_eq!(wizard.confirm_installation(), Ok(Effect::BeginInstallation));
        assert_eq!(wizard.view(), View::InstallationProgress);
        assert_eq!(wizard.back(), Err(WizardError::InstallationStarted));
        assert_eq!(
            wizard.jump_to(StepId::InstallationMethod),
            Err(WizardError::InstallationStarted)
        );
    }

    #[test]
    fn cancelling_installation_stays_on_review() {
        let mut wizard = wizard(false);
        wizard.navigate(StepId::InstallationReview);
        wizard.set_is_form_valid(true);
        wizard.next().unwrap();
        wizard.cancel_installation().unwrap();
        assert_eq!(wizard.modal(), None);
        assert_eq!(wizard.current_step(), StepId::InstallationReview);
        assert!(!wizard.state().is_installation_progress);
    }

    #[test]
    fn no_modal_to_answer() {
        let mut wizard = wizard(false);
        assert_eq!(wizard.cancel_quit(), Err(WizardError::NoModal));
        assert_eq!(wizard.confirm_installation(), Err(WizardError::NoModal));
        assert_eq!(wizard.cancel_installation(), Err(WizardError::NoModal));
    }
}
