//! Key handling on top of the wizard controller.

use super::steps;
use super::worker::Completion;
use crate::input::InputField;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use installer_core::modal::Modal;
use installer_core::scenario::ScenarioId;
use installer_core::{Effect, StepHost, StepId, View, Wizard, WizardError};
use installer_hal::ExitAction;

/// Result of handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// The host must run this effect.
    Run(Effect),
    /// Leave the UI without an exit action.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFocus {
    Scenarios,
    Disks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionFocus {
    Toggle,
    Password,
    Confirm,
}

impl EncryptionFocus {
    pub fn next(self) -> Self {
        match self {
            EncryptionFocus::Toggle => EncryptionFocus::Password,
            EncryptionFocus::Password => EncryptionFocus::Confirm,
            EncryptionFocus::Confirm => EncryptionFocus::Toggle,
        }
    }
}

pub struct App {
    pub wizard: Wizard,
    pub language_index: usize,
    pub method_focus: MethodFocus,
    pub scenario_index: usize,
    pub disk_index: usize,
    pub encryption_focus: EncryptionFocus,
    pub password: InputField,
    pub confirm_password: InputField,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(wizard: Wizard) -> Self {
        let catalog = wizard.localization();
        let language_index = catalog
            .ordered_locales()
            .iter()
            .position(|locale| locale.locale_id == catalog.language)
            .unwrap_or(0);
        let scenario_index = ScenarioId::all()
            .iter()
            .position(|id| *id == wizard.state().storage_scenario_id)
            .unwrap_or(0);

        let mut app = Self {
            wizard,
            language_index,
            method_focus: MethodFocus::Scenarios,
            scenario_index,
            disk_index: 0,
            encryption_focus: EncryptionFocus::Toggle,
            password: InputField::secret("Passphrase"),
            confirm_password: InputField::secret("Confirm passphrase"),
            status_message: None,
        };
        app.revalidate();
        steps::check_language(&mut app);
        app
    }

    pub fn current_step(&self) -> StepId {
        self.wizard.current_step()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> InputResult {
        if key.kind != KeyEventKind::Press {
            return InputResult::Continue;
        }
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

        match self.wizard.view() {
            View::CriticalFailure(_) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => InputResult::Run(
                    Effect::Exit(ExitAction::for_boot_mode(self.wizard.is_boot_iso())),
                ),
                _ if ctrl_c => InputResult::Leave,
                _ => InputResult::Continue,
            },
            View::InstallationProgress if ctrl_c => InputResult::Leave,
            View::InstallationProgress => InputResult::Continue,
            View::Wizard {
                modal: Some(modal), ..
            } => self.handle_modal_input(modal, key),
            View::Wizard { step, modal: None } => {
                if self.wizard.state().is_in_progress {
                    return InputResult::Continue;
                }
                if ctrl_c {
                    let result = self.wizard.quit().map(|_| None);
                    return self.apply(result);
                }
                self.handle_step_input(step, key)
            }
        }
    }

    fn handle_modal_input(&mut self, modal: Modal, key: KeyEvent) -> InputResult {
        let confirm = matches!(key.code, KeyCode::Enter | KeyCode::Char('y'));
        let cancel = matches!(key.code, KeyCode::Esc | KeyCode::Char('n'));
        let result = match (modal, confirm, cancel) {
            (Modal::Quit, true, _) => self.wizard.confirm_quit().map(Some),
            (Modal::Quit, _, true) => self.wizard.cancel_quit().map(|_| None),
            (Modal::ReviewConfirm, true, _) => self.wizard.confirm_installation().map(Some),
            (Modal::ReviewConfirm, _, true) => self.wizard.cancel_installation().map(|_| None),
            _ => return InputResult::Continue,
        };
        self.apply(result)
    }

    fn handle_step_input(&mut self, step: StepId, key: KeyEvent) -> InputResult {
        if steps::handle_key(self, step, key) {
            self.revalidate();
            return InputResult::Continue;
        }

        let result = match key.code {
            KeyCode::Enter => self.wizard.next(),
            KeyCode::Esc => self.wizard.back(),
            KeyCode::Char('q') => self.wizard.quit().map(|_| None),
            KeyCode::Char('x') => {
                self.wizard.dismiss_error_notifications();
                return InputResult::Continue;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => match self.jump_target(c) {
                Some(target) => self.wizard.jump_to(target),
                None => return InputResult::Continue,
            },
            _ => return InputResult::Continue,
        };
        self.apply(result)
    }

    /// Sidebar numbering starts at 1.
    fn jump_target(&self, digit: char) -> Option<StepId> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        self.wizard.sequence().ids().get(index as usize).copied()
    }

    /// Feed a finished storage operation back into the wizard.
    pub fn on_completion(&mut self, completion: Completion) -> InputResult {
        match completion {
            Completion::ApplyStorage(result) => {
                let result = self.wizard.on_apply_storage_finished(result);
                self.apply(result)
            }
            Completion::ResetPartitioning(result) => {
                let result = self.wizard.on_reset_partitioning_finished(result).map(|_| None);
                self.apply(result)
            }
        }
    }

    fn apply(&mut self, result: Result<Option<Effect>, WizardError>) -> InputResult {
        match result {
            Ok(Some(effect)) => {
                self.status_message = None;
                InputResult::Run(effect)
            }
            Ok(None) => {
                self.status_message = None;
                self.revalidate();
                InputResult::Continue
            }
            Err(err) => {
                log::debug!("Action refused: {}", err);
                self.status_message = Some(err.to_string());
                InputResult::Continue
            }
        }
    }

    /// Run the current step's validation and report it to the wizard.
    pub fn revalidate(&mut self) {
        let step = self.current_step();
        let valid = steps::is_valid(self, step);
        self.wizard.set_is_form_valid(valid);
    }
}
