//! Wizard controller: owns the shared wizard state and turns step changes
//! into navigation or storage side effects.
//!
//! The controller never performs I/O. Operations that need the storage
//! backend or the system are returned as [`Effect`]s; the host runs them and
//! reports back through `on_apply_storage_finished` /
//! `on_reset_partitioning_finished`. While one is outstanding
//! `is_in_progress` is set and every user action is refused.

use crate::errors::WizardError;
use crate::flatten::{flatten_steps, StepSequence};
use crate::footer::FooterState;
use crate::host::{CriticalFailure, StepHost, StepNotification, StepProps, StorageEncryption};
use crate::localization::LanguageCatalog;
use crate::location::Location;
use crate::modal::Modal;
use crate::scenario::ScenarioId;
use crate::session::{SessionStore, SCENARIO_KEY};
use crate::steps::{build_steps, find_step, StepData, StepDescriptor, StepId, StepInputs};
use crate::storage::StorageData;
use installer_hal::{ApplyStorageRequest, ExitAction, HalError, OsRelease};

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ApplyStorage(ApplyStorageRequest),
    ResetPartitioning,
    BeginInstallation,
    Exit(ExitAction),
}

/// What the host should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Wizard { step: StepId, modal: Option<Modal> },
    InstallationProgress,
    CriticalFailure(CriticalFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingOperation {
    ApplyStorage { step: StepId },
    ResetPartitioning { leaving: StepId, target: StepId },
}

#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub is_form_valid: bool,
    pub step_notification: Option<StepNotification>,
    pub is_in_progress: bool,
    pub is_installation_progress: bool,
    pub storage_encryption: StorageEncryption,
    pub storage_scenario_id: ScenarioId,
    pub reuse_partitioning: bool,
}

/// Data the wizard is started with.
#[derive(Debug, Clone, Default)]
pub struct WizardInputs {
    pub is_boot_iso: bool,
    pub localization: LanguageCatalog,
    pub storage: StorageData,
    pub os_release: OsRelease,
}

pub struct Wizard {
    pub(crate) state: WizardState,
    pub(crate) footer: FooterState,
    pub(crate) pending: Option<PendingOperation>,
    critical_failure: Option<CriticalFailure>,
    error_notifications: Vec<String>,
    location: Location,
    is_boot_iso: bool,
    localization: LanguageCatalog,
    storage: StorageData,
    os_release: OsRelease,
    session: Box<dyn SessionStore>,
}

impl Wizard {
    pub fn new(inputs: WizardInputs, session: Box<dyn SessionStore>) -> Self {
        let storage_scenario_id =
            ScenarioId::from_persisted(session.get(SCENARIO_KEY).as_deref());
        log::info!(
            "Starting wizard (boot iso: {}, scenario: {})",
            inputs.is_boot_iso,
            storage_scenario_id
        );
        Self {
            state: WizardState {
                storage_scenario_id,
                ..WizardState::default()
            },
            footer: FooterState::default(),
            pending: None,
            critical_failure: None,
            error_notifications: Vec::new(),
            location: Location::root(),
            is_boot_iso: inputs.is_boot_iso,
            localization: inputs.localization,
            storage: inputs.storage,
            os_release: inputs.os_release,
            session,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn footer_state(&self) -> FooterState {
        self.footer
    }

    pub fn is_boot_iso(&self) -> bool {
        self.is_boot_iso
    }

    pub fn localization(&self) -> &LanguageCatalog {
        &self.localization
    }

    pub fn storage(&self) -> &StorageData {
        &self.storage
    }

    pub fn os_release(&self) -> &OsRelease {
        &self.os_release
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn critical_failure(&self) -> Option<&CriticalFailure> {
        self.critical_failure.as_ref()
    }

    pub fn error_notifications(&self) -> &[String] {
        &self.error_notifications
    }

    pub fn dismiss_error_notifications(&mut self) {
        self.error_notifications.clear();
    }

    /// The step tree for the current state.
    pub fn steps(&self) -> Vec<StepDescriptor> {
        build_steps(&StepInputs {
            is_boot_iso: self.is_boot_iso,
            localization: &self.localization,
            storage: &self.storage,
            scenario: self.state.storage_scenario_id,
        })
    }

    pub fn sequence(&self) -> StepSequence {
        flatten_steps(&self.steps())
    }

    /// Active step: the location's first segment when it names a visible
    /// step, otherwise the first step of the sequence.
    pub fn current_step(&self) -> StepId {
        let sequence = self.sequence();
        self.location
            .step()
            .filter(|step| sequence.contains(*step))
            .or_else(|| sequence.first())
            .unwrap_or(StepId::InstallationMethod)
    }

    pub fn current_step_data(&self) -> Option<StepData> {
        let steps = self.steps();
        find_step(&steps, self.current_step()).and_then(|step| step.data().cloned())
    }

    pub fn step_props(&self) -> StepProps {
        StepProps {
            step: self.current_step(),
            is_form_valid: self.state.is_form_valid,
            is_in_progress: self.state.is_in_progress,
            step_notification: self.state.step_notification.clone(),
            storage_encryption: self.state.storage_encryption.clone(),
            storage_scenario_id: self.state.storage_scenario_id,
            reuse_partitioning: self.state.reuse_partitioning,
            is_boot_iso: self.is_boot_iso,
            os_release: self.os_release.clone(),
        }
    }

    pub fn view(&self) -> View {
        if let Some(failure) = &self.critical_failure {
            return View::CriticalFailure(failure.clone());
        }
        if self.state.is_installation_progress {
            return View::InstallationProgress;
        }
        View::Wizard {
            step: self.current_step(),
            modal: self.modal(),
        }
    }

    /// Set the location to `step`. Footer state and error notifications are
    /// scoped to the active step, so both start fresh.
    pub(crate) fn navigate(&mut self, step: StepId) {
        log::info!("Navigating to {}", step);
        self.location = Location::for_step(step);
        self.footer = FooterState::default();
        self.error_notifications.clear();
    }

    /// Handle a move from `previous` to `current`.
    ///
    /// A move that does not follow the sequence (a back jump) invalidates
    /// the form so the arriving step validates itself. Leaving the review
    /// step resets partitioning before the move completes.
    pub(crate) fn on_step_change(&mut self, current: StepId, previous: StepId) -> Option<Effect> {
        let sequence = self.sequence();
        if sequence.next_after(previous) != Some(current) {
            self.state.is_form_valid = false;
        }

        if previous == StepId::InstallationReview {
            log::info!("Leaving review for {}, resetting partitioning", current);
            self.state.is_in_progress = true;
            self.pending = Some(PendingOperation::ResetPartitioning {
                leaving: previous,
                target: current,
            });
            return Some(Effect::ResetPartitioning);
        }

        self.navigate(current);
        None
    }

    /// Sidebar navigation: only backwards or onto the current step.
    pub fn jump_to(&mut self, target: StepId) -> Result<Option<Effect>, WizardError> {
        self.ensure_interactive()?;
        if self.footer.is_waiting() {
            return Err(WizardError::ModalOpen);
        }
        let current = self.current_step();
        if !self.sequence().can_jump_to(target, current) {
            return Err(WizardError::JumpRefused { target, current });
        }
        if target == current {
            return Ok(None);
        }
        Ok(self.on_step_change(target, current))
    }

    pub(crate) fn ensure_interactive(&self) -> Result<(), WizardError> {
        if self.state.is_installation_progress || self.critical_failure.is_some() {
            return Err(WizardError::InstallationStarted);
        }
        if self.state.is_in_progress {
            return Err(WizardError::Busy);
        }
        Ok(())
    }

    pub(crate) fn start_apply_storage(
        &mut self,
        step: StepId,
        request: ApplyStorageRequest,
    ) -> Effect {
        self.state.is_in_progress = true;
        self.pending = Some(PendingOperation::ApplyStorage { step });
        Effect::ApplyStorage(request)
    }

    /// Completion of an `Effect::ApplyStorage`.
    ///
    /// Success clears the notification and advances; failure keeps the step
    /// and attaches the error to it.
    pub fn on_apply_storage_finished(
        &mut self,
        result: Result<(), HalError>,
    ) -> Result<Option<Effect>, WizardError> {
        let step = match self.pending {
            Some(PendingOperation::ApplyStorage { step }) => step,
            _ => return Err(WizardError::NoPendingOperation),
        };
        self.pending = None;
        self.state.is_in_progress = false;

        match result {
            Ok(()) => {
                self.state.step_notification = None;
                match self.sequence().next_after(step) {
                    Some(next) => Ok(self.on_step_change(next, step)),
                    None => {
                        log::warn!("Storage applied on {} but no step follows it", step);
                        Ok(None)
                    }
                }
            }
            Err(err) => {
                log::warn!("Applying storage on {} failed: {}", step, err);
                self.state.step_notification = Some(StepNotification {
                    step,
                    message: err.summary(),
                });
                Ok(None)
            }
        }
    }

    /// Completion of an `Effect::ResetPartitioning`. The move goes ahead
    /// either way; a failure is critical.
    pub fn on_reset_partitioning_finished(
        &mut self,
        result: Result<(), HalError>,
    ) -> Result<(), WizardError> {
        let (leaving, target) = match self.pending {
            Some(PendingOperation::ResetPartitioning { leaving, target }) => (leaving, target),
            _ => return Err(WizardError::NoPendingOperation),
        };
        self.pending = None;

        if let Err(err) = result {
            log::error!("Resetting partitioning after leaving {} failed: {}", leaving, err);
            self.critical_failure = Some(CriticalFailure {
                step: Some(leaving),
                context: format!("Going back from the \"{}\" step failed.", leaving.label()),
                error: err.summary(),
            });
        }
        self.navigate(target);
        self.state.is_in_progress = false;
        Ok(())
    }

    /// Replace storage data reported by the storage service. A changed
    /// device set or disk selection invalidates reused partitioning.
    pub fn set_storage_data(&mut self, storage: StorageData) {
        if self.storage.selection_differs(&storage) {
            if self.state.reuse_partitioning {
                log::info!("Disk selection changed, no longer reusing partitioning");
            }
            self.state.reuse_partitioning = false;
        }
        self.storage = storage;
    }
}

impl StepHost for Wizard {
    fn props(&self) -> StepProps {
        self.step_props()
    }

    fn set_is_form_valid(&mut self, is_valid: bool) {
        self.state.is_form_valid = is_valid;
    }

    fn on_crit_fail(&mut self, context: &str, error: &str) {
        log::error!("{}: {}", context, error);
        self.critical_failure = Some(CriticalFailure {
            step: Some(self.current_step()),
            context: context.to_string(),
            error: error.to_string(),
        });
    }

    fn on_add_error_notification(&mut self, message: &str) {
        log::warn!("{}", message);
        self.error_notifications.push(message.to_string());
    }

    fn set_storage_encryption(&mut self, encryption: StorageEncryption) {
        self.state.storage_encryption = encryption;
    }

    fn set_storage_scenario_id(&mut self, id: ScenarioId) {
        if self.state.storage_scenario_id != id {
            log::info!("Storage scenario set to {}", id);
        }
        self.state.storage_scenario_id = id;
        if let Err(err) = self.session.set(SCENARIO_KEY, id.as_str()) {
            log::warn!("Failed to persist storage scenario: {:#}", err);
        }
    }

    fn set_reuse_partitioning(&mut self, reuse: bool) {
        self.state.reuse_partitioning = reuse;
    }

    fn select_language(&mut self, locale_id: &str) {
        self.localization.select(locale_id);
    }

    fn toggle_disk(&mut self, name: &str) {
        let mut storage = self.storage.clone();
        storage.toggle_disk(name);
        self.set_storage_data(storage);
    }
}
