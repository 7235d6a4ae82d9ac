//! What a leaf step gets from the wizard: a read-only snapshot of shared
//! state ([`StepProps`]) and a set of setters ([`StepHost`]). Steps never
//! touch wizard state directly.

use crate::scenario::ScenarioId;
use crate::steps::StepId;
use installer_hal::OsRelease;
use std::fmt;

/// A recoverable failure attached to the step that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNotification {
    pub step: StepId,
    pub message: String,
}

/// A failure the wizard cannot recover from; the user can only leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalFailure {
    pub step: Option<StepId>,
    pub context: String,
    pub error: String,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct StorageEncryption {
    pub encrypt: bool,
    pub password: String,
    pub confirm_password: String,
}

impl StorageEncryption {
    pub fn is_valid(&self) -> bool {
        !self.encrypt || (!self.password.is_empty() && self.password == self.confirm_password)
    }
}

impl fmt::Debug for StorageEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageEncryption")
            .field("encrypt", &self.encrypt)
            .field("password_set", &!self.password.is_empty())
            .finish()
    }
}

/// Shared state every leaf step receives next to its own `StepData`.
#[derive(Debug, Clone)]
pub struct StepProps {
    pub step: StepId,
    pub is_form_valid: bool,
    pub is_in_progress: bool,
    pub step_notification: Option<StepNotification>,
    pub storage_encryption: StorageEncryption,
    pub storage_scenario_id: ScenarioId,
    pub reuse_partitioning: bool,
    pub is_boot_iso: bool,
    pub os_release: OsRelease,
}

impl StepProps {
    /// The notification, if it belongs to this step.
    pub fn own_notification(&self) -> Option<&StepNotification> {
        self.step_notification
            .as_ref()
            .filter(|notification| notification.step == self.step)
    }
}

/// Setters a leaf step may call.
pub trait StepHost {
    fn props(&self) -> StepProps;
    fn set_is_form_valid(&mut self, is_valid: bool);
    fn on_crit_fail(&mut self, context: &str, error: &str);
    fn on_add_error_notification(&mut self, message: &str);
    fn set_storage_encryption(&mut self, encryption: StorageEncryption);
    /// Also persists the id to the session store.
    fn set_storage_scenario_id(&mut self, id: ScenarioId);
    fn set_reuse_partitioning(&mut self, reuse: bool);
    fn select_language(&mut self, locale_id: &str);
    fn toggle_disk(&mut self, name: &str);
}
