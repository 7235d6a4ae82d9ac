use crate::steps::StepId;
use thiserror::Error;

/// Result type alias for loaders and glue code.
pub type Result<T> = anyhow::Result<T>;

/// Refusals of the wizard state machine.
///
/// None of these change state: the caller asked for something the current
/// view does not offer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("A storage operation is still in progress")]
    Busy,

    #[error("Next is not available on step {0}")]
    NextDisabled(StepId),

    #[error("Back is not available on step {0}")]
    BackDisabled(StepId),

    #[error("Cannot jump from {current} to {target}")]
    JumpRefused { target: StepId, current: StepId },

    #[error("A confirmation dialog is open")]
    ModalOpen,

    #[error("No confirmation dialog is waiting for an answer")]
    NoModal,

    #[error("The installation has already started")]
    InstallationStarted,

    #[error("No storage operation is pending")]
    NoPendingOperation,

    #[error("Unknown step id: {0}")]
    UnknownStep(String),

    #[error("Unknown storage scenario: {0}")]
    UnknownScenario(String),
}
