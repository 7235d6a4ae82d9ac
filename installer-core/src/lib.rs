//! Installer wizard core library.
//!
//! `installer-core` holds the step model and the navigation state machine of
//! the installer wizard: which steps exist, which are visible, how Next/Back
//! move between them, and which storage side effects a transition needs.
//! Nothing here performs I/O on its own; side effects are handed back to the
//! host as [`wizard::Effect`] values.

pub mod cli;
pub mod config;
pub mod errors;
pub mod flatten;
pub mod footer;
pub mod host;
pub mod localization;
pub mod location;
pub mod logging;
pub mod modal;
pub mod nav;
pub mod scenario;
pub mod session;
pub mod steps;
pub mod storage;
pub mod wizard;

pub use errors::WizardError;
pub use flatten::{flatten_steps, StepSequence};
pub use host::{CriticalFailure, StepHost, StepNotification, StepProps, StorageEncryption};
pub use scenario::{Scenario, ScenarioId};
pub use steps::{StepBody, StepData, StepDescriptor, StepId};
pub use wizard::{Effect, View, Wizard, WizardInputs, WizardState};
