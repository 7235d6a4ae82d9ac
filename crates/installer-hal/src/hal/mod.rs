//! HAL trait definitions and implementations.
//!
//! This module defines the collaborator traits the wizard depends on and
//! provides both a command-backed (`CommandHal`) and a recording
//! (`FakeHal`) implementation.

pub mod command_hal;
pub mod fake_hal;
pub mod storage_ops;
pub mod system_ops;

pub use command_hal::{CommandHal, CommandHalConfig, CommandSpec};
pub use fake_hal::{FakeHal, Operation};
pub use storage_ops::{ApplyStorageRequest, StorageOps};
pub use system_ops::{ExitAction, SystemOps};

/// Everything the wizard host needs from the outside world.
pub trait InstallerHal: StorageOps + SystemOps + Send + Sync {}

/// Automatically implement InstallerHal for any type implementing all required traits.
impl<T> InstallerHal for T where T: StorageOps + SystemOps + Send + Sync {}
