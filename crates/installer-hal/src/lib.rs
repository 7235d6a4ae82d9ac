//! Installer hardware/system abstraction layer.
//!
//! The wizard never touches disks or the running system directly. Storage
//! configuration and exit/reboot go through the traits in [`hal`] so the
//! navigation logic can be driven against [`FakeHal`] in tests and against
//! [`CommandHal`] on a live image.

pub mod hal;
pub mod os_release;

pub use hal::{
    ApplyStorageRequest, CommandHal, CommandHalConfig, CommandSpec, ExitAction, FakeHal,
    InstallerHal, Operation, StorageOps, SystemOps,
};
pub use installer_error::{HalError, HalResult};
pub use os_release::OsRelease;
