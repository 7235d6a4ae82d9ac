//! System-level operations (leaving the installer).

use crate::HalResult;
use std::fmt;

/// How the installer leaves: a live boot image reboots, an installer started
/// from a running system just quits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    Reboot,
    Quit,
}

impl ExitAction {
    pub fn for_boot_mode(is_boot_iso: bool) -> Self {
        if is_boot_iso {
            ExitAction::Reboot
        } else {
            ExitAction::Quit
        }
    }
}

impl fmt::Display for ExitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitAction::Reboot => write!(f, "reboot"),
            ExitAction::Quit => write!(f, "quit"),
        }
    }
}

/// System operations trait.
pub trait SystemOps {
    fn exit(&self, action: ExitAction) -> HalResult<()>;
}
