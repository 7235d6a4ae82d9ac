//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them, and can
//! be told to fail the next storage call, so wizard flows can be exercised in
//! CI without a storage backend.

use super::{ApplyStorageRequest, ExitAction, StorageOps, SystemOps};
use crate::{HalError, HalResult};
use std::sync::{Arc, Mutex, MutexGuard};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ApplyStorage(ApplyStorageRequest),
    ResetPartitioning,
    Exit(ExitAction),
}

#[derive(Debug, Default)]
struct FakeHalState {
    operations: Vec<Operation>,
    apply_failure: Option<String>,
    reset_failure: Option<String>,
}

/// Fake HAL implementation that records operations without executing them.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeHalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state().operations.iter().any(check)
    }

    /// Make the next `apply_storage` call fail with `message`.
    pub fn fail_next_apply(&self, message: impl Into<String>) {
        self.state().apply_failure = Some(message.into());
    }

    /// Make the next `reset_partitioning` call fail with `message`.
    pub fn fail_next_reset(&self, message: impl Into<String>) {
        self.state().reset_failure = Some(message.into());
    }

    /// Clear all recorded operations and pending failures.
    pub fn clear(&self) {
        let mut state = self.state();
        state.operations.clear();
        state.apply_failure = None;
        state.reset_failure = None;
    }
}

impl StorageOps for FakeHal {
    fn apply_storage(&self, request: &ApplyStorageRequest) -> HalResult<()> {
        log::info!("FAKE HAL: apply storage {:?}", request);
        let mut state = self.state();
        state
            .operations
            .push(Operation::ApplyStorage(request.clone()));
        match state.apply_failure.take() {
            Some(message) => Err(HalError::StorageRejected(message)),
            None => Ok(()),
        }
    }

    fn reset_partitioning(&self) -> HalResult<()> {
        log::info!("FAKE HAL: reset partitioning");
        let mut state = self.state();
        state.operations.push(Operation::ResetPartitioning);
        match state.reset_failure.take() {
            Some(message) => Err(HalError::StorageRejected(message)),
            None => Ok(()),
        }
    }
}

impl SystemOps for FakeHal {
    fn exit(&self, action: ExitAction) -> HalResult<()> {
        log::info!("FAKE HAL: {}", action);
        self.state().operations.push(Operation::Exit(action));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_hal_records_apply_storage() {
        let hal = FakeHal::new();
        let request = ApplyStorageRequest::with_partitioning(Some("/p/1".to_string()));

        hal.apply_storage(&request).unwrap();

        assert_eq!(hal.operation_count(), 1);
        assert!(hal.has_operation(|op| matches!(op, Operation::ApplyStorage(r) if r == &request)));
    }

    #[test]
    fn injected_apply_failure_is_consumed_once() {
        let hal = FakeHal::new();
        hal.fail_next_apply("no space left");

        let err = hal
            .apply_storage(&ApplyStorageRequest::default())
            .unwrap_err();
        assert!(err.to_string().contains("no space left"));
        assert!(hal.apply_storage(&ApplyStorageRequest::default()).is_ok());
        assert_eq!(hal.operation_count(), 2);
    }

    #[test]
    fn injected_reset_failure_is_reported() {
        let hal = FakeHal::new();
        hal.fail_next_reset("device busy");

        assert!(hal.reset_partitioning().is_err());
        assert_eq!(hal.operations(), vec![Operation::ResetPartitioning]);
    }

    #[test]
    fn clones_share_recorded_operations() {
        let hal = FakeHal::new();
        let other = hal.clone();

        other.exit(ExitAction::Reboot).unwrap();

        assert_eq!(hal.operations(), vec![Operation::Exit(ExitAction::Reboot)]);
        hal.clear();
        assert_eq!(other.operation_count(), 0);
    }
}
