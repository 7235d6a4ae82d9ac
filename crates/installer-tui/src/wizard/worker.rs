//! Storage effects run off the UI thread; results come back over a channel.

use installer_core::Effect;
use installer_hal::{HalResult, InstallerHal};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
pub enum Completion {
    ApplyStorage(HalResult<()>),
    ResetPartitioning(HalResult<()>),
}

/// Run a storage effect to completion on the calling thread. Other effects
/// are not storage operations and yield `None`.
pub fn run_storage_effect(hal: &dyn InstallerHal, effect: &Effect) -> Option<Completion> {
    match effect {
        Effect::ApplyStorage(request) => {
            log::info!("Applying storage configuration: {:?}", request);
            Some(Completion::ApplyStorage(hal.apply_storage(request)))
        }
        Effect::ResetPartitioning => {
            log::info!("Resetting partitioning");
            Some(Completion::ResetPartitioning(hal.reset_partitioning()))
        }
        Effect::BeginInstallation | Effect::Exit(_) => None,
    }
}

pub fn spawn_storage_effect(hal: Arc<dyn InstallerHal>, effect: Effect, tx: Sender<Completion>) {
    thread::spawn(move || {
        if let Some(completion) = run_storage_effect(hal.as_ref(), &effect) {
            if tx.send(completion).is_err() {
                log::warn!("UI went away before the storage operation finished");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use installer_hal::{ApplyStorageRequest, ExitAction, FakeHal, Operation};
    use std::sync::mpsc;

    #[test]
    fn spawned_effect_reports_back() {
        let hal = FakeHal::new();
        hal.fail_next_reset("busy");
        let (tx, rx) = mpsc::channel();
        spawn_storage_effect(Arc::new(hal.clone()), Effect::ResetPartitioning, tx);
        match rx.recv().unwrap() {
            Completion::ResetPartitioning(Err(err)) => assert!(err.to_string().contains("busy")),
            other => panic!("unexpected completion: {:?}", other),
        }
        assert_eq!(hal.operations(), vec![Operation::ResetPartitioning]);
    }

    #[test]
    fn non_storage_effects_are_not_run() {
        let hal = FakeHal::new();
        assert!(run_storage_effect(&hal, &Effect::Exit(ExitAction::Quit)).is_none());
        assert!(run_storage_effect(&hal, &Effect::BeginInstallation).is_none());
        assert_eq!(hal.operation_count(), 0);

        let request = ApplyStorageRequest::with_partitioning(None);
        assert!(matches!(
            run_storage_effect(&hal, &Effect::ApplyStorage(request)),
            Some(Completion::ApplyStorage(Ok(())))
        ));
    }
}
