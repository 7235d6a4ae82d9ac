//! Navigation guard over a [`StepSequence`].
//!
//! Clicking a step in the sidebar may only move backwards (or stay put);
//! moving forward has to go through Next so each step's side effects run.

use crate::flatten::StepSequence;
use crate::steps::StepId;

impl StepSequence {
    pub fn is_terminal_step(&self, id: StepId) -> bool {
        self.last() == Some(id)
    }

    /// Whether a sidebar jump from `current` to `target` is allowed.
    ///
    /// An id missing from the sequence refuses the jump. This happens when a
    /// stale location points at a step that the boot mode or the scenario
    /// has hidden.
    pub fn can_jump_to(&self, target: StepId, current: StepId) -> bool {
        match (self.index_of(target), self.index_of(current)) {
            (Some(target_index), Some(current_index)) => target_index <= current_index,
            (target_index, current_index) => {
                log::debug!(
                    "Refusing jump {} -> {}: not in sequence (target={:?}, current={:?})",
                    current,
                    target,
                    target_index,
                    current_index
                );
                false
            }
        }
    }
}
