//! Linear view of the step tree used for navigation bookkeeping.

use crate::steps::{StepBody, StepDescriptor, StepId};

/// Visible leaf step ids in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence(Vec<StepId>);

/// Group nodes contribute their visible children, every other node its own id.
///
/// Only children inside a group carry `is_hidden`; top-level nodes are
/// always part of the sequence.
pub fn flatten_steps(steps: &[StepDescriptor]) -> StepSequence {
    let mut ids = Vec::with_capacity(steps.len() + 1);
    for step in steps {
        match &step.body {
            StepBody::Group(children) => ids.extend(
                children
                    .iter()
                    .filter(|child| !child.is_hidden)
                    .map(|child| child.id),
            ),
            StepBody::Leaf(_) => ids.push(step.id),
        }
    }
    StepSequence(ids)
}

impl StepSequence {
    pub fn ids(&self) -> &[StepId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.0.iter().position(|s| *s == id)
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn first(&self) -> Option<StepId> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<StepId> {
        self.0.last().copied()
    }

    pub fn next_after(&self, id: StepId) -> Option<StepId> {
        self.index_of(id)
            .and_then(|index| self.0.get(index + 1))
            .copied()
    }

    pub fn previous_before(&self, id: StepId) -> Option<StepId> {
        match self.index_of(id) {
            Some(index) if index > 0 => self.0.get(index - 1).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::StepData;

    fn leaf(id: StepId) -> StepDescriptor {
        StepDescriptor::leaf(id, StepData::DiskEncryption)
    }

    #[test]
    fn group_contributes_children_not_itself() {
        let tree = vec![
            leaf(StepId::InstallationMethod),
            StepDescriptor::group(
                StepId::DiskConfiguration,
                vec![leaf(StepId::MountPointMapping), leaf(StepId::DiskEncryption)],
            ),
            leaf(StepId::InstallationReview),
        ];
        assert_eq!(
            flatten_steps(&tree).ids(),
            &[
                StepId::InstallationMethod,
                StepId::MountPointMapping,
                StepId::DiskEncryption,
                StepId::InstallationReview,
            ]
        );
    }

    #[test]
    fn hidden_children_are_skipped() {
        let tree = vec![StepDescriptor::group(
            StepId::DiskConfiguration,
            vec![
                leaf(StepId::MountPointMapping).hidden(true),
                leaf(StepId::DiskEncryption),
            ],
        )];
        assert_eq!(flatten_steps(&tree).ids(), &[StepId::DiskEncryption]);
    }

    #[test]
    fn hidden_flag_on_top_level_leaf_is_ignored() {
        let tree = vec![leaf(StepId::InstallationReview).hidden(true)];
        assert_eq!(flatten_steps(&tree).ids(), &[StepId::InstallationReview]);
    }

    #[test]
    fn neighbours() {
        let seq = StepSequence(vec![
            StepId::InstallationMethod,
            StepId::DiskEncryption,
            StepId::InstallationReview,
        ]);
        assert_eq!(
            seq.next_after(StepId::InstallationMethod),
            Some(StepId::DiskEncryption)
        );
        assert_eq!(seq.next_after(StepId::InstallationReview), None);
        assert_eq!(seq.previous_before(StepId::InstallationMethod), None);
        assert_eq!(
            seq.previous_before(StepId::InstallationReview),
            Some(StepId::DiskEncryption)
        );
        assert_eq!(seq.next_after(StepId::MountPointMapping), None);
    }
}
