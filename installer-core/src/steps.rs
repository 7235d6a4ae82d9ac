//! Step definitions.
//!
//! The step tree is a pure function of wizard state and is rebuilt on every
//! transition. Visibility of the disk-configuration children depends on the
//! selected storage scenario; the language step only exists on boot media.

use crate::errors::WizardError;
use crate::localization::{LanguageCatalog, Locale};
use crate::scenario::ScenarioId;
use crate::storage::{Device, Partitioning, StorageData};
use std::fmt;
use std::str::FromStr;

/// Stable identifiers of the wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    InstallationLanguage,
    InstallationMethod,
    DiskConfiguration,
    MountPointMapping,
    DiskEncryption,
    InstallationReview,
}

impl StepId {
    pub fn all() -> &'static [StepId] {
        &[
            StepId::InstallationLanguage,
            StepId::InstallationMethod,
            StepId::DiskConfiguration,
            StepId::MountPointMapping,
            StepId::DiskEncryption,
            StepId::InstallationReview,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::InstallationLanguage => "installation-language",
            StepId::InstallationMethod => "installation-method",
            StepId::DiskConfiguration => "disk-configuration",
            StepId::MountPointMapping => "mount-point-mapping",
            StepId::DiskEncryption => "disk-encryption",
            StepId::InstallationReview => "installation-review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepId::InstallationLanguage => "Welcome",
            StepId::InstallationMethod => "Installation method",
            StepId::DiskConfiguration => "Disk configuration",
            StepId::MountPointMapping => "Manual disk configuration: Mount point mapping",
            StepId::DiskEncryption => "Disk encryption",
            StepId::InstallationReview => "Review and install",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

/// Step-specific data forwarded to the leaf step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepData {
    Language {
        catalog: LanguageCatalog,
    },
    InstallationMethod {
        devices: Vec<Device>,
        selected_disks: Vec<String>,
    },
    MountPointMapping {
        selected_disks: Vec<String>,
        partitioning: Option<Partitioning>,
    },
    DiskEncryption,
    Review {
        language: Option<Locale>,
        selected: Vec<Device>,
        partitioning: Option<Partitioning>,
        scenario: ScenarioId,
    },
}

/// A node is either a rendered leaf or a group of child steps, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepBody {
    Leaf(StepData),
    Group(Vec<StepDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: StepId,
    pub label: &'static str,
    pub body: StepBody,
    pub is_hidden: bool,
    pub is_expandable: bool,
}

impl StepDescriptor {
    pub fn leaf(id: StepId, data: StepData) -> Self {
        Self {
            id,
            label: id.label(),
            body: StepBody::Leaf(data),
            is_hidden: false,
            is_expandable: false,
        }
    }

    pub fn group(id: StepId, children: Vec<StepDescriptor>) -> Self {
        Self {
            id,
            label: id.label(),
            body: StepBody::Group(children),
            is_hidden: false,
            is_expandable: true,
        }
    }

    pub fn hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    pub fn children(&self) -> &[StepDescriptor] {
        match &self.body {
            StepBody::Group(children) => children,
            StepBody::Leaf(_) => &[],
        }
    }

    pub fn data(&self) -> Option<&StepData> {
        match &self.body {
            StepBody::Leaf(data) => Some(data),
            StepBody::Group(_) => None,
        }
    }

    /// Depth-first search for the leaf with `id`.
    pub fn find(&self, id: StepId) -> Option<&StepDescriptor> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// Everything the step tree depends on.
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    pub is_boot_iso: bool,
    pub localization: &'a LanguageCatalog,
    pub storage: &'a StorageData,
    pub scenario: ScenarioId,
}

pub fn build_steps(inputs: &StepInputs<'_>) -> Vec<StepDescriptor> {
    let storage = inputs.storage;
    let is_mount_point_mapping = inputs.scenario == ScenarioId::MountPointMapping;
    let mut steps = Vec::with_capacity(4);

    if inputs.is_boot_iso {
        steps.push(StepDescriptor::leaf(
            StepId::InstallationLanguage,
            StepData::Language {
                catalog: inputs.localization.clone(),
            },
        ));
    }

    steps.push(StepDescriptor::leaf(
        StepId::InstallationMethod,
        StepData::InstallationMethod {
            devices: storage.devices.values().cloned().collect(),
            selected_disks: storage.selected_disks.clone(),
        },
    ));

    steps.push(StepDescriptor::group(
        StepId::DiskConfiguration,
        vec![
            StepDescriptor::leaf(
                StepId::MountPointMapping,
                StepData::MountPointMapping {
                    selected_disks: storage.selected_disks.clone(),
                    partitioning: storage.partitioning.clone(),
                },
            )
            .hidden(!is_mount_point_mapping),
            StepDescriptor::leaf(StepId::DiskEncryption, StepData::DiskEncryption)
                .hidden(is_mount_point_mapping),
        ],
    ));

    steps.push(StepDescriptor::leaf(
        StepId::InstallationReview,
        StepData::Review {
            language: inputs.localization.resolve_language().cloned(),
            selected: storage.selected_devices().cloned().collect(),
            partitioning: storage.partitioning.clone(),
            scenario: inputs.scenario,
        },
    ));

    steps
}

/// Find the descriptor for `id` anywhere in the tree.
pub fn find_step(steps: &[StepDescriptor], id: StepId) -> Option<&StepDescriptor> {
    steps.iter().find_map(|step| step.find(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(is_boot_iso: bool, scenario: ScenarioId) -> Vec<StepDescriptor> {
        let localization = LanguageCatalog::builtin();
        let storage = StorageData::demo();
        build_steps(&StepInputs {
            is_boot_iso,
            localization: &localization,
            storage: &storage,
            scenario,
        })
    }

    fn top_level_ids(steps: &[StepDescriptor]) -> Vec<StepId> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn boot_iso_starts_with_language() {
        let steps = build(true, ScenarioId::EraseAll);
        assert_eq!(
            top_level_ids(&steps),
            vec![
                StepId::InstallationLanguage,
                StepId::InstallationMethod,
                StepId::DiskConfiguration,
                StepId::InstallationReview,
            ]
        );
    }

    #[test]
    fn live_system_has_no_language_step() {
        let steps = build(false, ScenarioId::EraseAll);
        assert_eq!(steps[0].id, StepId::InstallationMethod);
        assert!(find_step(&steps, StepId::InstallationLanguage).is_none());
    }

    #[test]
    fn disk_configuration_is_an_expandable_group() {
        let steps = build(false, ScenarioId::EraseAll);
        let group = find_step(&steps, StepId::DiskConfiguration).unwrap();
        assert!(group.is_expandable);
        assert!(group.data().is_none());
        let children: Vec<StepId> = group.children().iter().map(|c| c.id).collect();
        assert_eq!(
            children,
            vec![StepId::MountPointMapping, StepId::DiskEncryption]
        );
    }

    #[test]
    fn review_gets_unresolved_language_as_none() {
        let mut localization = LanguageCatalog::builtin();
        localization.select("xx_XX.UTF-8");
        let storage = StorageData::default();
        let steps = build_steps(&StepInputs {
            is_boot_iso: false,
            localization: &localization,
            storage: &storage,
            scenario: ScenarioId::EraseAll,
        });
        let review = find_step(&steps, StepId::InstallationReview).unwrap();
        assert!(matches!(
            review.data(),
            Some(StepData::Review { language: None, .. })
        ));
    }

    #[test]
    fn step_ids_parse_back() {
        for id in StepId::all() {
            assert_eq!(id.as_str().parse::<StepId>().unwrap(), *id);
        }
        assert!("progress".parse::<StepId>().is_err());
    }
}
