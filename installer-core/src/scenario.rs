//! Storage scenarios: the named strategies the installation-method step
//! offers, and the texts the footer and review dialog show for each.

use crate::errors::WizardError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenarioId {
    #[default]
    EraseAll,
    UseFreeSpace,
    MountPointMapping,
    HomeReuse,
}

impl ScenarioId {
    pub fn all() -> &'static [ScenarioId] {
        &[
            ScenarioId::EraseAll,
            ScenarioId::UseFreeSpace,
            ScenarioId::MountPointMapping,
            ScenarioId::HomeReuse,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::EraseAll => "erase-all",
            ScenarioId::UseFreeSpace => "use-free-space",
            ScenarioId::MountPointMapping => "mount-point-mapping",
            ScenarioId::HomeReuse => "home-reuse",
        }
    }

    /// Parse a persisted id, falling back to the default scenario for values
    /// written by another installer version.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<ScenarioId>) {
            Some(Ok(id)) => id,
            Some(Err(err)) => {
                log::warn!("{}; using {}", err, ScenarioId::default());
                ScenarioId::default()
            }
            None => ScenarioId::default(),
        }
    }

    pub fn scenario(&self) -> &'static Scenario {
        scenario(*self)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| WizardError::UnknownScenario(s.to_string()))
    }
}

/// Display metadata of a storage scenario.
#[derive(Debug, PartialEq, Eq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub label: &'static str,
    pub detail: &'static str,
    /// Label of the Next button on the review step.
    pub button_label: &'static str,
    /// Advisory shown next to the footer buttons on the review step.
    pub screen_warning: Option<&'static str>,
    pub dialog_title: &'static str,
    pub dialog_warning: &'static str,
    /// Destructive scenarios get a red action in the confirmation dialog.
    pub destructive: bool,
}

static SCENARIOS: &[Scenario] = &[
    Scenario {
        id: ScenarioId::EraseAll,
        label: "Erase data and install",
        detail: "Remove every partition on the selected disks, including other operating systems.",
        button_label: "Erase data and install",
        screen_warning: Some("Erasing the disks cannot be undone. Make sure you have backups."),
        dialog_title: "Erase data and install?",
        dialog_warning: "All data on the selected disks will be lost. Continue with the installation?",
        destructive: true,
    },
    Scenario {
        id: ScenarioId::UseFreeSpace,
        label: "Use free space for the installation",
        detail: "Keep existing partitions and install into unallocated space.",
        button_label: "Install",
        screen_warning: None,
        dialog_title: "Install into free space?",
        dialog_warning: "The installation uses unallocated space only. Existing data is kept.",
        destructive: false,
    },
    Scenario {
        id: ScenarioId::MountPointMapping,
        label: "Mount point assignment",
        detail: "Assign mount points to partitions that already exist on the selected disks.",
        button_label: "Apply mount point assignment and install",
        screen_warning: Some("Reformatted partitions lose their data. Make sure you have backups."),
        dialog_title: "Apply mount point assignment and install?",
        dialog_warning: "The installation uses the partition layout you assigned.",
        destructive: true,
    },
    Scenario {
        id: ScenarioId::HomeReuse,
        label: "Reinstall, keeping /home",
        detail: "Replace the existing system and keep the home partition untouched.",
        button_label: "Reinstall",
        screen_warning: Some("Everything except /home is erased. Make sure you have backups."),
        dialog_title: "Reinstall and keep /home?",
        dialog_warning: "The system partitions will be erased and recreated. /home is kept.",
        destructive: true,
    },
];

pub fn scenario(id: ScenarioId) -> &'static Scenario {
    SCENARIOS
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&SCENARIOS[0])
}

pub fn scenarios() -> &'static [Scenario] {
    SCENARIOS
}
