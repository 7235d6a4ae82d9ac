//! Path-like location token. The first segment names the active step.

use crate::steps::StepId;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
}

impl Location {
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
        }
    }

    pub fn for_step(step: StepId) -> Self {
        Self {
            path: format!("/{}", step.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.path.split('/').find(|segment| !segment.is_empty())
    }

    /// Step named by the first segment, if it names one.
    pub fn step(&self) -> Option<StepId> {
        self.first_segment()?.parse().ok()
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = if s.starts_with('/') {
            s.to_string()
        } else {
            format!("/{}", s)
        };
        Ok(Self { path })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
