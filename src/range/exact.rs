use serde::{Deserialize, Serialize};

use crate::{Operator, Placement, RangeComparator, Version};

use super::primitive;

/// A range matching a single version, ignoring build metadata.
///
/// Written as a bare version (`1.2.3`) or pinned with `^=` / `~=`.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExactRange {
    version: Version,
}

impl ExactRange {
    /// Create a range matching only the version.
    pub fn new(version: impl Into<Version>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// The version the range matches.
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl RangeComparator for ExactRange {
    fn compare(&self, version: &Version) -> Placement {
        primitive::place(Operator::Equal, &self.version, version)
    }
}

impl std::fmt::Display for ExactRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}
