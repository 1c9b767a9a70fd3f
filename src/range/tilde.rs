use serde::{Deserialize, Serialize};

use crate::{BoundedRange, Placement, RangeComparator, Version};

/// A tilde range such as `~1.2.3`: patch updates within the same minor line,
/// or minor updates within the same major line when the minor is unspecified.
///
/// Covers `[version.floor() .. version.ceil())`.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "Version", into = "Version")]
pub struct TildeRange {
    version: Version,
    bounds: BoundedRange,
}

impl TildeRange {
    /// Create the tilde range of the version.
    pub fn new(version: impl Into<Version>) -> Self {
        let version = version.into();
        let bounds = BoundedRange::between(version.floor(), version.ceil());
        Self { version, bounds }
    }

    /// The version the range was created from.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The interval the range covers.
    pub fn bounds(&self) -> &BoundedRange {
        &self.bounds
    }
}

impl RangeComparator for TildeRange {
    fn compare(&self, version: &Version) -> Placement {
        self.bounds.compare(version)
    }
}

impl From<Version> for TildeRange {
    fn from(value: Version) -> Self {
        Self::new(value)
    }
}

impl From<TildeRange> for Version {
    fn from(value: TildeRange) -> Self {
        value.version
    }
}

impl std::fmt::Display for TildeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "~{}", self.version)
    }
}
