use serde::{Deserialize, Serialize};

use crate::{BoundedRange, Placement, RangeComparator, Version};

/// A caret range such as `^1.2.3`: the version and anything API compatible with it.
///
/// Covers `[version.floor() .. version.next_breaking_change())`,
/// so `^1.2.3` allows `<2.0.0` while `^0.2.3` only allows `<0.3.0`.
///
/// ```
/// # use relaxed_semver::{CaretRange, RangeComparator, Version};
/// let range = CaretRange::new(Version::parse("0.2.3")?);
/// assert!(range.satisfied_by(&Version::parse("0.2.999")?));
/// assert!(!range.satisfied_by(&Version::parse("0.3.0")?));
/// # Ok::<(), relaxed_semver::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "Version", into = "Version")]
pub struct CaretRange {
    version: Version,
    bounds: BoundedRange,
}

impl CaretRange {
    /// Create the caret range of the version.
    pub fn new(version: impl Into<Version>) -> Self {
        let version = version.into();
        let bounds = BoundedRange::between(version.floor(), version.next_breaking_change());
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

impl RangeComparator for CaretRange {
    fn compare(&self, version: &Version) -> Placement {
        self.bounds.compare(version)
    }
}

impl From<Version> for CaretRange {
    fn from(value: Version) -> Self {
        Self::new(value)
    }
}

impl From<CaretRange> for Version {
    fn from(value: CaretRange) -> Self {
        value.version
    }
}

impl std::fmt::Display for CaretRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "^{}", self.version)
    }
}
