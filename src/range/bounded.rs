use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::{Placement, RangeComparator, Version, VersionOrdering};

/// An interval `[lower .. upper)` of versions.
///
/// [`BoundedRange::new`] takes the bounds as written in a hyphen range such as `1.2 - 1.4.7`,
/// where the upper bound is inclusive, and normalizes them:
/// the lower bound is floored and the upper bound becomes the first version past it.
///
/// ```
/// # use relaxed_semver::{BoundedRange, RangeComparator, Version};
/// let range = BoundedRange::new(Version::parse_any("8.x")?, Version::parse_any("10.X")?);
/// assert!(range.satisfied_by(&Version::parse("9.5.5")?));
/// assert!(!range.satisfied_by(&Version::parse("11.0.0")?));
/// # Ok::<(), relaxed_semver::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct BoundedRange {
    /// The lowest version in the range.
    lower: Version,

    /// The lowest version above the range.
    upper: Version,
}

impl BoundedRange {
    /// Create a range covering everything from `lower` through `upper`.
    pub fn new(lower: impl Into<Version>, upper: impl Into<Version>) -> Self {
        let (lower, upper) = (lower.into(), upper.into());
        Self::between(lower.floor(), upper.next())
    }

    /// Create a range from bounds that are already normalized.
    pub(crate) fn between(lower: Version, upper: Version) -> Self {
        Self { lower, upper }
    }
}

impl RangeComparator for BoundedRange {
    fn compare(&self, version: &Version) -> Placement {
        let below = |bound: &Version| {
            matches!(
                version.compare(bound),
                VersionOrdering::Lower | VersionOrdering::LowerPrerelease
            )
        };

        if below(&self.lower) {
            return Placement::Lower;
        }
        if !below(&self.upper) {
            return Placement::Greater;
        }
        if !version.is_prerelease() {
            return Placement::Satisfied;
        }

        let release = version.release();
        let opts_in = |bound: &Version| bound.is_prerelease() && bound.release() == release;
        if opts_in(&self.lower) || opts_in(&self.upper) {
            Placement::Satisfied
        } else {
            Placement::Excluded
        }
    }
}

impl std::fmt::Display for BoundedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {})", self.lower, self.upper)
    }
}
