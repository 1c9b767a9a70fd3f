use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::Version;

/// Where a version falls relative to a range.
///
/// `Lower` and `Greater` mean the version is entirely outside the range on that side.
/// `Excluded` means the version is numerically inside the range
/// but carries a prerelease tag the range does not opt into.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Display, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Below every version in the range.
    Lower,

    /// Above every version in the range.
    Greater,

    /// Inside the range numerically, but excluded by its prerelease.
    Excluded,

    /// In the range.
    Satisfied,
}

/// Decides where versions fall relative to a range.
///
/// Implementors provide [`RangeComparator::compare`];
/// the predicates used by resolvers are derived from it.
///
/// ## Prereleases
///
/// A version with a prerelease tag only satisfies a range when one of the range's
/// boundaries is itself a prerelease of the same release triple.
/// `>=1.2.3-beta.1` accepts `1.2.3-beta.2` but not `1.2.4-beta.1`;
/// `>=1.2.0` accepts neither.
pub trait RangeComparator {
    /// Place the version relative to the range.
    fn compare(&self, version: &Version) -> Placement;

    /// Whether the version is in the range.
    fn satisfied_by(&self, version: &Version) -> bool {
        self.compare(version) == Placement::Satisfied
    }

    /// Whether the version is above every version in the range.
    fn gtr(&self, version: &Version) -> bool {
        self.compare(version) == Placement::Greater
    }

    /// Whether the version is below every version in the range.
    fn ltr(&self, version: &Version) -> bool {
        self.compare(version) == Placement::Lower
    }
}
