use derive_new::new;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{BoundedRange, Placement, RangeComparator, Version, VersionOrdering};

/// Comparison operators of primitive ranges.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Operator {
    /// `<`
    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    Less,

    /// `<=`
    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessOrEqual,

    /// `>`
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Greater,

    /// `>=`
    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterOrEqual,

    /// `=`
    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Equal,
}

/// A single comparison such as `>=1.2.3` or `<2.x`.
///
/// Wildcard bounds stand for the set of versions they match:
/// `<2.x` is `<2.0.0`, `<=2.x` is `<3.0.0`, `>2.x` is `>=3.0.0`,
/// `>=2.x` is `>=2.0.0`, and `=2.x` is `[2.0.0 .. 3.0.0)`.
#[derive(
    Clone, Eq, PartialEq, Debug, Getters, CopyGetters, Serialize, Deserialize, new,
)]
pub struct PrimitiveRange {
    /// The comparison operator.
    #[getset(get_copy = "pub")]
    operator: Operator,

    /// The bound the operator compares against.
    #[getset(get = "pub")]
    #[new(into)]
    version: Version,
}

impl RangeComparator for PrimitiveRange {
    fn compare(&self, version: &Version) -> Placement {
        place(self.operator, &self.version, version)
    }
}

impl std::fmt::Display for PrimitiveRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// Place `version` against `operator bound`, expanding wildcard bounds.
pub(crate) fn place(operator: Operator, bound: &Version, version: &Version) -> Placement {
    let Version::Wildcard(pattern) = bound else {
        return match operator {
            Operator::Less => below(bound, version),
            Operator::LessOrEqual => at_most(bound, version),
            Operator::Greater => above(bound, version),
            Operator::GreaterOrEqual => at_least(bound, version),
            Operator::Equal => equal(bound, version),
        };
    };

    let floor = Version::Exact(pattern.floor());
    let ceil = Version::Exact(pattern.ceil());
    match operator {
        Operator::Less => below(&floor, version),
        Operator::LessOrEqual => below(&ceil, version),
        Operator::Greater => at_least(&ceil, version),
        Operator::GreaterOrEqual => at_least(&floor, version),
        Operator::Equal => BoundedRange::between(floor, ceil).compare(version),
    }
}

/// Versions above a bound only opt into prereleases of the bound's own release.
fn above_bound(bound: &Version, version: &Version, ordering: VersionOrdering) -> Placement {
    match ordering {
        VersionOrdering::GreaterPrerelease if !bound.is_prerelease() => Placement::Excluded,
        VersionOrdering::Greater if version.is_prerelease() => Placement::Excluded,
        _ => Placement::Satisfied,
    }
}

/// Versions below a bound only opt into prereleases of the bound's own release.
fn below_bound(bound: &Version, version: &Version, ordering: VersionOrdering) -> Placement {
    match ordering {
        VersionOrdering::LowerPrerelease if !bound.is_prerelease() => Placement::Excluded,
        VersionOrdering::Lower if version.is_prerelease() => Placement::Excluded,
        _ => Placement::Satisfied,
    }
}

fn at_least(bound: &Version, version: &Version) -> Placement {
    match version.compare(bound) {
        VersionOrdering::Lower | VersionOrdering::LowerPrerelease => Placement::Lower,
        VersionOrdering::LowerBuild | VersionOrdering::Equal | VersionOrdering::GreaterBuild => {
            Placement::Satisfied
        }
        ordering @ (VersionOrdering::GreaterPrerelease | VersionOrdering::Greater) => {
            above_bound(bound, version, ordering)
        }
    }
}

fn above(bound: &Version, version: &Version) -> Placement {
    match version.compare(bound) {
        VersionOrdering::Lower
        | VersionOrdering::LowerPrerelease
        | VersionOrdering::LowerBuild
        | VersionOrdering::Equal
        | VersionOrdering::GreaterBuild => Placement::Lower,
        ordering @ (VersionOrdering::GreaterPrerelease | VersionOrdering::Greater) => {
            above_bound(bound, version, ordering)
        }
    }
}

fn below(bound: &Version, version: &Version) -> Placement {
    match version.compare(bound) {
        ordering @ (VersionOrdering::Lower | VersionOrdering::LowerPrerelease) => {
            below_bound(bound, version, ordering)
        }
        VersionOrdering::LowerBuild
        | VersionOrdering::Equal
        | VersionOrdering::GreaterBuild
        | VersionOrdering::GreaterPrerelease
        | VersionOrdering::Greater => Placement::Greater,
    }
}

fn at_most(bound: &Version, version: &Version) -> Placement {
    match version.compare(bound) {
        ordering @ (VersionOrdering::Lower | VersionOrdering::LowerPrerelease) => {
            below_bound(bound, version, ordering)
        }
        VersionOrdering::LowerBuild | VersionOrdering::Equal | VersionOrdering::GreaterBuild => {
            Placement::Satisfied
        }
        VersionOrdering::GreaterPrerelease | VersionOrdering::Greater => Placement::Greater,
    }
}

fn equal(bound: &Version, version: &Version) -> Placement {
    match version.compare(bound) {
        VersionOrdering::Lower | VersionOrdering::LowerPrerelease => Placement::Lower,
        VersionOrdering::LowerBuild | VersionOrdering::Equal | VersionOrdering::GreaterBuild => {
            Placement::Satisfied
        }
        VersionOrdering::GreaterPrerelease | VersionOrdering::Greater => Placement::Greater,
    }
}
