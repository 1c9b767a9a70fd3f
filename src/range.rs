//! Version ranges: sets of versions described by expressions such as
//! `^1.2.3`, `~1.2`, `>=1.0.0 <2.0.0-0`, `1.2.x - 2`, or `1.x || 3.x`.
//!
//! Every range implements [`RangeComparator`], which places a version
//! [`Lower`](Placement::Lower) than the range, [`Greater`](Placement::Greater) than it,
//! inside it ([`Satisfied`](Placement::Satisfied)), or inside it numerically but
//! [`Excluded`](Placement::Excluded) because of its prerelease tag.
//!
//! ## Grammar
//!
//! Alternatives are separated by `||` or whitespace; a version satisfies the whole expression
//! if it satisfies any alternative. Each alternative is one of:
//!
//! | Form          | Example          | Range                                  |
//! |---------------|------------------|----------------------------------------|
//! | hyphen        | `1.2 - 1.4.7`    | [`BoundedRange`]                       |
//! | caret         | `^1.2.3`         | [`CaretRange`]                         |
//! | tilde         | `~1.2.3`, `~>1.2`| [`TildeRange`]                         |
//! | pinned        | `^=1.2.3`        | [`ExactRange`]                         |
//! | primitive     | `>=1.2.3`        | [`PrimitiveRange`]                     |
//! | any           | `*`, `x.x`       | `>=0.0.0`                              |
//! | plain version | `1.2.3`          | [`ExactRange`]                         |
//! | plain pattern | `1.2`, `1.x`     | [`BoundedRange`] over the pattern      |
//!
//! Inside ranges, only full `major.minor.patch` versions are exact and may carry prerelease
//! and build metadata; anything shorter is a pattern.

use std::str::FromStr;

use derive_more::{Display, From};
use documented::Documented;
use serde::{Deserialize, Serialize};

use crate::{Error, ParseError, Version, error, parse};

mod bounded;
mod caret;
mod comparator;
mod composite;
mod exact;
pub(crate) mod primitive;
mod tilde;

pub use bounded::*;
pub use caret::*;
pub use comparator::*;
pub use composite::*;
pub use exact::*;
pub use primitive::{Operator, PrimitiveRange};
pub use tilde::*;

/// Constructs a [`Range`] known to be valid.
///
/// Panics if the expression fails to parse.
///
/// ```
/// # use relaxed_semver::{range, version};
/// let range = range!("^1.2.3 || 2.x");
/// assert!(range.satisfied_by(&version!(2, 7, 0)));
/// ```
#[macro_export]
macro_rules! range {
    ($input:expr) => {
        $crate::Range::parse($input).expect("parse range")
    };
}

/// A set of versions.
///
/// ```
/// # use relaxed_semver::{Range, Version};
/// let range = Range::parse("8.x - 10.X")?;
/// assert!(range.satisfied_by(&Version::parse("9.5.5")?));
///
/// let range = Range::parse("~3.0.23-4.beta")?;
/// assert!(range.satisfied_by(&Version::parse("3.0.23-5.alpha")?));
/// assert!(!range.satisfied_by(&Version::parse("3.0.23-3.beta")?));
///
/// let range = Range::parse("^=1.2.4")?;
/// assert!(range.satisfied_by(&Version::parse("1.2.4")?));
/// assert!(!range.satisfied_by(&Version::parse("1.3.0")?));
/// # Ok::<(), relaxed_semver::Error>(())
/// ```
///
/// ## Serialization
///
/// Ranges serialize structurally with `kind` and `value` fields;
/// they are not serialized as range expressions.
#[derive(Clone, Eq, PartialEq, Debug, Display, From, Serialize, Deserialize, Documented)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Range {
    /// A single comparison, such as `>=1.2.3`.
    #[display("{_0}")]
    Primitive(PrimitiveRange),

    /// An interval, such as `1.2.3 - 2.3.4`.
    #[display("{_0}")]
    Bounded(BoundedRange),

    /// Compatible versions, such as `^1.2.3`.
    #[display("{_0}")]
    Caret(CaretRange),

    /// Patch-level updates, such as `~1.2.3`.
    #[display("{_0}")]
    Tilde(TildeRange),

    /// A single version, such as `1.2.3`.
    #[display("{_0}")]
    Exact(ExactRange),

    /// Alternatives, such as `1.x || 3.x`.
    #[display("{_0}")]
    Composite(CompositeRange),
}

impl Range {
    /// Parse a range expression.
    #[tracing::instrument]
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }

        let mut ranges = parse::complete(input, parse::range)?
            .into_iter()
            .map(|raw| raw.into_range(input))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(if ranges.len() == 1 {
            ranges.swap_remove(0)
        } else {
            Self::Composite(CompositeRange::new(ranges))
        })
    }

    /// Whether the version is in the range.
    pub fn satisfied_by(&self, version: &Version) -> bool {
        RangeComparator::satisfied_by(self, version)
    }

    /// Whether the version is above every version in the range.
    pub fn gtr(&self, version: &Version) -> bool {
        RangeComparator::gtr(self, version)
    }

    /// Whether the version is below every version in the range.
    pub fn ltr(&self, version: &Version) -> bool {
        RangeComparator::ltr(self, version)
    }
}

impl RangeComparator for Range {
    fn compare(&self, version: &Version) -> Placement {
        let placement = match self {
            Range::Primitive(range) => range.compare(version),
            Range::Bounded(range) => range.compare(version),
            Range::Caret(range) => range.compare(version),
            Range::Tilde(range) => range.compare(version),
            Range::Exact(range) => range.compare(version),
            Range::Composite(range) => range.compare(version),
        };
        tracing::trace!(range = %self, %version, %placement, "placed version");
        placement
    }
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Range {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Range {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for Range {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
