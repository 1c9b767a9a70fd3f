use std::{cmp::Ordering, str::FromStr};

use derive_more::{Debug, Display};
use documented::Documented;
use duplicate::duplicate;

use crate::{Error, InvalidArgumentError, error};

/// A single numeric slot of a version: major, minor, or patch.
///
/// - `Number` is a concrete non-negative value.
/// - `Absent` means the slot was left out, as the patch in `1.2`.
/// - `Wildcard` means the slot was given as `*`, `x`, or `X`.
///
/// Components deliberately do not implement [`Ord`]:
/// a wildcard compares equal to every other component,
/// which is not a total order. Use [`VersionComponent::compare`] instead.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, Display, Documented)]
pub enum VersionComponent {
    /// A concrete value.
    #[display("{_0}")]
    #[debug("{_0}")]
    Number(u64),

    /// The component was not specified.
    #[default]
    #[display("")]
    #[debug("_")]
    Absent,

    /// The component matches any value.
    #[display("*")]
    #[debug("*")]
    Wildcard,
}

impl VersionComponent {
    /// The concrete value `0`.
    pub const ZERO: Self = Self::Number(0);

    /// Compare two components.
    ///
    /// ```
    /// # use std::cmp::Ordering;
    /// # use relaxed_semver::VersionComponent;
    /// assert_eq!(VersionComponent::Absent.compare(&VersionComponent::ZERO), Ordering::Less);
    /// assert_eq!(VersionComponent::Wildcard.compare(&VersionComponent::Number(7)), Ordering::Equal);
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Wildcard, _) | (_, Self::Wildcard) => Ordering::Equal,
            (Self::Absent, Self::Absent) => Ordering::Equal,
            (Self::Absent, Self::Number(_)) => Ordering::Less,
            (Self::Number(_), Self::Absent) => Ordering::Greater,
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
        }
    }

    /// The concrete value, if there is one.
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Absent | Self::Wildcard => None,
        }
    }

    /// Whether the component is a concrete value.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Whether the component was left out.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether the component is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Whether the component is a concrete value greater than zero.
    pub fn is_positive(&self) -> bool {
        self.number().is_some_and(|n| n > 0)
    }

    /// Add `n` to the component.
    ///
    /// Absent components count as `0`; wildcards absorb the addition.
    /// Values saturate at [`u64::MAX`].
    pub fn increment(self, n: u64) -> Self {
        match self {
            Self::Number(value) => Self::Number(value.saturating_add(n)),
            Self::Absent => Self::Number(n),
            Self::Wildcard => Self::Wildcard,
        }
    }

    /// Replace absent and wildcard components with `0`.
    pub fn or_zero(self) -> Self {
        match self {
            Self::Number(_) => self,
            Self::Absent | Self::Wildcard => Self::ZERO,
        }
    }

    /// Reset a specified component to `0`, leaving absent components absent.
    pub(crate) fn reset(self) -> Self {
        match self {
            Self::Absent => Self::Absent,
            Self::Number(_) | Self::Wildcard => Self::ZERO,
        }
    }
}

impl From<Option<u64>> for VersionComponent {
    fn from(value: Option<u64>) -> Self {
        value.map(Self::Number).unwrap_or(Self::Absent)
    }
}

duplicate! {
    [
        number;
        [ u64 ];
        [ u32 ];
        [ u16 ];
        [ u8 ];
    ]
    impl From<number> for VersionComponent {
        fn from(value: number) -> Self {
            Self::Number(u64::from(value))
        }
    }
}

impl From<usize> for VersionComponent {
    fn from(value: usize) -> Self {
        Self::Number(value as u64)
    }
}

duplicate! {
    [
        number;
        [ i64 ];
        [ i32 ];
        [ i16 ];
        [ i8 ];
        [ isize ];
    ]
    impl TryFrom<number> for VersionComponent {
        type Error = Error;

        fn try_from(value: number) -> Result<Self, Self::Error> {
            match u64::try_from(value) {
                Ok(value) => Ok(Self::Number(value)),
                Err(_) => error::fatal!(InvalidArgumentError::Negative(value as i128)),
            }
        }
    }
}

impl FromStr for VersionComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Ok(Self::Absent),
            "*" | "x" | "X" => Ok(Self::Wildcard),
            _ => match s.parse::<u64>() {
                Ok(n) => Ok(Self::Number(n)),
                Err(err) => error::fatal!(error::field!(s, "component" => (0, s.len()), err)),
            },
        }
    }
}
