use std::fmt;

use documented::Documented;
use getset::CopyGetters;

use crate::{Error, ExactVersion, InvalidArgumentError, VersionComponent, error, parse};

use super::write_release;

/// A version pattern such as `1.2.*`, `2.x`, `1.2`, or `3`.
///
/// The major is always a number.
/// Minor may be a number, a wildcard, or absent; patch may be a wildcard or absent.
/// Patterns never carry prerelease or build metadata.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, CopyGetters, Documented)]
#[getset(get_copy = "pub")]
pub struct WildcardVersion {
    /// The major component.
    major: u64,

    /// The minor component.
    minor: VersionComponent,

    /// The patch component.
    patch: VersionComponent,
}

impl WildcardVersion {
    /// Create a pattern, validating the combination of components.
    ///
    /// ```
    /// # use relaxed_semver::{VersionComponent, WildcardVersion};
    /// let pattern = WildcardVersion::new(1, 2u64, VersionComponent::Wildcard)?;
    /// assert_eq!(pattern.to_string(), "1.2.*");
    ///
    /// assert!(WildcardVersion::new(1, VersionComponent::Wildcard, 3u64).is_err());
    /// # Ok::<(), relaxed_semver::Error>(())
    /// ```
    pub fn new(
        major: u64,
        minor: impl Into<VersionComponent>,
        patch: impl Into<VersionComponent>,
    ) -> Result<Self, Error> {
        let (minor, patch) = (minor.into(), patch.into());
        match (minor, patch) {
            (_, VersionComponent::Number(patch)) => {
                error::fatal!(InvalidArgumentError::WildcardPatch {
                    major,
                    minor: minor.to_string(),
                    patch,
                })
            }
            (VersionComponent::Absent, VersionComponent::Wildcard) => {
                error::fatal!(InvalidArgumentError::AbsentBeforePresent { component: "patch" })
            }
            _ => Ok(Self {
                major,
                minor,
                patch,
            }),
        }
    }

    /// Parse a pattern such as `1.2.x`.
    #[tracing::instrument]
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            error::fatal!(crate::ParseError::Empty)
        }
        parse::complete(input, parse::pattern)?.into_wildcard(input)
    }

    /// The next major version; wildcards reset to `0`, absent components stay absent.
    pub fn next_major(&self) -> ExactVersion {
        release(
            self.major.saturating_add(1),
            self.minor.reset(),
            self.patch.reset(),
        )
    }

    /// The next minor version; a wildcard or absent minor becomes `1`.
    pub fn next_minor(&self) -> ExactVersion {
        let minor = self.minor.number().map_or(1, |minor| minor.saturating_add(1));
        release(self.major, VersionComponent::Number(minor), self.patch.reset())
    }

    /// The first version that is not API compatible with any version this pattern matches.
    ///
    /// ```
    /// # use relaxed_semver::WildcardVersion;
    /// assert_eq!(WildcardVersion::parse("4.*")?.next_breaking_change().to_string(), "5.0");
    /// assert_eq!(WildcardVersion::parse("0.0.x")?.next_breaking_change().to_string(), "0.1.0");
    /// # Ok::<(), relaxed_semver::Error>(())
    /// ```
    pub fn next_breaking_change(&self) -> ExactVersion {
        match (self.major, self.minor) {
            (0, VersionComponent::Wildcard | VersionComponent::Absent) => self.next_major(),
            (0, _) => self.next_minor(),
            _ => self.next_major(),
        }
    }

    /// The lowest version matched by this pattern.
    pub fn floor(&self) -> ExactVersion {
        release(self.major, self.minor.or_zero(), self.patch.or_zero())
    }

    /// The lowest version above everything matched by this pattern.
    pub fn ceil(&self) -> ExactVersion {
        match self.minor {
            VersionComponent::Number(minor) => {
                ExactVersion::from_triple(self.major, minor.saturating_add(1), 0)
            }
            VersionComponent::Wildcard | VersionComponent::Absent => {
                ExactVersion::from_triple(self.major.saturating_add(1), 0, 0)
            }
        }
    }
}

fn release(major: u64, minor: VersionComponent, patch: VersionComponent) -> ExactVersion {
    ExactVersion::release_of(major, minor, patch)
}

impl fmt::Display for WildcardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_release(f, self.major, self.minor, self.patch)
    }
}
