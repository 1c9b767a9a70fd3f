use std::fmt;

use bon::bon;
use documented::Documented;
use getset::{CopyGetters, Getters};

use crate::{Build, Error, InvalidArgumentError, Prerelease, VersionComponent, error};

use super::write_release;

/// A concrete version such as `1.2.3-beta.1+42`, `1.2`, or `3`.
///
/// Minor and patch may be left out, but only from the end:
/// a patch cannot be given without a minor.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Getters, CopyGetters, Documented)]
pub struct ExactVersion {
    /// The major component.
    #[getset(get_copy = "pub")]
    major: u64,

    /// The minor component; a number or absent.
    #[getset(get_copy = "pub")]
    minor: VersionComponent,

    /// The patch component; a number or absent.
    #[getset(get_copy = "pub")]
    patch: VersionComponent,

    /// The prerelease tag.
    #[getset(get = "pub")]
    prerelease: Prerelease,

    /// The build metadata.
    #[getset(get = "pub")]
    build: Build,
}

#[bon]
impl ExactVersion {
    /// Create an exact version.
    ///
    /// ```
    /// # use relaxed_semver::{Build, ExactVersion, Prerelease};
    /// let version = ExactVersion::builder()
    ///     .major(1)
    ///     .minor(2)
    ///     .prerelease(Prerelease::parse("beta.1")?)
    ///     .metadata(Build::of("42"))
    ///     .build()?;
    /// assert_eq!(version.to_string(), "1.2-beta.1+42");
    ///
    /// let invalid = ExactVersion::builder().major(1).patch(3).build();
    /// assert!(invalid.is_err());
    /// # Ok::<(), relaxed_semver::Error>(())
    /// ```
    #[builder]
    pub fn new(
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        #[builder(default)] prerelease: Prerelease,
        #[builder(default)] metadata: Build,
    ) -> Result<Self, Error> {
        if minor.is_none() && patch.is_some() {
            error::fatal!(InvalidArgumentError::AbsentBeforePresent { component: "patch" });
        }

        Ok(Self {
            major,
            minor: minor.into(),
            patch: patch.into(),
            prerelease,
            build: metadata,
        })
    }
}

impl ExactVersion {
    /// Create a release version with all three components.
    pub const fn from_triple(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor: VersionComponent::Number(minor),
            patch: VersionComponent::Number(patch),
            prerelease: Prerelease::None,
            build: Build::None,
        }
    }

    /// Callers keep the trailing-absent invariant: a present patch needs a present minor.
    pub(crate) fn release_of(major: u64, minor: VersionComponent, patch: VersionComponent) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Prerelease::None,
            build: Build::None,
        }
    }

    /// The next major version; specified minor and patch reset to `0`.
    pub fn next_major(&self) -> Self {
        Self::release_of(
            self.major.saturating_add(1),
            self.minor.reset(),
            self.patch.reset(),
        )
    }

    /// The next minor version; a specified patch resets to `0`.
    pub fn next_minor(&self) -> Self {
        Self::release_of(self.major, self.minor.increment(1), self.patch.reset())
    }

    /// The next patch version.
    ///
    /// A prerelease is a preview of its own release triple,
    /// so `1.2.3-beta` advances to `1.2.3` rather than `1.2.4`.
    pub fn next_patch(&self) -> Self {
        let patch = if self.prerelease.is_none() {
            self.patch.increment(1)
        } else {
            self.patch.or_zero()
        };
        Self::release_of(self.major, self.minor.or_zero(), patch)
    }

    /// The first version that is not API compatible with this one.
    ///
    /// Bumps the leftmost non-zero component; `0.0.x` versions bump the patch.
    pub fn next_breaking_change(&self) -> Self {
        if self.major > 0 {
            return Self::from_triple(self.major.saturating_add(1), 0, 0);
        }

        match self.minor.number() {
            Some(minor) if minor > 0 => Self::from_triple(0, minor.saturating_add(1), 0),
            _ => {
                let patch = self.patch.number().unwrap_or(0);
                Self::from_triple(0, 0, patch.saturating_add(1))
            }
        }
    }

    /// Fill absent components with `0` and drop the build metadata.
    pub fn floor(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor.or_zero(),
            patch: self.patch.or_zero(),
            prerelease: self.prerelease.clone(),
            build: Build::None,
        }
    }

    /// The first version beyond the minor line of this version,
    /// or beyond its major line if the minor is absent.
    pub fn ceil(&self) -> Self {
        match self.minor.number() {
            None => Self::from_triple(self.major.saturating_add(1), 0, 0),
            Some(minor) => Self::from_triple(self.major, minor.saturating_add(1), 0),
        }
    }

    /// The release triple without prerelease or build.
    pub fn release(&self) -> Self {
        Self::release_of(self.major, self.minor, self.patch)
    }

    /// The smallest version after this one.
    ///
    /// Releases advance to the next patch;
    /// prereleases advance the numeric version of their tag.
    pub fn next(&self) -> Self {
        if self.prerelease.is_none() {
            return self.next_patch();
        }

        Self {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease: self.prerelease.next(),
            build: Build::None,
        }
    }
}

impl fmt::Display for ExactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_release(f, self.major, self.minor, self.patch)?;
        if self.prerelease.is_some() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.build.is_none() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}
