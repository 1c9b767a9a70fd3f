use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use derive_more::Display;
use documented::Documented;
use enum_assoc::Assoc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{
    Build, Error, InvalidArgumentError, ParseError, Prerelease, VersionComponent, error, parse,
};

mod exact;
mod wildcard;

pub use exact::*;
pub use wildcard::*;

/// Constructs a [`Version`] known to be valid.
///
/// ```
/// # use relaxed_semver::{version, Version};
/// let version = version!(1, 2, 3);
/// assert_eq!(version, Version::parse("1.2.3")?);
///
/// let pattern = version!(parse => "1.2.x");
/// assert!(pattern.is_wildcard());
/// # Ok::<(), relaxed_semver::Error>(())
/// ```
#[macro_export]
macro_rules! version {
    ($major:expr, $minor:expr, $patch:expr) => {
        $crate::Version::new_semver($major, $minor, $patch)
    };
    (parse => $input:expr) => {
        $crate::Version::parse_any($input).expect("parse version")
    };
}

static NO_PRERELEASE: Prerelease = Prerelease::None;
static NO_BUILD: Build = Build::None;

/// A version: either an exact version or a wildcard pattern.
///
/// Equality and ordering compare major, minor, patch, prerelease, and build in turn.
/// A wildcard component compares equal to anything,
/// so across patterns the ordering is only a preorder.
///
/// ```
/// # use relaxed_semver::Version;
/// let release = Version::parse("1.0.0")?;
/// let prerelease = Version::parse("1.0.0-alpha")?;
/// assert!(prerelease < release);
///
/// assert_eq!(Version::parse("1.2.7")?.next_breaking_change().to_string(), "2.0.0");
/// assert_eq!(Version::parse("0.4.2")?.next_breaking_change().to_string(), "0.5.0");
/// assert_eq!(Version::parse("0.0.3")?.next_breaking_change().to_string(), "0.0.4");
/// # Ok::<(), relaxed_semver::Error>(())
/// ```
#[derive(Clone, Debug, Display, Documented)]
pub enum Version {
    /// A concrete version, possibly with absent trailing components.
    #[display("{_0}")]
    Exact(ExactVersion),

    /// A pattern such as `1.2.*`.
    #[display("{_0}")]
    Wildcard(WildcardVersion),
}

impl Version {
    /// Create a release version with all three components.
    pub const fn new_semver(major: u64, minor: u64, patch: u64) -> Self {
        Self::Exact(ExactVersion::from_triple(major, minor, patch))
    }

    /// Parse an exact version: `major[.minor[.patch]][-prerelease][+build]`.
    #[tracing::instrument]
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }
        parse::complete(input, parse::version)?
            .into_exact(input)
            .map(Self::Exact)
    }

    /// Parse an exact version or a wildcard pattern.
    ///
    /// Full triples, and versions with prerelease or build metadata, parse as [`Version::Exact`];
    /// shorter versions such as `1.2` are patterns.
    #[tracing::instrument]
    pub fn parse_any(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }
        parse::complete(input, parse::any_version)?.into_version(input)
    }

    /// The major component; always a number.
    pub fn major(&self) -> VersionComponent {
        match self {
            Self::Exact(v) => VersionComponent::Number(v.major()),
            Self::Wildcard(v) => VersionComponent::Number(v.major()),
        }
    }

    /// The minor component.
    pub fn minor(&self) -> VersionComponent {
        match self {
            Self::Exact(v) => v.minor(),
            Self::Wildcard(v) => v.minor(),
        }
    }

    /// The patch component.
    pub fn patch(&self) -> VersionComponent {
        match self {
            Self::Exact(v) => v.patch(),
            Self::Wildcard(v) => v.patch(),
        }
    }

    /// The prerelease tag; patterns never have one.
    pub fn prerelease(&self) -> &Prerelease {
        match self {
            Self::Exact(v) => v.prerelease(),
            Self::Wildcard(_) => &NO_PRERELEASE,
        }
    }

    /// The build metadata; patterns never have any.
    pub fn build(&self) -> &Build {
        match self {
            Self::Exact(v) => v.build(),
            Self::Wildcard(_) => &NO_BUILD,
        }
    }

    /// Whether this is a pattern.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// Whether this version carries a prerelease tag.
    pub fn is_prerelease(&self) -> bool {
        self.prerelease().is_some()
    }

    /// The exact version, if this is one.
    pub fn as_exact(&self) -> Option<&ExactVersion> {
        match self {
            Self::Exact(v) => Some(v),
            Self::Wildcard(_) => None,
        }
    }

    /// The pattern, if this is one.
    pub fn as_wildcard(&self) -> Option<&WildcardVersion> {
        match self {
            Self::Exact(_) => None,
            Self::Wildcard(v) => Some(v),
        }
    }

    /// Compare with another version, reporting which part decided the result.
    ///
    /// ```
    /// # use relaxed_semver::{Version, VersionOrdering};
    /// let compare = |a: &str, b: &str| -> Result<VersionOrdering, relaxed_semver::Error> {
    ///     Ok(Version::parse(a)?.compare(&Version::parse(b)?))
    /// };
    /// assert_eq!(compare("1.2.3", "1.3.0")?, VersionOrdering::Lower);
    /// assert_eq!(compare("1.2.3", "1.2.3-rc.1")?, VersionOrdering::GreaterPrerelease);
    /// assert_eq!(compare("1.2.3+1", "1.2.3+2")?, VersionOrdering::LowerBuild);
    /// # Ok::<(), relaxed_semver::Error>(())
    /// ```
    pub fn compare(&self, other: &Self) -> VersionOrdering {
        let release = self
            .major()
            .compare(&other.major())
            .then_with(|| self.minor().compare(&other.minor()))
            .then_with(|| self.patch().compare(&other.patch()));

        match release {
            Ordering::Less => VersionOrdering::Lower,
            Ordering::Greater => VersionOrdering::Greater,
            Ordering::Equal => match self.prerelease().compare(other.prerelease()).ordering() {
                Ordering::Less => VersionOrdering::LowerPrerelease,
                Ordering::Greater => VersionOrdering::GreaterPrerelease,
                Ordering::Equal => match self.build().cmp(other.build()) {
                    Ordering::Less => VersionOrdering::LowerBuild,
                    Ordering::Greater => VersionOrdering::GreaterBuild,
                    Ordering::Equal => VersionOrdering::Equal,
                },
            },
        }
    }

    /// The next major version; see [`ExactVersion::next_major`].
    pub fn next_major(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.next_major()),
            Self::Wildcard(v) => Self::Exact(v.next_major()),
        }
    }

    /// The next minor version; see [`ExactVersion::next_minor`].
    pub fn next_minor(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.next_minor()),
            Self::Wildcard(v) => Self::Exact(v.next_minor()),
        }
    }

    /// The next patch version; patterns are returned unchanged.
    pub fn next_patch(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.next_patch()),
            Self::Wildcard(_) => self.clone(),
        }
    }

    /// The first version that is not API compatible with this one.
    pub fn next_breaking_change(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.next_breaking_change()),
            Self::Wildcard(v) => Self::Exact(v.next_breaking_change()),
        }
    }

    /// The lowest concrete version this version stands for.
    pub fn floor(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.floor()),
            Self::Wildcard(v) => Self::Exact(v.floor()),
        }
    }

    /// The lowest version above the minor line (or major line, if the minor is unspecified).
    pub fn ceil(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.ceil()),
            Self::Wildcard(v) => Self::Exact(v.ceil()),
        }
    }

    /// The version without prerelease or build.
    pub fn release(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.release()),
            Self::Wildcard(_) => self.clone(),
        }
    }

    /// The smallest version after everything this version stands for.
    pub fn next(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.next()),
            Self::Wildcard(v) => Self::Exact(v.ceil()),
        }
    }
}

/// Write `major[.minor[.patch]]`, omitting absent components.
pub(crate) fn write_release(
    f: &mut fmt::Formatter<'_>,
    major: u64,
    minor: VersionComponent,
    patch: VersionComponent,
) -> fmt::Result {
    write!(f, "{major}")?;
    for component in [minor, patch] {
        if component.is_absent() {
            break;
        }
        write!(f, ".{component}")?;
    }
    Ok(())
}

/// The result of comparing two versions, naming the part that differed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Assoc)]
#[func(const fn sign(&self) -> Ordering)]
pub enum VersionOrdering {
    /// Lower major, minor, or patch.
    #[assoc(sign = Ordering::Less)]
    Lower,

    /// Same release triple, lower prerelease.
    #[assoc(sign = Ordering::Less)]
    LowerPrerelease,

    /// Only the build metadata is lower.
    #[assoc(sign = Ordering::Less)]
    LowerBuild,

    /// Indistinguishable.
    #[assoc(sign = Ordering::Equal)]
    Equal,

    /// Only the build metadata is greater.
    #[assoc(sign = Ordering::Greater)]
    GreaterBuild,

    /// Same release triple, greater prerelease.
    #[assoc(sign = Ordering::Greater)]
    GreaterPrerelease,

    /// Greater major, minor, or patch.
    #[assoc(sign = Ordering::Greater)]
    Greater,
}

impl VersionOrdering {
    /// Collapse to a plain [`Ordering`], dropping which part differed.
    pub const fn ordering(&self) -> Ordering {
        self.sign()
    }
}

impl From<ExactVersion> for Version {
    fn from(value: ExactVersion) -> Self {
        Self::Exact(value)
    }
}

impl From<WildcardVersion> for Version {
    fn from(value: WildcardVersion) -> Self {
        Self::Wildcard(value)
    }
}

impl From<&Version> for Version {
    fn from(value: &Version) -> Self {
        value.clone()
    }
}

impl TryFrom<semver::Version> for Version {
    type Error = Error;

    fn try_from(value: semver::Version) -> Result<Self, Self::Error> {
        let exact = ExactVersion::builder()
            .major(value.major)
            .minor(value.minor)
            .patch(value.patch)
            .prerelease(Prerelease::parse(value.pre.as_str())?)
            .metadata(Build::parse(value.build.as_str())?)
            .build()?;
        Ok(Self::Exact(exact))
    }
}

impl TryFrom<&Version> for semver::Version {
    type Error = Error;

    fn try_from(value: &Version) -> Result<Self, Self::Error> {
        let Version::Exact(exact) = value else {
            error::fatal!(InvalidArgumentError::Wildcard(value.to_string()));
        };

        Ok(semver::Version {
            major: exact.major(),
            minor: exact.minor().number().unwrap_or(0),
            patch: exact.patch().number().unwrap_or(0),
            pre: semver::Prerelease::new(&exact.prerelease().to_string())?,
            build: semver::BuildMetadata::new(exact.build().as_str())?,
        })
    }
}

impl TryFrom<Version> for semver::Version {
    type Error = Error;

    fn try_from(value: Version) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == VersionOrdering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).ordering()
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for Version {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl FromStr for WildcardVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for WildcardVersion {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for WildcardVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for WildcardVersion {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_any(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Version {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([
                json!("1.2.3"),
                json!("1.2.3-beta.4+exp.sha.5114f85"),
                json!("1.2"),
                json!("2.x"),
            ])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Version {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Version")
    }
}
