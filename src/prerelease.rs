use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use compact_str::{CompactString, ToCompactString};
use derive_more::{Debug, Display};
use documented::Documented;
use enum_assoc::Assoc;
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, error, parse};

static ABSENT_NAME: PrereleaseName = PrereleaseName::Absent;

/// The textual part of a prerelease tag on either side of its numeric version.
///
/// Absent names sort before any named value;
/// named values sort by ordinal string comparison.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug, Display)]
pub enum PrereleaseName {
    /// No name was given.
    #[default]
    #[display("")]
    #[debug("_")]
    Absent,

    /// A non-empty, trimmed name.
    #[display("{_0}")]
    #[debug("{_0:?}")]
    Named(CompactString),
}

impl PrereleaseName {
    /// Create a name, treating blank input as [`PrereleaseName::Absent`].
    pub fn new(name: impl AsRef<str>) -> Self {
        match name.as_ref().trim() {
            "" => Self::Absent,
            name => Self::Named(name.to_compact_string()),
        }
    }

    /// View the name as a string; absent names are empty.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Absent => "",
            Self::Named(name) => name.as_str(),
        }
    }

    /// Whether no name was given.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&str> for PrereleaseName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PrereleaseName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Option<&str>> for PrereleaseName {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

/// The numeric part of a prerelease tag.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug, Display)]
pub enum PrereleaseVersion {
    /// No numeric segment was given.
    #[default]
    #[display("")]
    #[debug("_")]
    Absent,

    /// The numeric segment.
    #[display("{_0}")]
    #[debug("{_0}")]
    Numbered(u64),
}

impl PrereleaseVersion {
    /// Whether no numeric segment was given.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The numeric value, if there is one.
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Absent => None,
            Self::Numbered(n) => Some(*n),
        }
    }
}

impl From<u64> for PrereleaseVersion {
    fn from(value: u64) -> Self {
        Self::Numbered(value)
    }
}

impl From<Option<u64>> for PrereleaseVersion {
    fn from(value: Option<u64>) -> Self {
        value.map(Self::Numbered).unwrap_or_default()
    }
}

/// The prerelease tag of a version: the part after `-` in `1.0.0-beta.2`.
///
/// Tags are made up of dot separated segments.
/// The last purely numeric segment is the tag's `version`;
/// the segments before it form the `prefix` and those after it the `suffix`:
///
/// | tag                                 | prefix         | version | suffix              |
/// |-------------------------------------|----------------|---------|---------------------|
/// | `beta.nightly.14.unstable.untested` | `beta.nightly` | `14`    | `unstable.untested` |
/// | `3.5.beta`                          | `3`            | `5`     | `beta`              |
/// | `23.M13.unstable`                   |                | `23`    | `M13.unstable`      |
/// | `alpha`                             | `alpha`        |         |                     |
///
/// Numeric segments with leading zeros (such as `007`) are treated as text.
///
/// An `Identifier` with all three parts absent is the same as `None`:
/// it compares, hashes, and renders identically.
///
/// ## Ordering
///
/// `None` is greater than every tag, since a version without a prerelease is a release.
/// Two tags compare by prefix, then version, then suffix;
/// [`Prerelease::compare`] reports which part decided the result.
#[derive(Clone, Default, Debug, Documented)]
pub enum Prerelease {
    /// The version has no prerelease tag.
    #[default]
    None,

    /// The version has a prerelease tag.
    Identifier {
        /// Text before the numeric version.
        prefix: PrereleaseName,

        /// The numeric version.
        version: PrereleaseVersion,

        /// Text after the numeric version.
        suffix: PrereleaseName,
    },
}

impl Prerelease {
    /// Create a prerelease tag, normalizing an entirely empty tag to [`Prerelease::None`].
    ///
    /// ```
    /// # use relaxed_semver::{Prerelease, PrereleaseName, PrereleaseVersion};
    /// let tag = Prerelease::of("beta", 2, PrereleaseName::Absent);
    /// assert_eq!(tag.to_string(), "beta.2");
    ///
    /// let empty = Prerelease::of("", PrereleaseVersion::Absent, "");
    /// assert!(empty.is_none());
    /// ```
    pub fn of(
        prefix: impl Into<PrereleaseName>,
        version: impl Into<PrereleaseVersion>,
        suffix: impl Into<PrereleaseName>,
    ) -> Self {
        let (prefix, version, suffix) = (prefix.into(), version.into(), suffix.into());
        if prefix.is_absent() && version.is_absent() && suffix.is_absent() {
            Self::None
        } else {
            Self::Identifier {
                prefix,
                version,
                suffix,
            }
        }
    }

    /// Parse a prerelease tag, without the leading `-`.
    ///
    /// Blank input parses as [`Prerelease::None`].
    #[tracing::instrument]
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::None);
        }

        let dotted = parse::complete(input, parse::dotted)?;
        Self::from_dotted(input, dotted)
    }

    /// Split dot separated segments around the last numeric one.
    pub(crate) fn from_dotted(input: &str, dotted: &str) -> Result<Self, Error> {
        let segments = dotted.split('.').collect::<Vec<_>>();
        let numeric = segments
            .iter()
            .rposition(|segment| regex_is_match!(r"^(0|[1-9][0-9]*)$", segment));

        let Some(position) = numeric else {
            return Ok(Self::of(dotted, PrereleaseVersion::Absent, PrereleaseName::Absent));
        };

        let segment = segments[position];
        let version = segment.parse::<u64>().map_err(|err| {
            Error::from(error::field!(input, "prerelease" => error::span(input, segment), err))
        })?;

        let prefix = segments[..position].join(".");
        let suffix = segments[position + 1..].join(".");
        Ok(Self::of(prefix, version, suffix))
    }

    /// The three parts of the tag, or `None` if there is no tag.
    fn parts(&self) -> Option<(&PrereleaseName, PrereleaseVersion, &PrereleaseName)> {
        match self {
            Self::None => None,
            Self::Identifier {
                prefix,
                version,
                suffix,
            } => {
                if prefix.is_absent() && version.is_absent() && suffix.is_absent() {
                    None
                } else {
                    Some((prefix, *version, suffix))
                }
            }
        }
    }

    /// Whether there is no prerelease tag.
    pub fn is_none(&self) -> bool {
        self.parts().is_none()
    }

    /// Whether there is a prerelease tag.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// The text before the numeric version.
    pub fn prefix(&self) -> &PrereleaseName {
        self.parts().map(|(prefix, _, _)| prefix).unwrap_or(&ABSENT_NAME)
    }

    /// The numeric version.
    pub fn version(&self) -> PrereleaseVersion {
        self.parts()
            .map(|(_, version, _)| version)
            .unwrap_or_default()
    }

    /// The text after the numeric version.
    pub fn suffix(&self) -> &PrereleaseName {
        self.parts().map(|(_, _, suffix)| suffix).unwrap_or(&ABSENT_NAME)
    }

    /// The tag with its numeric version incremented; an absent version becomes `0`.
    ///
    /// [`Prerelease::None`] has no successor tag and is returned unchanged.
    pub fn next(&self) -> Self {
        match self.parts() {
            None => Self::None,
            Some((prefix, version, suffix)) => {
                let version = match version {
                    PrereleaseVersion::Absent => 0,
                    PrereleaseVersion::Numbered(n) => n.saturating_add(1),
                };
                Self::of(prefix.clone(), version, suffix.clone())
            }
        }
    }

    /// Compare two tags, reporting which part decided the result.
    ///
    /// ```
    /// # use relaxed_semver::{Prerelease, PrereleaseOrdering};
    /// let left = Prerelease::parse("M6.beta.13.nightly")?;
    /// let right = Prerelease::parse("M6.beta.9.nightly")?;
    /// assert_eq!(left.compare(&right), PrereleaseOrdering::GreaterVersion);
    /// assert_eq!(Prerelease::None.compare(&right), PrereleaseOrdering::Greater);
    /// # Ok::<(), relaxed_semver::Error>(())
    /// ```
    pub fn compare(&self, other: &Self) -> PrereleaseOrdering {
        use PrereleaseOrdering::*;

        let ((lp, lv, ls), (rp, rv, rs)) = match (self.parts(), other.parts()) {
            (None, None) => return Equal,
            (None, Some(_)) => return Greater,
            (Some(_), None) => return Lower,
            (Some(left), Some(right)) => (left, right),
        };

        match (lp.cmp(rp), lv.cmp(&rv), ls.cmp(rs)) {
            (Ordering::Less, _, _) => LowerPrefix,
            (Ordering::Greater, _, _) => GreaterPrefix,
            (_, Ordering::Less, _) => LowerVersion,
            (_, Ordering::Greater, _) => GreaterVersion,
            (_, _, Ordering::Less) => LowerSuffix,
            (_, _, Ordering::Greater) => GreaterSuffix,
            _ => Equal,
        }
    }
}

/// The result of comparing two [`Prerelease`] tags.
///
/// Variants are ordered from "far below" to "far above":
/// `Lower` and `Greater` mean one side has no tag at all,
/// the others name the part of the tag that differed first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Assoc)]
#[func(const fn sign(&self) -> Ordering)]
pub enum PrereleaseOrdering {
    /// The left side has a tag and the right side does not.
    #[assoc(sign = Ordering::Less)]
    Lower,

    /// The prefixes differ, with the left side lower.
    #[assoc(sign = Ordering::Less)]
    LowerPrefix,

    /// The versions differ, with the left side lower.
    #[assoc(sign = Ordering::Less)]
    LowerVersion,

    /// The suffixes differ, with the left side lower.
    #[assoc(sign = Ordering::Less)]
    LowerSuffix,

    /// The tags are the same.
    #[assoc(sign = Ordering::Equal)]
    Equal,

    /// The suffixes differ, with the left side greater.
    #[assoc(sign = Ordering::Greater)]
    GreaterSuffix,

    /// The versions differ, with the left side greater.
    #[assoc(sign = Ordering::Greater)]
    GreaterVersion,

    /// The prefixes differ, with the left side greater.
    #[assoc(sign = Ordering::Greater)]
    GreaterPrefix,

    /// The right side has a tag and the left side does not.
    #[assoc(sign = Ordering::Greater)]
    Greater,
}

impl PrereleaseOrdering {
    /// Collapse to a plain [`Ordering`].
    pub const fn ordering(&self) -> Ordering {
        self.sign()
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((prefix, version, suffix)) = self.parts() else {
            return Ok(());
        };

        let version = version.to_compact_string();
        let rendered = [prefix.as_str(), version.as_str(), suffix.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&rendered)
    }
}

impl PartialEq for Prerelease {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

impl Eq for Prerelease {}

impl Hash for Prerelease {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts().hash(state);
    }
}

impl Ord for Prerelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).ordering()
    }
}

impl PartialOrd for Prerelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Prerelease {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Prerelease {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Prerelease {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for Prerelease {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Prerelease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Prerelease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Prerelease {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("beta.2"), json!("rc.1"), json!("M6.beta.13.nightly")])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Prerelease {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Prerelease")
    }
}
