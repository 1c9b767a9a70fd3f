//! Text grammar for versions, prerelease tags, build metadata, and range expressions.
//!
//! Parsing happens in two passes:
//! 1. `nom` parsers split the input into borrowed fragments ([`RawVersion`], [`RawRange`]).
//! 2. The fragments are converted into typed values, reporting failures
//!    (such as numeric overflow) against the exact fragment of the input that caused them.
//!
//! ```text
//! version   := number ("." number ("." number)?)? ("-" dotted)? ("+" dotted)?
//! pattern   := number ("." part ("." part)?)?        part := number | "*" | "x" | "X"
//! range     := alternative ((ws* "||" ws* | ws+) alternative)*
//! ```

use nom::{
    Finish, IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{eof, map, opt, recognize, verify},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated},
};

use crate::{
    BoundedRange, Build, CaretRange, Error, ExactRange, ExactVersion, Operator, Prerelease,
    PrimitiveRange, Range, TildeRange, Version, VersionComponent, WildcardVersion, error,
};

/// A version component as it appeared in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawComponent<'a> {
    Number(&'a str),
    Wildcard,
}

/// The fragments of a version as they appeared in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawVersion<'a> {
    major: &'a str,
    minor: Option<RawComponent<'a>>,
    patch: Option<RawComponent<'a>>,
    prerelease: Option<&'a str>,
    build: Option<&'a str>,
}

/// A single range alternative as it appeared in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawRange<'a> {
    Hyphen(RawVersion<'a>, RawVersion<'a>),
    Caret { pinned: bool, version: RawVersion<'a> },
    Tilde { pinned: bool, version: RawVersion<'a> },
    Primitive(&'a str, RawVersion<'a>),
    Any,
    Plain(RawVersion<'a>),
}

impl RawVersion<'_> {
    fn components(&self) -> [Option<RawComponent<'_>>; 2] {
        [self.minor, self.patch]
    }

    /// Whether the version specifies all three components as numbers.
    fn is_triple(&self) -> bool {
        self.components()
            .iter()
            .all(|c| matches!(c, Some(RawComponent::Number(_))))
    }

    /// Full triples and versions with prerelease or build are exact;
    /// anything shorter is a pattern.
    pub(crate) fn into_version(self, input: &str) -> Result<Version, Error> {
        if self.is_triple() || self.prerelease.is_some() || self.build.is_some() {
            self.into_exact(input).map(Version::Exact)
        } else {
            self.into_wildcard(input).map(Version::Wildcard)
        }
    }

    pub(crate) fn into_exact(self, input: &str) -> Result<ExactVersion, Error> {
        let prerelease = match self.prerelease {
            Some(dotted) => Prerelease::from_dotted(input, dotted)?,
            None => Prerelease::None,
        };
        ExactVersion::builder()
            .major(number(input, "major", self.major)?)
            .maybe_minor(component(input, "minor", self.minor)?.number())
            .maybe_patch(component(input, "patch", self.patch)?.number())
            .prerelease(prerelease)
            .metadata(self.build.map(Build::of).unwrap_or_default())
            .build()
    }

    pub(crate) fn into_wildcard(self, input: &str) -> Result<WildcardVersion, Error> {
        WildcardVersion::new(
            number(input, "major", self.major)?,
            component(input, "minor", self.minor)?,
            component(input, "patch", self.patch)?,
        )
    }
}

impl RawRange<'_> {
    pub(crate) fn into_range(self, input: &str) -> Result<Range, Error> {
        Ok(match self {
            RawRange::Hyphen(lower, upper) => Range::Bounded(BoundedRange::new(
                lower.into_version(input)?,
                upper.into_version(input)?,
            )),
            RawRange::Caret {
                pinned: true,
                version,
            }
            | RawRange::Tilde {
                pinned: true,
                version,
            } => Range::Exact(ExactRange::new(version.into_version(input)?)),
            RawRange::Caret { version, .. } => {
                Range::Caret(CaretRange::new(version.into_version(input)?))
            }
            RawRange::Tilde { version, .. } => {
                Range::Tilde(TildeRange::new(version.into_version(input)?))
            }
            RawRange::Primitive(operator, version) => {
                let operator = operator.parse::<Operator>().map_err(|err| {
                    error::field!(input, "operator" => error::span(input, operator), err)
                })?;
                Range::Primitive(PrimitiveRange::new(operator, version.into_version(input)?))
            }
            RawRange::Any => Range::Primitive(PrimitiveRange::new(
                Operator::GreaterOrEqual,
                Version::new_semver(0, 0, 0),
            )),
            RawRange::Plain(version) => match version.into_version(input)? {
                exact @ Version::Exact(_) => Range::Exact(ExactRange::new(exact)),
                pattern @ Version::Wildcard(_) => {
                    Range::Bounded(BoundedRange::new(pattern.clone(), pattern))
                }
            },
        })
    }
}

/// Run `parser` over the whole of `input`, reporting failures as syntax errors.
pub(crate) fn complete<'a, O, P>(input: &'a str, parser: P) -> Result<O, Error>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    match terminated(parser, eof).parse_complete(input).finish() {
        Ok((_, output)) => Ok(output),
        Err(err) => {
            let offset = input.len().saturating_sub(err.input.len());
            let span = (offset, err.input.len());
            error::fatal!(error::syntax!(input => span, err.cloned()))
        }
    }
}

fn number(input: &str, field: &'static str, fragment: &str) -> Result<u64, Error> {
    fragment.parse::<u64>().map_err(|err| {
        Error::from(error::field!(input, field => error::span(input, fragment), err))
    })
}

fn component(
    input: &str,
    field: &'static str,
    raw: Option<RawComponent<'_>>,
) -> Result<VersionComponent, Error> {
    Ok(match raw {
        None => VersionComponent::Absent,
        Some(RawComponent::Wildcard) => VersionComponent::Wildcard,
        Some(RawComponent::Number(n)) => VersionComponent::Number(number(input, field, n)?),
    })
}

fn segment(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-').parse(input)
}

/// One or more segments separated by `.`.
pub(crate) fn dotted(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), segment)).parse(input)
}

fn wildcard(input: &str) -> IResult<&str, char> {
    one_of("*xX").parse(input)
}

fn part(input: &str) -> IResult<&str, RawComponent<'_>> {
    alt((
        map(digit1, RawComponent::Number),
        map(wildcard, |_| RawComponent::Wildcard),
    ))
    .parse(input)
}

/// `major[.minor[.patch]]`, where `part` parses minor and patch.
fn release<'a, F>(mut part: F, input: &'a str) -> IResult<&'a str, RawVersion<'a>>
where
    F: Parser<&'a str, Output = RawComponent<'a>, Error = nom::error::Error<&'a str>>,
{
    let (input, major) = digit1(input)?;
    let (input, minor) = opt(preceded(char('.'), |i: &'a str| part.parse(i))).parse(input)?;
    let (input, patch) = match minor {
        Some(_) => opt(preceded(char('.'), |i: &'a str| part.parse(i))).parse(input)?,
        None => (input, None),
    };
    let version = RawVersion {
        major,
        minor,
        patch,
        prerelease: None,
        build: None,
    };
    Ok((input, version))
}

/// A version with numeric components, optionally followed by prerelease and build.
pub(crate) fn version(input: &str) -> IResult<&str, RawVersion<'_>> {
    let (input, release) = release(map(digit1, RawComponent::Number), input)?;
    let (input, prerelease) = opt(preceded(char('-'), dotted)).parse(input)?;
    let (input, build) = opt(preceded(char('+'), dotted)).parse(input)?;
    let version = RawVersion {
        prerelease,
        build,
        ..release
    };
    Ok((input, version))
}

/// A partial version whose minor and patch may be wildcards.
pub(crate) fn pattern(input: &str) -> IResult<&str, RawVersion<'_>> {
    release(part, input)
}

/// Either form accepted by [`Version::parse_any`].
pub(crate) fn any_version(input: &str) -> IResult<&str, RawVersion<'_>> {
    alt((terminated(version, eof), terminated(pattern, eof))).parse(input)
}

/// A version as it appears inside a range:
/// full numeric triples may carry prerelease and build, partial versions may not.
fn range_version<'a>(input: &'a str) -> IResult<&'a str, RawVersion<'a>> {
    alt((verify(version, |v: &RawVersion<'a>| v.is_triple()), pattern)).parse(input)
}

fn hyphen<'a>(input: &'a str) -> IResult<&'a str, RawRange<'a>> {
    let spaced = (
        range_version,
        delimited(multispace1, char('-'), multispace1),
        range_version,
    );
    let tight = (
        verify(pattern, |v: &RawVersion<'a>| !v.is_triple()),
        delimited(multispace0, char('-'), multispace0),
        range_version,
    );
    alt((spaced, tight))
        .map(|(lower, _, upper)| RawRange::Hyphen(lower, upper))
        .parse(input)
}

fn caret(input: &str) -> IResult<&str, RawRange<'_>> {
    preceded(
        char('^'),
        (opt(char('=')), preceded(multispace0, range_version)),
    )
    .map(|(pin, version)| RawRange::Caret {
        pinned: pin.is_some(),
        version,
    })
    .parse(input)
}

fn tilde(input: &str) -> IResult<&str, RawRange<'_>> {
    preceded(
        alt((tag("~>"), tag("~"))),
        (opt(char('=')), preceded(multispace0, range_version)),
    )
    .map(|(pin, version)| RawRange::Tilde {
        pinned: pin.is_some(),
        version,
    })
    .parse(input)
}

fn operator(input: &str) -> IResult<&str, &str> {
    alt((tag("<="), tag(">="), tag("<"), tag(">"), tag("="))).parse(input)
}

fn primitive(input: &str) -> IResult<&str, RawRange<'_>> {
    (operator, preceded(multispace0, range_version))
        .map(|(operator, version)| RawRange::Primitive(operator, version))
        .parse(input)
}

fn any(input: &str) -> IResult<&str, RawRange<'_>> {
    (
        opt(alt((tag(">="), tag("<="), tag("=")))),
        wildcard,
        many0(preceded(char('.'), wildcard)),
    )
        .map(|_| RawRange::Any)
        .parse(input)
}

fn alternative(input: &str) -> IResult<&str, RawRange<'_>> {
    alt((
        hyphen,
        caret,
        tilde,
        primitive,
        any,
        range_version.map(RawRange::Plain),
    ))
    .parse(input)
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((delimited(multispace0, tag("||"), multispace0), multispace1)).parse(input)
}

/// Alternatives joined by `||` or whitespace.
pub(crate) fn range(input: &str) -> IResult<&str, Vec<RawRange<'_>>> {
    separated_list1(separator, alternative).parse(input)
}
