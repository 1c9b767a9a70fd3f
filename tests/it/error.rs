use assert_matches::assert_matches;
use color_eyre::{Result, eyre::Context};
use miette::Diagnostic;
use pretty_assertions::assert_eq;

use relaxed_semver::*;

#[test]
fn error_wrappable_context() -> Result<()> {
    const INPUT: &str = "1.2.3-beta.4+exp.sha.5114f85";

    let parsed = Version::parse(INPUT).context("can wrap")?;
    assert_eq!(parsed, version!(parse => INPUT));

    let parsed = Version::parse_any("1.2.x").context("can wrap")?;
    assert!(parsed.is_wildcard());

    let parsed = Range::parse("^1.2.3 || 2.x").context("can wrap")?;
    assert!(parsed.satisfied_by(&version!(2, 9, 0)));

    let parsed = Prerelease::parse("beta.4").context("can wrap")?;
    assert_eq!(parsed, Prerelease::of("beta", 4, PrereleaseName::Absent));

    Ok(())
}

#[test]
fn error_wrappable_withcontext() -> Result<()> {
    const INPUT: &str = "~1.2";

    let parsed = Range::parse(INPUT).with_context(|| "can wrap")?;
    assert_eq!(parsed, range!(INPUT));

    let parsed = WildcardVersion::parse("1.2.*").with_context(|| "can wrap")?;
    assert_eq!(parsed.to_string(), "1.2.*");

    Ok(())
}

#[test]
fn error_context_reports_failure() {
    let err = Version::parse("1.2.3-").context("parse version").expect_err("must fail");
    assert_eq!(err.to_string(), "parse version");
    assert!(
        err.chain()
            .any(|cause| cause.to_string().contains("did not match required syntax"))
    );
}

#[test]
fn syntax_error_points_at_failure() {
    let err = Version::parse("1.2.3?").expect_err("must fail");
    let Error::Parse(ParseError::Syntax { span, input, .. }) = &err else {
        panic!("must be a syntax error");
    };
    assert_eq!(input, "1.2.3?");
    assert_eq!(span.offset(), 5);
    assert!(err.labels().is_some());
}

#[test]
fn field_error_names_field() {
    let err = Range::parse(">=1.99999999999999999999999.0").expect_err("must fail");
    let Error::Parse(ParseError::Field { field, span, .. }) = &err else {
        panic!("must be a field error");
    };
    assert_eq!(field, "minor");
    assert_eq!(span.offset(), 4);
    assert_eq!(span.len(), 23);
}

#[test]
fn field_error_points_at_failing_occurrence() {
    let nines = "9".repeat(23);
    let input = format!("1.0.0-a{nines}.{nines}");
    let err = Version::parse(&input).expect_err("must fail");
    let Error::Parse(ParseError::Field { field, span, .. }) = &err else {
        panic!("must be a field error");
    };
    assert_eq!(field, "prerelease");
    assert_eq!(span.offset(), 31);
    assert_eq!(span.len(), 23);
}

#[test]
fn empty_inputs() {
    assert_matches!(Version::parse(""), Err(Error::Parse(ParseError::Empty)));
    assert_matches!(WildcardVersion::parse(""), Err(Error::Parse(ParseError::Empty)));
    assert_matches!(Range::parse(" "), Err(Error::Parse(ParseError::Empty)));
}

#[test]
fn invalid_arguments() {
    assert_matches!(
        VersionComponent::try_from(-4i64),
        Err(Error::InvalidArgument(InvalidArgumentError::Negative(-4)))
    );
    assert_matches!(
        WildcardVersion::new(1, VersionComponent::Wildcard, 7u64),
        Err(Error::InvalidArgument(InvalidArgumentError::WildcardPatch { major: 1, patch: 7, .. }))
    );
    assert_matches!(
        WildcardVersion::new(1, VersionComponent::Absent, VersionComponent::Wildcard),
        Err(Error::InvalidArgument(InvalidArgumentError::AbsentBeforePresent { component: "patch" }))
    );
    assert_matches!(
        semver::Version::try_from(version!(parse => "1.x")),
        Err(Error::InvalidArgument(InvalidArgumentError::Wildcard(_)))
    );
}

#[test]
fn semver_conversion_keeps_prerelease_errors() {
    let parsed = semver::Version::parse("1.0.0-alpha.99999999999999999999999").expect("must parse");
    assert_matches!(
        Version::try_from(parsed),
        Err(Error::Parse(ParseError::Field { field, .. })) if field == "prerelease"
    );

    let parsed = semver::Version::parse("1.0.0-alpha.9").expect("must parse");
    let converted = Version::try_from(parsed).expect("must convert");
    assert!(converted.is_prerelease());
}

#[test]
fn invalid_argument_messages() {
    let err = WildcardVersion::new(1, 2u64, 3u64).expect_err("must fail");
    assert_eq!(
        err.to_string(),
        "wildcard version '1.2.3' must not have a concrete patch"
    );
}
