use std::{hash::Hash, str::FromStr};

use assert_matches::assert_matches;
use impls::impls;
use itertools::Itertools;
use proptest::prelude::*;
use simple_test_case::test_case;
use static_assertions::const_assert;

use relaxed_semver::*;

/// Tags whose rendering reproduces the input.
const CANONICAL_PRERELEASE: &str = r"[a-zA-Z][a-zA-Z0-9]{0,5}(\.[a-zA-Z][a-zA-Z0-9]{0,5}){0,2}(\.(0|[1-9][0-9]{0,4})(\.[a-zA-Z][a-zA-Z0-9]{0,5}){0,2})?";

#[test]
fn trait_impls() {
    const_assert!(impls!(Prerelease: FromStr));
    const_assert!(impls!(Prerelease: TryFrom<&'static str>));
    const_assert!(impls!(Prerelease: Ord & Hash & Default));
    const_assert!(impls!(Prerelease: serde::Serialize));
    const_assert!(impls!(Build: FromStr & Ord & Default));
    const_assert!(impls!(PrereleaseName: From<&'static str>));
    const_assert!(impls!(PrereleaseVersion: From<u64> & Copy));
}

#[test_case("1.1.1-beta.nightly.14.unstable.untested", Prerelease::of("beta.nightly", 14, "unstable.untested"); "full")]
#[test_case("1.1.1-beta.M2.3", Prerelease::of("beta.M2", 3, PrereleaseName::Absent); "no_suffix")]
#[test_case("1.1.1-23.M13.unstable", Prerelease::of(PrereleaseName::Absent, 23, "M13.unstable"); "no_prefix")]
#[test_case("1.1.1-42", Prerelease::of(PrereleaseName::Absent, 42, PrereleaseName::Absent); "version_only")]
#[test_case("1.1.1-3.5.beta", Prerelease::of("3", 5, "beta"); "multiple_versions")]
#[test_case("1.1.1-alpha", Prerelease::of("alpha", PrereleaseVersion::Absent, PrereleaseName::Absent); "name_only")]
#[test]
fn parse_in_version(input: &str, expected: Prerelease) {
    let parsed = Version::parse(input).expect("must parse version");
    pretty_assertions::assert_eq!(parsed.prerelease(), &expected);
}

#[test]
fn parse_empty_is_none() {
    pretty_assertions::assert_eq!(Prerelease::parse("").expect("must parse"), Prerelease::None);
    pretty_assertions::assert_eq!(Prerelease::parse("  ").expect("must parse"), Prerelease::None);
    pretty_assertions::assert_eq!(Build::parse("").expect("must parse"), Build::None);
}

#[test]
fn parse_overflow() {
    let parsed = Prerelease::parse("beta.99999999999999999999");
    assert_matches!(parsed, Err(Error::Parse(ParseError::Field { field, .. })) if field == "prerelease");
}

#[test_case("beta..1"; "empty_segment")]
#[test_case("beta 1"; "space")]
#[test_case("rc+1"; "plus")]
#[test]
fn parse_invalid(input: &str) {
    assert_matches!(Prerelease::parse(input), Err(Error::Parse(ParseError::Syntax { .. })));
}

#[test]
fn precedence_over_release() {
    for tag in ["alpha", "beta.2", "0", "rc.1.final", "zzzzzz.999"] {
        let prerelease = version!(parse => &format!("1.0.0-{tag}"));
        let release = version!(1, 0, 0);
        assert!(prerelease < release, "{prerelease} < {release}");
        pretty_assertions::assert_eq!(prerelease.compare(&release), VersionOrdering::LowerPrerelease);
    }
}

#[test]
fn sort_tags() {
    let sorted = ["rc.1", "beta.11", "alpha", "beta.2", "", "alpha.1", "2.alpha", "beta"]
        .into_iter()
        .map(|tag| Prerelease::parse(tag).expect("must parse"))
        .sorted()
        .map(|tag| tag.to_string())
        .collect_vec();

    pretty_assertions::assert_eq!(
        sorted,
        vec!["2.alpha", "alpha", "alpha.1", "beta", "beta.2", "beta.11", "rc.1", ""]
    );
}

#[test_case("M6.beta.13.nightly", "M6.beta.9.nightly", PrereleaseOrdering::GreaterVersion; "version")]
#[test_case("M5.beta.13.nightly", "M6.beta.13.nightly", PrereleaseOrdering::LowerPrefix; "prefix")]
#[test_case("M4.beta.13.nightly", "M4.beta.13.stable", PrereleaseOrdering::LowerSuffix; "suffix")]
#[test_case("beta.9.nightly", "alpha.10.stable", PrereleaseOrdering::GreaterPrefix; "prefix_first")]
#[test_case("beta.9.zeta", "beta.10.alpha", PrereleaseOrdering::LowerVersion; "version_before_suffix")]
#[test]
fn compare(left: &str, right: &str, expected: PrereleaseOrdering) {
    let left = left.parse::<Prerelease>().expect("must parse left");
    let right = right.parse::<Prerelease>().expect("must parse right");
    pretty_assertions::assert_eq!(left.compare(&right), expected);
    pretty_assertions::assert_eq!(left.cmp(&right), expected.ordering());
}

#[test]
fn ordering_variants_are_ordered() {
    let variants = [
        PrereleaseOrdering::Lower,
        PrereleaseOrdering::LowerPrefix,
        PrereleaseOrdering::LowerVersion,
        PrereleaseOrdering::LowerSuffix,
        PrereleaseOrdering::Equal,
        PrereleaseOrdering::GreaterSuffix,
        PrereleaseOrdering::GreaterVersion,
        PrereleaseOrdering::GreaterPrefix,
        PrereleaseOrdering::Greater,
    ];
    assert!(variants.iter().tuple_windows().all(|(a, b)| a < b));
}

#[test]
fn build_ordering() {
    let sorted = ["b", "", "a.2", "a.10"]
        .into_iter()
        .map(|b| Build::parse(b).expect("must parse"))
        .sorted()
        .map(|b| b.to_string())
        .collect_vec();
    pretty_assertions::assert_eq!(sorted, vec!["", "a.10", "a.2", "b"]);
}

proptest! {
    #[test]
    fn canonical_roundtrip(input in CANONICAL_PRERELEASE) {
        let parsed = Prerelease::parse(&input).expect("must parse");
        prop_assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn next_is_greater(input in CANONICAL_PRERELEASE) {
        let parsed = Prerelease::parse(&input).expect("must parse");
        prop_assert!(parsed.next() > parsed);
    }
}
