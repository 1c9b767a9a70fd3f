use std::str::FromStr;

use assert_matches::assert_matches;
use impls::impls;
use itertools::Itertools;
use proptest::prelude::*;
use simple_test_case::test_case;
use static_assertions::const_assert;

use relaxed_semver::*;

/// Canonical versions: rendering them reproduces the input.
const CANONICAL_VERSION: &str = r"(0|[1-9][0-9]{0,5})\.(0|[1-9][0-9]{0,5})\.(0|[1-9][0-9]{0,5})(-[a-zA-Z][a-zA-Z0-9]{0,5}(\.(0|[1-9][0-9]{0,3}))?)?(\+[a-zA-Z0-9]{1,8})?";

/// Versions of any supported shape, including partial ones.
const ANY_VERSION: &str = r"(0|[1-9][0-9]{0,3})(\.(0|[1-9][0-9]{0,3})(\.(0|[1-9][0-9]{0,3}))?)?(-(alpha|beta|rc)(\.[0-9]{1,2})?)?";

#[test]
fn trait_impls() {
    const_assert!(impls!(Version: FromStr));
    const_assert!(impls!(Version: TryFrom<&'static str>));
    const_assert!(impls!(Version: TryFrom<String>));
    const_assert!(impls!(Version: From<ExactVersion>));
    const_assert!(impls!(Version: From<WildcardVersion>));
    const_assert!(impls!(Version: From<&'static Version>));
    const_assert!(impls!(Version: TryFrom<semver::Version>));
    const_assert!(impls!(Version: Ord));
    const_assert!(impls!(Version: serde::Serialize));
    const_assert!(impls!(Version: Send & Sync));
    const_assert!(impls!(WildcardVersion: FromStr & Copy));
    const_assert!(impls!(semver::Version: TryFrom<Version>));
    const_assert!(impls!(VersionComponent: !Ord));
}

#[test]
fn parse_using_fromstr() {
    let input = "1.2.3-beta.4+exp.sha.5114f85";
    let parsed = input.parse::<Version>().expect("must parse version");
    pretty_assertions::assert_eq!(parsed.to_string(), input);
    pretty_assertions::assert_eq!(parsed.major(), VersionComponent::Number(1));
    pretty_assertions::assert_eq!(parsed.minor(), VersionComponent::Number(2));
    pretty_assertions::assert_eq!(parsed.patch(), VersionComponent::Number(3));
    pretty_assertions::assert_eq!(parsed.prerelease(), &Prerelease::of("beta", 4, PrereleaseName::Absent));
    pretty_assertions::assert_eq!(parsed.build(), &Build::of("exp.sha.5114f85"));
}

#[test_case("1.2.3", false; "triple")]
#[test_case("1.2", true; "partial")]
#[test_case("3", true; "major")]
#[test_case("1.2-beta", false; "partial_prerelease")]
#[test_case("1+42", false; "major_build")]
#[test_case("1.2.x", true; "patch_wildcard")]
#[test_case("1.X", true; "minor_wildcard")]
#[test]
fn parse_any_shapes(input: &str, wildcard: bool) {
    let parsed = Version::parse_any(input).expect("must parse version");
    pretty_assertions::assert_eq!(parsed.is_wildcard(), wildcard);
    pretty_assertions::assert_eq!(parsed.to_string(), input.replace(['x', 'X'], "*"));
}

#[test_case("1.2", "1.2"; "partial")]
#[test_case("3", "3"; "major")]
#[test_case(" 1.2.3 ", "1.2.3"; "trimmed")]
#[test]
fn parse_exact(input: &str, expected: &str) {
    let parsed = Version::parse(input).expect("must parse version");
    assert!(!parsed.is_wildcard());
    pretty_assertions::assert_eq!(parsed.to_string(), expected);
}

#[test_case("1.2.x"; "wildcard")]
#[test_case("1..2"; "empty_component")]
#[test_case("v1.2.3"; "prefixed")]
#[test_case("1.2.3.4"; "four_components")]
#[test_case("1.2.3-"; "empty_prerelease")]
#[test_case("1.2.3+"; "empty_build")]
#[test_case("-1.2.3"; "negative")]
#[test]
fn parse_invalid(input: &str) {
    assert_matches!(Version::parse(input), Err(Error::Parse(_)));
}

#[test]
fn parse_empty() {
    assert_matches!(Version::parse(""), Err(Error::Parse(ParseError::Empty)));
    assert_matches!(Version::parse_any("  "), Err(Error::Parse(ParseError::Empty)));
}

#[test]
fn parse_overflow() {
    let parsed = Version::parse("18446744073709551616.0.0");
    assert_matches!(parsed, Err(Error::Parse(ParseError::Field { field, .. })) if field == "major");
}

#[test]
fn build_only_breaks_ties() {
    let a = version!(parse => "1.0.0+zzz");
    let b = version!(parse => "1.0.1+aaa");
    pretty_assertions::assert_eq!(a.compare(&b), VersionOrdering::Lower);

    let a = version!(parse => "1.0.0+1");
    let b = version!(parse => "1.0.0+2");
    pretty_assertions::assert_eq!(a.compare(&b), VersionOrdering::LowerBuild);
    assert_ne!(a, b);
}

#[test]
fn absent_components_sort_first() {
    let versions = ["1", "1.0", "1.0.0", "1.0.1", "1.1"]
        .into_iter()
        .map(|v| Version::parse(v).expect("must parse"))
        .collect_vec();

    for (low, high) in versions.iter().tuple_windows() {
        pretty_assertions::assert_eq!(low.compare(high), VersionOrdering::Lower, "{low} < {high}");
    }
}

#[test]
fn sort_mixed_versions() {
    let mut versions = [
        "2.0.0",
        "1.0.0-rc.1",
        "1.0.0",
        "1.0.0-beta.11",
        "1.0.0-beta.2",
        "1.0.0-alpha",
        "0.9.9",
    ]
    .into_iter()
    .map(|v| version!(parse => v))
    .collect_vec();
    versions.sort();

    let sorted = versions.iter().map(Version::to_string).collect_vec();
    pretty_assertions::assert_eq!(
        sorted,
        vec![
            "0.9.9",
            "1.0.0-alpha",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "2.0.0",
        ]
    );
}

#[test_case("1.2.3", "2.0.0"; "major")]
#[test_case("1.2", "2.0"; "partial")]
#[test_case("1", "2"; "major_only")]
#[test_case("1.2.3-rc.1+7", "2.0.0"; "drops_tags")]
#[test]
fn next_major(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(version!(parse => input).next_major().to_string(), expected);
}

#[test_case("1.2.3", "1.3.0"; "triple")]
#[test_case("1.2", "1.3"; "partial")]
#[test_case("1", "1.1"; "major_only")]
#[test]
fn next_minor(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(Version::parse(input).expect("must parse").next_minor().to_string(), expected);
}

#[test_case("1.2.3", "1.2.4"; "triple")]
#[test_case("1.2", "1.2.1"; "partial")]
#[test_case("1.2.3-beta", "1.2.3"; "prerelease")]
#[test_case("1.2.3+7", "1.2.4"; "build")]
#[test]
fn next_patch(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(Version::parse(input).expect("must parse").next_patch().to_string(), expected);
}

#[test_case("1.2.7", "2.0.0"; "major")]
#[test_case("0.4.2", "0.5.0"; "minor")]
#[test_case("0.0.3", "0.0.4"; "patch")]
#[test_case("0.0", "0.0.1"; "partial_zero")]
#[test_case("0", "0.0.1"; "zero")]
#[test]
fn next_breaking_change(input: &str, expected: &str) {
    let parsed = Version::parse(input).expect("must parse");
    pretty_assertions::assert_eq!(parsed.next_breaking_change().to_string(), expected);
}

#[test_case("1.2", "1.2.0", "1.3.0"; "partial")]
#[test_case("3", "3.0.0", "4.0.0"; "major_only")]
#[test_case("1.2.3-beta+7", "1.2.3-beta", "1.3.0"; "keeps_prerelease")]
#[test]
fn floor_ceil(input: &str, floor: &str, ceil: &str) {
    let parsed = Version::parse(input).expect("must parse");
    pretty_assertions::assert_eq!(parsed.floor().to_string(), floor);
    pretty_assertions::assert_eq!(parsed.ceil().to_string(), ceil);
}

#[test]
fn release_strips_tags() {
    let parsed = version!(parse => "1.2.3-beta.4+exp");
    pretty_assertions::assert_eq!(parsed.release(), version!(1, 2, 3));
    assert!(!parsed.release().is_prerelease());
}

#[test]
fn builder() {
    let built = ExactVersion::builder()
        .major(1)
        .minor(2)
        .patch(3)
        .prerelease(Prerelease::of("rc", 1, PrereleaseName::Absent))
        .build()
        .expect("must build");
    pretty_assertions::assert_eq!(Version::from(built), version!(parse => "1.2.3-rc.1"));

    let invalid = ExactVersion::builder().major(1).patch(3).build();
    assert_matches!(
        invalid,
        Err(Error::InvalidArgument(InvalidArgumentError::AbsentBeforePresent { component: "patch" }))
    );
}

#[test]
fn wildcard_constructor() {
    let pattern = WildcardVersion::new(1, VersionComponent::Wildcard, VersionComponent::Absent)
        .expect("must construct");
    pretty_assertions::assert_eq!(pattern.to_string(), "1.*");

    let invalid = WildcardVersion::new(1, 2u64, 3u64);
    assert_matches!(
        invalid,
        Err(Error::InvalidArgument(InvalidArgumentError::WildcardPatch { patch: 3, .. }))
    );
}

proptest! {
    #[test]
    fn canonical_roundtrip(input in CANONICAL_VERSION) {
        let parsed = Version::parse(&input).expect("must parse");
        prop_assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn compare_antisymmetric(left in ANY_VERSION, right in ANY_VERSION) {
        let left = Version::parse_any(&left).expect("must parse");
        let right = Version::parse_any(&right).expect("must parse");
        prop_assert_eq!(left.compare(&right).ordering(), right.compare(&left).ordering().reverse());
    }

    #[test]
    fn compare_transitive(a in ANY_VERSION, b in ANY_VERSION, c in ANY_VERSION) {
        let mut versions = [a, b, c].map(|v| Version::parse(&v).expect("must parse"));
        versions.sort();
        for (low, high) in versions.iter().tuple_combinations() {
            prop_assert!(low <= high, "{low} <= {high}");
        }
    }

    #[test]
    fn navigation_moves_forward(input in CANONICAL_VERSION) {
        let parsed = Version::parse(&input).expect("must parse");
        prop_assert!(parsed.next_major() > parsed);
        prop_assert!(parsed.next_minor() > parsed);
        prop_assert!(parsed.next_patch() > parsed);
        prop_assert!(parsed.next_breaking_change() > parsed);
        prop_assert!(parsed.next() > parsed);
        prop_assert!(parsed.floor() <= parsed);
    }

    #[test]
    fn serde_roundtrip(input in ANY_VERSION) {
        let parsed = Version::parse_any(&input).expect("must parse");
        let serialized = serde_json::to_string(&parsed).expect("must serialize");
        let deserialized = serde_json::from_str::<Version>(&serialized).expect("must deserialize");
        prop_assert_eq!(parsed, deserialized);
    }
}
