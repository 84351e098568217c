//! Integration tests for the query parser

use holocron_foundation::ErrorKind;
use holocron_language::{ArgValue, MAX_NESTING, QueryRequest, Selection, parse, parse_one};
use proptest::prelude::*;

// =============================================================================
// Text and Builder Agree
// =============================================================================

#[test]
fn text_matches_builder() {
    let parsed = parse_one(
        r#"luke: people(name: "Luke") {
            name
            tall: height(unit: METER)
            homeworld { name diameter(unit: MILE) }
        }"#,
    )
    .unwrap();

    let built = QueryRequest::new("people")
        .with_alias("luke")
        .with_argument("name", "Luke")
        .with_field(Selection::field("name"))
        .with_field(
            Selection::field("height")
                .with_alias("tall")
                .with_argument("unit", ArgValue::enumeration("METER")),
        )
        .with_field(
            Selection::field("homeworld").with_field(Selection::field("name")).with_field(
                Selection::field("diameter").with_argument("unit", ArgValue::enumeration("MILE")),
            ),
        );

    assert_eq!(parsed, built);
}

#[test]
fn braced_and_bare_documents_agree() {
    let bare = parse("people { name } films { title }").unwrap();
    let braced = parse("{ people { name } films { title } }").unwrap();
    assert_eq!(bare, braced);
    assert_eq!(bare.len(), 2);
}

#[test]
fn repeated_roots_are_kept_for_the_compiler() {
    // Duplicate response keys are a validation concern, not a syntax one.
    let roots = parse("{ people { name } people { name } }").unwrap();
    assert_eq!(roots[0].response_key(), roots[1].response_key());
}

#[test]
fn unknown_names_parse() {
    let root = parse_one("droids(model: \"R2\") { beeps(unit: FURLONG) }").unwrap();
    assert_eq!(root.root, "droids");
    assert_eq!(
        root.selection[0].argument("unit").and_then(ArgValue::as_text),
        Some("FURLONG")
    );
}

#[test]
fn string_escapes() {
    let root = parse_one(r#"people(name: "a \"quoted\" \\ name") { name }"#).unwrap();
    assert_eq!(root.argument("name").and_then(ArgValue::as_text), Some(r#"a "quoted" \ name"#));
}

// =============================================================================
// Errors
// =============================================================================

fn error_position(source: &str) -> (u32, u32) {
    match parse(source).unwrap_err().kind {
        ErrorKind::ParseError { line, column, .. } => (line, column),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn errors_point_at_the_offending_token() {
    assert_eq!(error_position("people { name ) }"), (1, 15));
    assert_eq!(error_position("people {\n  height(unit: )\n}"), (2, 16));
}

#[test]
fn empty_input_is_an_error() {
    assert!(parse("").is_err());
    assert!(parse("   # only a comment").is_err());
    assert!(parse("{ }").is_err());
}

#[test]
fn parse_errors_are_not_validation_errors() {
    assert!(!parse("people {").unwrap_err().is_validation());
}

fn nested(levels: usize) -> String {
    format!(
        "people {{ {}name{}",
        "homeworld { residents { ".repeat(levels / 2),
        " } }".repeat(levels / 2) + " }"
    )
}

#[test]
fn runaway_nesting_is_a_parse_error() {
    let err = parse(&nested(10_000)).unwrap_err();
    assert!(
        matches!(&err.kind, ErrorKind::ParseError { message, .. } if message.contains("nested")),
        "{err:?}"
    );
}

#[test]
fn nesting_ceiling_leaves_room_for_real_queries() {
    assert!(parse(&nested(MAX_NESTING - 2)).is_ok());
    assert!(parse(&nested(MAX_NESTING)).is_err());
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(source in "[a-z{}():,\"#A-Z0-9 \n.-]{0,40}") {
        let _ = parse(&source);
    }

    #[test]
    fn field_lists_round_trip_through_text(
        fields in prop::collection::vec("[a-z][a-zA-Z]{0,8}", 1..6),
    ) {
        prop_assume!(!fields.iter().any(|f| matches!(f.as_str(), "true" | "false" | "null")));
        let text = format!("films {{ {} }}", fields.join(" "));
        let root = parse_one(&text).unwrap();
        let names: Vec<_> = root.selection.iter().map(|s| s.name.clone()).collect();
        prop_assert_eq!(names, fields);
    }
}
