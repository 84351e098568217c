//! Integration tests for Value and EntityId

use chrono::{TimeZone, Utc};
use holocron_foundation::{EntityId, EntityKind, Type, Value};

// =============================================================================
// Global Ids
// =============================================================================

#[test]
fn global_id_encodes_collection_and_number() {
    let luke = EntityId::new(EntityKind::Person, 1);
    assert_eq!(luke.global_id(), "cGVvcGxlOjE=");
    assert_eq!(EntityId::from_global_id("cGVvcGxlOjE="), Some(luke));
}

#[test]
fn global_ids_are_distinct_across_kinds() {
    let ids: Vec<_> = EntityKind::ALL
        .into_iter()
        .map(|kind| EntityId::new(kind, 1).global_id())
        .collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn malformed_global_ids_are_rejected() {
    for bad in ["", "not base64!", "cGVvcGxl", "ZHJvaWRzOjE="] {
        assert_eq!(EntityId::from_global_id(bad), None, "{bad}");
    }
}

#[test]
fn designators_select_kinds() {
    assert_eq!(EntityKind::from_designator("Film"), Some(EntityKind::Film));
    assert_eq!(EntityKind::from_designator("species"), Some(EntityKind::Species));
    assert_eq!(EntityKind::from_designator("allStarships"), Some(EntityKind::Starship));
    assert_eq!(EntityKind::from_designator("droids"), None);
}

// =============================================================================
// JSON Rendering
// =============================================================================

#[test]
fn values_render_as_json() {
    let value = Value::object([
        ("id", Value::from(EntityId::new(EntityKind::Person, 1))),
        ("name", Value::from("Luke Skywalker")),
        ("height", Value::Float(1.72)),
        ("homeworld", Value::Null),
        ("films", Value::list([])),
        (
            "created",
            Value::from(Utc.with_ymd_and_hms(2014, 12, 9, 13, 50, 51).unwrap()),
        ),
    ]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"id":"cGVvcGxlOjE=","name":"Luke Skywalker","height":1.72,"homeworld":null,"films":[],"created":"2014-12-09T13:50:51Z"}"#
    );
}

#[test]
fn objects_keep_insertion_order() {
    let value = Value::object([("z", Value::Int(1)), ("a", Value::Int(2))]);
    assert_eq!(value.keys(), ["z", "a"]);
}

// =============================================================================
// Type Shapes
// =============================================================================

#[test]
fn types_accept_matching_values() {
    assert!(Type::String.accepts(&Value::from("x"), false));
    assert!(!Type::String.accepts(&Value::Null, false));
    assert!(Type::String.accepts(&Value::Null, true));
    assert!(Type::Collection(EntityKind::Film).accepts(&Value::list([]), false));
    assert!(Type::Entity(EntityKind::Planet).accepts(&Value::Null, true));
}
