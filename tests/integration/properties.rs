//! Properties that hold for every query

use holocron_engine::EngineConfig;
use holocron_foundation::{EntityKind, Value};
use holocron_language::{QueryRequest, Selection};
use holocron_runtime::Session;
use holocron_storage::schema::{self, FieldKind};
use proptest::prelude::*;

/// Selects every field of `kind`, with `id` under each relation.
fn select_everything(kind: EntityKind) -> QueryRequest {
    schema::fields(kind)
        .iter()
        .fold(QueryRequest::new(kind.collection()), |request, def| {
            let field = match def.kind {
                FieldKind::Relation(_) => Selection::field(def.name).with_field(Selection::field("id")),
                _ => Selection::field(def.name),
            };
            request.with_field(field)
        })
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn every_field_has_its_declared_type() {
    let session = Session::bundled().unwrap();
    for kind in EntityKind::ALL {
        let result = session.run(&select_everything(kind)).unwrap();
        let objects = result.as_list().unwrap();
        assert_eq!(objects.len(), session.repository().len(kind));
        for object in objects {
            let declared: Vec<_> = schema::fields(kind).iter().map(|d| d.name).collect();
            assert_eq!(object.keys(), declared, "{kind}");
            for def in schema::fields(kind) {
                let value = object.get(def.name).unwrap();
                assert!(
                    def.ty.accepts(value, def.nullable),
                    "{kind}.{} = {value:?} is not {:?}",
                    def.name,
                    def.ty
                );
            }
        }
    }
}

#[test]
fn only_declared_nullables_are_null() {
    let session = Session::bundled().unwrap();
    let result = session.query("people { id name films { id } }").unwrap();
    for person in result.get("people").unwrap().as_list().unwrap() {
        assert!(!person.get("id").unwrap().is_null());
        assert!(!person.get("films").unwrap().is_null());
    }
}

// =============================================================================
// Determinism
// =============================================================================

const REPORT: &str = r#"{
    films { title characters { name homeworld { name diameter(unit: MILE) } } }
    people(name: "a") { name mass(unit: POUND) species { name } vehicles { name } }
}"#;

#[test]
fn repeated_queries_are_byte_identical() {
    let session = Session::bundled().unwrap();
    let first = session.query_json(REPORT, false).unwrap();
    for _ in 0..3 {
        assert_eq!(session.query_json(REPORT, false).unwrap(), first);
    }
}

#[test]
fn memoization_is_invisible() {
    let memo = Session::bundled().unwrap();
    let plain = memo.clone().with_config(EngineConfig::default().with_memoize(false));
    assert_eq!(
        memo.query_json(REPORT, false).unwrap(),
        plain.query_json(REPORT, false).unwrap()
    );
}

#[test]
fn pretty_and_compact_agree() {
    let session = Session::bundled().unwrap();
    let compact: serde_json::Value =
        serde_json::from_str(&session.query_json(REPORT, false).unwrap()).unwrap();
    let pretty: serde_json::Value =
        serde_json::from_str(&session.query_json(REPORT, true).unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

const PERSON_FIELDS: [&str; 8] = [
    "name", "height", "mass", "birthYear", "gender", "id", "createdAt", "editedAt",
];

proptest! {
    #[test]
    fn output_keys_follow_request_order(
        picked in prop::sample::subsequence(PERSON_FIELDS.to_vec(), 1..=PERSON_FIELDS.len())
            .prop_shuffle(),
    ) {
        let session = Session::bundled().unwrap();
        let request = QueryRequest::new("person")
            .with_argument("id", 1i64)
            .with_fields(picked.iter().copied());
        let result = session.run(&request).unwrap();
        prop_assert_eq!(result.keys(), picked);
    }

    #[test]
    fn filters_never_grow_the_result(needle in "[a-z]{0,3}") {
        let session = Session::bundled().unwrap();
        let all = session.query("people { id }").unwrap();
        let request = QueryRequest::new("people")
            .with_argument("name", needle.as_str())
            .with_field(Selection::field("id"));
        let filtered = session.run(&request).unwrap();
        let all = all.get("people").and_then(Value::as_list).unwrap();
        let filtered = filtered.as_list().unwrap();
        prop_assert!(filtered.len() <= all.len());
        prop_assert!(filtered.iter().all(|v| all.contains(v)));
    }
}
