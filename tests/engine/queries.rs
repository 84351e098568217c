//! Integration tests for query execution

use holocron_engine::{EngineConfig, QueryCompiler, QueryExecutor};
use holocron_foundation::{Result, Value};
use holocron_language::parse;
use holocron_storage::Repository;
use holocron_storage::seed::load_bundled;

fn run(repo: &Repository, source: &str) -> Result<Value> {
    let config = EngineConfig::default();
    let document = QueryCompiler::compile_document(&parse(source)?, &config)?;
    QueryExecutor::execute_document(&document, repo, &config)
}

fn query(source: &str) -> Value {
    run(&load_bundled().unwrap(), source).unwrap()
}

fn strings(value: &Value, key: &str) -> Vec<String> {
    value
        .as_list()
        .unwrap()
        .iter()
        .map(|v| v.get(key).and_then(Value::as_str).unwrap().to_string())
        .collect()
}

fn float(value: &Value) -> f64 {
    value.as_float().unwrap()
}

// =============================================================================
// Units
// =============================================================================

#[test]
fn luke_height_in_meters() {
    let result = query(r#"people(name: "Luke") { name height(unit: METER) }"#);
    let luke = &result.get("people").unwrap().as_list().unwrap()[0];
    assert_eq!(luke.get("name").and_then(Value::as_str), Some("Luke Skywalker"));
    assert!((float(luke.get("height").unwrap()) - 1.72).abs() < 1e-9);
}

#[test]
fn default_units_match_seed_units() {
    let result = query(
        r#"{
            person(id: 1) { height mass }
            starship(id: 10) { length cargoCapacity }
            planet(id: 1) { diameter }
            species(id: 1) { averageHeight }
        }"#,
    );
    let at = |root: &str, field: &str| float(result.get(root).unwrap().get(field).unwrap());
    assert!((at("person", "height") - 172.0).abs() < 1e-9);
    assert!((at("person", "mass") - 77.0).abs() < 1e-9);
    assert!((at("starship", "length") - 34.37).abs() < 1e-9);
    assert!((at("starship", "cargoCapacity") - 100_000.0).abs() < 1e-6);
    assert!((at("planet", "diameter") - 10_465.0).abs() < 1e-6);
    assert!((at("species", "averageHeight") - 180.0).abs() < 1e-9);
}

#[test]
fn same_field_in_two_units_via_aliases() {
    let result = query(r#"planet(id: 1) { km: diameter(unit: KILOMETER) mi: diameter(unit: MILE) }"#);
    let tatooine = result.get("planet").unwrap();
    assert_eq!(tatooine.keys(), ["km", "mi"]);
    assert!((float(tatooine.get("mi").unwrap()) - 6502.64).abs() < 0.01);
}

#[test]
fn units_apply_inside_nested_selections() {
    let result = query(r#"people(name: "Chewbacca") { homeworld { diameter(unit: METER) } }"#);
    let chewie = &result.get("people").unwrap().as_list().unwrap()[0];
    let diameter = float(chewie.get("homeworld").unwrap().get("diameter").unwrap());
    assert!((diameter - 12_765_000.0).abs() < 1e-6);
}

// =============================================================================
// Relationships
// =============================================================================

#[test]
fn luke_across_relations() {
    let result = query(
        r#"person(id: 1) {
            homeworld { name }
            films { title }
            species { name }
            starships { name }
            vehicles { name }
        }"#,
    );
    let luke = result.get("person").unwrap();
    assert_eq!(
        luke.get("homeworld").unwrap().get("name").and_then(Value::as_str),
        Some("Tatooine")
    );
    assert_eq!(
        strings(luke.get("films").unwrap(), "title"),
        ["A New Hope", "The Empire Strikes Back", "Return of the Jedi"]
    );
    assert_eq!(strings(luke.get("species").unwrap(), "name"), ["Human"]);
    assert_eq!(strings(luke.get("starships").unwrap(), "name"), ["X-wing"]);
    assert_eq!(
        strings(luke.get("vehicles").unwrap(), "name"),
        ["Snowspeeder", "Imperial Speeder Bike"]
    );
}

#[test]
fn arvel_has_no_homeworld() {
    let result = query(r#"people(name: "Arvel") { name homeworld { name } starships { name } }"#);
    let arvel = &result.get("people").unwrap().as_list().unwrap()[0];
    assert_eq!(arvel.get("homeworld"), Some(&Value::Null));
    assert_eq!(arvel.get("starships"), Some(&Value::list([])));
}

#[test]
fn inverse_fields_mirror_stored_sides() {
    let result = query(
        r#"{
            planet(id: 1) { residents { name } }
            starship(id: 10) { pilots { name } }
            species(id: 3) { characters { name } homeworld { name } }
        }"#,
    );
    assert_eq!(
        strings(result.get("planet").unwrap().get("residents").unwrap(), "name"),
        ["Luke Skywalker", "C-3PO", "Darth Vader"]
    );
    assert_eq!(
        strings(result.get("starship").unwrap().get("pilots").unwrap(), "name"),
        ["Chewbacca", "Han Solo"]
    );
    let wookie = result.get("species").unwrap();
    assert_eq!(strings(wookie.get("characters").unwrap(), "name"), ["Chewbacca"]);
    assert_eq!(
        wookie.get("homeworld").unwrap().get("name").and_then(Value::as_str),
        Some("Kashyyyk")
    );
}

#[test]
fn cycles_terminate_at_request_depth() {
    let result = query(
        r#"person(id: 1) { homeworld { residents { homeworld { residents { name } } } } }"#,
    );
    let names = strings(
        result
            .get("person")
            .and_then(|v| v.get("homeworld"))
            .and_then(|v| v.get("residents"))
            .and_then(|v| v.as_list())
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("homeworld"))
            .and_then(|v| v.get("residents"))
            .unwrap(),
        "name",
    );
    assert_eq!(names, ["Luke Skywalker", "C-3PO", "Darth Vader"]);
}

// =============================================================================
// Roots
// =============================================================================

#[test]
fn films_filter_by_title() {
    let result = query(r#"films(title: "jedi") { title episodeID }"#);
    let films = result.get("films").unwrap().as_list().unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0].get("episodeID"), Some(&Value::Int(6)));
}

#[test]
fn global_id_round_trips_through_a_query() {
    let result = query(r#"person(id: "cGVvcGxlOjE=") { id name }"#);
    let luke = result.get("person").unwrap();
    assert_eq!(luke.get("name").and_then(Value::as_str), Some("Luke Skywalker"));
    assert_eq!(
        serde_json::to_string(luke.get("id").unwrap()).unwrap(),
        "\"cGVvcGxlOjE=\""
    );
}

#[test]
fn missing_id_is_null_not_an_error() {
    assert_eq!(query("person(id: 999) { name }").get("person"), Some(&Value::Null));
}

#[test]
fn unmatched_filter_is_an_empty_list() {
    assert_eq!(
        query(r#"planets(name: "Jakku") { name }"#).get("planets"),
        Some(&Value::list([]))
    );
}

#[test]
fn designator_spellings_agree() {
    let a = query("people { name }");
    let b = query("allPeople { name }");
    assert_eq!(a.get("people"), b.get("allPeople"));
}
