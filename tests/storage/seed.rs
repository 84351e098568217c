//! Integration tests for seed loading

use holocron_foundation::{EntityKind, ErrorKind};
use holocron_storage::seed::{load_seed_file, load_seed_str};
use holocron_storage::{Catalog, EntityData, Relation};

const SEED: &str = r#"{
    "planets": [
        {"id": 1, "name": "Tatooine", "diameter": 10465, "created": "2014-12-09T13:50:49.641Z"}
    ],
    "people": [
        {"id": 1, "name": "Luke Skywalker", "height": 172, "mass": 77, "homeworld": 1,
         "created": "2014-12-09T13:50:51.644Z"},
        {"id": 2, "name": "Nobody", "homeworld": 99,
         "created": "2014-12-09T13:50:51.644Z"}
    ]
}"#;

#[test]
fn magnitudes_are_stored_canonically() {
    let repo = load_seed_str(SEED).unwrap();
    let EntityData::Person(luke) = &repo.get_by_id(EntityKind::Person, 1).unwrap().data else {
        panic!("expected a person");
    };
    assert_eq!(luke.height, Some(1.72));
    assert_eq!(luke.mass, Some(77.0));

    let EntityData::Planet(tatooine) = &repo.get_by_id(EntityKind::Planet, 1).unwrap().data
    else {
        panic!("expected a planet");
    };
    assert_eq!(tatooine.diameter, Some(10_465_000.0));
}

#[test]
fn missing_collections_load_empty() {
    let repo = load_seed_str(SEED).unwrap();
    assert_eq!(repo.len(EntityKind::Film), 0);
    assert!(repo.get_all(EntityKind::Starship).is_empty());
}

#[test]
fn dangling_references_resolve_to_nothing() {
    let repo = load_seed_str(SEED).unwrap();
    let nobody = repo.get_by_id(EntityKind::Person, 2).unwrap().id;
    let targets = repo.targets(nobody, Relation::PersonHomeworld);
    assert!(targets.iter().all(|id| repo.get(*id).is_none()));
}

#[test]
fn duplicate_ids_are_rejected() {
    let seed = r#"{"films": [
        {"id": 1, "title": "A", "episode_id": 4, "created": "2014-12-10T14:23:31.880Z"},
        {"id": 1, "title": "B", "episode_id": 5, "created": "2014-12-10T14:23:31.880Z"}
    ]}"#;
    let err = load_seed_str(seed).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateEntity(_)), "{err}");
}

#[test]
fn edited_before_created_is_rejected() {
    let seed = r#"{"planets": [
        {"id": 1, "name": "Hoth", "created": "2014-12-10T14:23:31.880Z",
         "edited": "2014-12-01T00:00:00Z"}
    ]}"#;
    assert!(matches!(
        load_seed_str(seed).unwrap_err().kind,
        ErrorKind::InvalidSeed(_)
    ));
}

#[test]
fn malformed_json_is_invalid_seed() {
    let err = load_seed_str("{\"people\": [").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSeed(_)));
    assert!(!err.is_validation());
}

#[test]
fn missing_file_is_io_error() {
    let err = load_seed_file("/nonexistent/holocron/seed.json").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
}
