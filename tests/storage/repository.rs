//! Integration tests for the repository

use holocron_foundation::{EntityId, EntityKind};
use holocron_storage::seed::load_bundled;
use holocron_storage::{Catalog, Repository};
use proptest::prelude::*;

fn bundled() -> Repository {
    load_bundled().unwrap()
}

fn names(entities: &[&holocron_storage::Entity]) -> Vec<String> {
    entities.iter().map(|e| e.display_name().to_string()).collect()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn bundled_counts() {
    let repo = bundled();
    assert_eq!(repo.len(EntityKind::Film), 3);
    assert_eq!(repo.len(EntityKind::Person), 10);
    assert_eq!(repo.len(EntityKind::Planet), 11);
    assert_eq!(repo.len(EntityKind::Species), 4);
    assert_eq!(repo.len(EntityKind::Starship), 4);
    assert_eq!(repo.len(EntityKind::Vehicle), 3);
    assert!(!repo.is_empty());
}

#[test]
fn lookup_by_kind_local_and_global_id() {
    let repo = bundled();
    let luke = repo.get_by_id(EntityKind::Person, 1).unwrap();
    assert_eq!(luke.display_name(), "Luke Skywalker");
    assert_eq!(repo.get_by_global_id("cGVvcGxlOjE="), Some(luke));
    assert_eq!(
        repo.get(EntityId::new(EntityKind::Planet, 1)).unwrap().display_name(),
        "Tatooine"
    );
}

#[test]
fn identifiers_are_partitioned_by_kind() {
    let repo = bundled();
    // Index 14 is Han Solo, Kashyyyk and the Snowspeeder.
    assert_eq!(repo.get_by_id(EntityKind::Person, 14).unwrap().display_name(), "Han Solo");
    assert_eq!(repo.get_by_id(EntityKind::Planet, 14).unwrap().display_name(), "Kashyyyk");
    assert_eq!(
        repo.get_by_id(EntityKind::Vehicle, 14).unwrap().display_name(),
        "Snowspeeder"
    );
}

#[test]
fn missing_entities_are_none() {
    let repo = bundled();
    assert!(repo.get_by_id(EntityKind::Person, 999).is_none());
    assert!(repo.get_by_id(EntityKind::Starship, 1).is_none());
    assert!(repo.get_by_global_id("garbage").is_none());
}

#[test]
fn get_all_keeps_seed_order() {
    let repo = bundled();
    assert_eq!(
        names(&repo.get_all(EntityKind::Starship)),
        ["Death Star", "Millennium Falcon", "X-wing", "TIE Advanced x1"]
    );
}

// =============================================================================
// Name Filter
// =============================================================================

#[test]
fn filter_is_case_insensitive_substring() {
    let repo = bundled();
    assert_eq!(names(&repo.find_by_name(EntityKind::Person, "SKY")), ["Luke Skywalker"]);
    assert_eq!(
        names(&repo.find_by_name(EntityKind::Planet, "oo")),
        ["Tatooine", "Naboo"]
    );
}

#[test]
fn filter_matches_film_titles() {
    let repo = bundled();
    assert_eq!(
        names(&repo.find_by_name(EntityKind::Film, "the")),
        ["The Empire Strikes Back", "Return of the Jedi"]
    );
}

#[test]
fn filter_without_match_is_empty() {
    assert!(bundled().find_by_name(EntityKind::Person, "Jar Jar").is_empty());
}

proptest! {
    #[test]
    fn empty_filter_equals_all(kind in prop::sample::select(EntityKind::ALL.to_vec())) {
        let repo = bundled();
        prop_assert_eq!(repo.find_by_name(kind, ""), repo.get_all(kind));
    }

    #[test]
    fn filter_results_are_an_ordered_subset(
        kind in prop::sample::select(EntityKind::ALL.to_vec()),
        needle in "[a-zA-Z ]{0,3}",
    ) {
        let repo = bundled();
        let all = repo.get_all(kind);
        let found = repo.find_by_name(kind, &needle);
        let positions: Vec<_> = found
            .iter()
            .map(|e| all.iter().position(|a| a.id == e.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for entity in found {
            prop_assert!(entity.display_name().to_lowercase().contains(&needle.to_lowercase()));
        }
    }
}
