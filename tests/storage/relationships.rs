//! Integration tests for relationship indices

use holocron_foundation::{EntityId, EntityKind};
use holocron_storage::seed::load_bundled;
use holocron_storage::{Catalog, Relation};

fn person(n: u32) -> EntityId {
    EntityId::new(EntityKind::Person, n)
}

#[test]
fn every_edge_is_visible_from_both_ends() {
    let repo = load_bundled().unwrap();
    let store = repo.relationships();
    let mut seen = 0;
    for edge in store.edges() {
        assert!(repo.targets(edge.source, edge.relation).contains(&edge.target));
        assert!(repo.sources(edge.target, edge.relation).contains(&edge.source));
        assert!(store.has_edge(edge.source, edge.relation, edge.target));
        seen += 1;
    }
    assert_eq!(seen, repo.edge_count());
}

#[test]
fn every_relation_is_populated() {
    let repo = load_bundled().unwrap();
    for relation in Relation::ALL {
        assert!(
            repo.relationships().edges().any(|e| e.relation == relation),
            "no {relation} edges"
        );
    }
}

#[test]
fn edges_join_the_declared_kinds() {
    let repo = load_bundled().unwrap();
    for edge in repo.relationships().edges() {
        assert_eq!(edge.source.kind, edge.relation.source_kind());
        assert_eq!(edge.target.kind, edge.relation.target_kind());
    }
}

#[test]
fn homeworld_is_single_valued() {
    let repo = load_bundled().unwrap();
    for entity in repo.get_all(EntityKind::Person) {
        assert!(repo.targets(entity.id, Relation::PersonHomeworld).len() <= 1);
    }
    assert!(repo.targets(person(28), Relation::PersonHomeworld).is_empty());
}

#[test]
fn targets_follow_seed_order() {
    let repo = load_bundled().unwrap();
    let falcon = EntityId::new(EntityKind::Starship, 10);
    assert_eq!(repo.targets(falcon, Relation::StarshipPilots), [person(13), person(14)]);
}

#[test]
fn reverse_index_lists_sources() {
    let repo = load_bundled().unwrap();
    let tatooine = EntityId::new(EntityKind::Planet, 1);
    assert_eq!(
        repo.sources(tatooine, Relation::PersonHomeworld),
        [person(1), person(2), person(4)]
    );
}
