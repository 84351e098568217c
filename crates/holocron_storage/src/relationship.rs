//! Relationship storage with bidirectional indices.
//!
//! Every relation is stored once, as a directed edge from its source kind to
//! its target kind. `link` updates a forward and a reverse index together,
//! so the inverse field of a relation (e.g. `Person.films` for
//! `Film.characters`) always agrees with the forward one.
//!
//! Both indices keep edges in insertion order.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use holocron_foundation::{EntityId, EntityKind, Error, ErrorKind, Result};

use crate::schema::Cardinality;

/// A stored, directed relation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// Film → Person.
    FilmCharacters,
    /// Film → Planet.
    FilmPlanets,
    /// Film → Species.
    FilmSpecies,
    /// Film → Starship.
    FilmStarships,
    /// Film → Vehicle.
    FilmVehicles,
    /// Person → Planet, at most one target.
    PersonHomeworld,
    /// Species → Planet, at most one target.
    SpeciesHomeworld,
    /// Species → Person.
    SpeciesPeople,
    /// Starship → Person.
    StarshipPilots,
    /// Vehicle → Person.
    VehiclePilots,
}

impl Relation {
    /// All stored relations.
    pub const ALL: [Self; 10] = [
        Self::FilmCharacters,
        Self::FilmPlanets,
        Self::FilmSpecies,
        Self::FilmStarships,
        Self::FilmVehicles,
        Self::PersonHomeworld,
        Self::SpeciesHomeworld,
        Self::SpeciesPeople,
        Self::StarshipPilots,
        Self::VehiclePilots,
    ];

    /// Kind of the entity the edge starts at.
    #[must_use]
    pub const fn source_kind(self) -> EntityKind {
        match self {
            Self::FilmCharacters
            | Self::FilmPlanets
            | Self::FilmSpecies
            | Self::FilmStarships
            | Self::FilmVehicles => EntityKind::Film,
            Self::PersonHomeworld => EntityKind::Person,
            Self::SpeciesHomeworld | Self::SpeciesPeople => EntityKind::Species,
            Self::StarshipPilots => EntityKind::Starship,
            Self::VehiclePilots => EntityKind::Vehicle,
        }
    }

    /// Kind of the entity the edge points to.
    #[must_use]
    pub const fn target_kind(self) -> EntityKind {
        match self {
            Self::FilmCharacters
            | Self::SpeciesPeople
            | Self::StarshipPilots
            | Self::VehiclePilots => EntityKind::Person,
            Self::FilmPlanets | Self::PersonHomeworld | Self::SpeciesHomeworld => {
                EntityKind::Planet
            }
            Self::FilmSpecies => EntityKind::Species,
            Self::FilmStarships => EntityKind::Starship,
            Self::FilmVehicles => EntityKind::Vehicle,
        }
    }

    /// How many targets one source may have.
    #[must_use]
    pub const fn cardinality(self) -> Cardinality {
        match self {
            Self::PersonHomeworld | Self::SpeciesHomeworld => Cardinality::ManyToOne,
            _ => Cardinality::ManyToMany,
        }
    }

    /// Stable snake-case name, used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FilmCharacters => "film_characters",
            Self::FilmPlanets => "film_planets",
            Self::FilmSpecies => "film_species",
            Self::FilmStarships => "film_starships",
            Self::FilmVehicles => "film_vehicles",
            Self::PersonHomeworld => "person_homeworld",
            Self::SpeciesHomeworld => "species_homeworld",
            Self::SpeciesPeople => "species_people",
            Self::StarshipPilots => "starship_pilots",
            Self::VehiclePilots => "vehicle_pilots",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of a stored relation a field reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source to targets.
    Forward,
    /// Target to sources.
    Reverse,
}

/// A single directed edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source entity.
    pub source: EntityId,
    /// Relation type.
    pub relation: Relation,
    /// Target entity.
    pub target: EntityId,
}

type Index = HashMap<EntityId, HashMap<Relation, Vec<EntityId>>>;

/// Stores relationship edges between entities.
///
/// Maintains bidirectional indices for efficient traversal:
/// - Forward: source -> relation -> targets
/// - Reverse: target -> relation -> sources
#[derive(Clone, Debug, Default)]
pub struct RelationshipStore {
    forward: Index,
    reverse: Index,
    /// Edges in link order, for snapshots.
    log: Vec<Edge>,
}

impl RelationshipStore {
    /// Creates a new empty relationship store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a relationship edge.
    ///
    /// Linking an existing edge is idempotent (no-op). Endpoints are not
    /// checked for existence; dangling targets are the repository's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An endpoint's kind does not match the relation
    /// - The relation is many-to-one and the source already has a target
    pub fn link(&mut self, source: EntityId, relation: Relation, target: EntityId) -> Result<()> {
        if source.kind != relation.source_kind() || target.kind != relation.target_kind() {
            return Err(Error::internal(format!(
                "{relation} cannot link {source} to {target}"
            )));
        }

        if self.has_edge(source, relation, target) {
            return Ok(());
        }

        if relation.cardinality() == Cardinality::ManyToOne && !self.targets(source, relation).is_empty() {
            return Err(Error::new(ErrorKind::CardinalityViolation {
                relation: relation.name().to_string(),
                source_id: source,
            }));
        }

        trace!(%source, %relation, %target, "link");
        push(&mut self.forward, source, relation, target);
        push(&mut self.reverse, target, relation, source);
        self.log.push(Edge {
            source,
            relation,
            target,
        });
        Ok(())
    }

    /// Returns the targets of `source` along `relation`, in link order.
    #[must_use]
    pub fn targets(&self, source: EntityId, relation: Relation) -> &[EntityId] {
        lookup(&self.forward, source, relation)
    }

    /// Returns the sources pointing at `target` along `relation`, in link order.
    #[must_use]
    pub fn sources(&self, target: EntityId, relation: Relation) -> &[EntityId] {
        lookup(&self.reverse, target, relation)
    }

    /// Checks whether an edge exists.
    #[must_use]
    pub fn has_edge(&self, source: EntityId, relation: Relation, target: EntityId) -> bool {
        self.targets(source, relation).contains(&target)
    }

    /// Returns the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.log.len()
    }

    /// Iterates over every edge in link order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.log.iter()
    }
}

fn push(index: &mut Index, from: EntityId, relation: Relation, to: EntityId) {
    index
        .entry(from)
        .or_default()
        .entry(relation)
        .or_default()
        .push(to);
}

fn lookup(index: &Index, from: EntityId, relation: Relation) -> &[EntityId] {
    index
        .get(&from)
        .and_then(|m| m.get(&relation))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
