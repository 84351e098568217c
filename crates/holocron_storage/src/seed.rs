//! Bulk loading from a JSON seed document.
//!
//! A seed holds one array per collection. Relations appear only on their
//! stored side (`Film.characters`, `Person.homeworld`, `Species.people`, ...);
//! the repository derives the inverse fields from the reverse index.
//!
//! Seed magnitudes use the units the source data is published in: heights
//! and average heights in centimeters, diameters in kilometers, lengths in
//! meters, masses and cargo capacities in kilograms. They are normalised to
//! meters and kilograms on load.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::debug;

use holocron_foundation::units::to_canonical;
use holocron_foundation::{EntityId, EntityKind, Error, ErrorKind, LengthUnit, MassUnit, Result};

use crate::entity::{Entity, EntityData, Film, Person, Planet, Species, Starship, Vehicle};
use crate::relationship::Relation;
use crate::repository::{Repository, RepositoryBuilder};

/// The dataset shipped with the crate.
pub const BUNDLED_SEED: &str = include_str!("../../../data/swapi.json");

/// Fields shared by every seed record.
#[derive(Debug, Deserialize)]
struct Base {
    id: u32,
    created: DateTime<Utc>,
    #[serde(default)]
    edited: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SeedFilm {
    #[serde(flatten)]
    base: Base,
    title: String,
    episode_id: i64,
    #[serde(default)]
    opening_crawl: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    producers: Vec<String>,
    #[serde(default)]
    release_date: Option<NaiveDate>,
    #[serde(default)]
    characters: Vec<u32>,
    #[serde(default)]
    planets: Vec<u32>,
    #[serde(default)]
    species: Vec<u32>,
    #[serde(default)]
    starships: Vec<u32>,
    #[serde(default)]
    vehicles: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct SeedPerson {
    #[serde(flatten)]
    base: Base,
    name: String,
    #[serde(default)]
    birth_year: Option<String>,
    #[serde(default)]
    eye_color: Option<String>,
    #[serde(default)]
    hair_color: Option<String>,
    #[serde(default)]
    skin_color: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    /// Centimeters.
    #[serde(default)]
    height: Option<f64>,
    /// Kilograms.
    #[serde(default)]
    mass: Option<f64>,
    #[serde(default)]
    homeworld: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SeedPlanet {
    #[serde(flatten)]
    base: Base,
    name: String,
    #[serde(default)]
    rotation_period: Option<i64>,
    #[serde(default)]
    orbital_period: Option<i64>,
    #[serde(default)]
    gravity: Option<f64>,
    #[serde(default)]
    population: Option<f64>,
    #[serde(default)]
    climates: Vec<String>,
    #[serde(default)]
    terrains: Vec<String>,
    #[serde(default)]
    surface_water: Option<f64>,
    /// Kilometers.
    #[serde(default)]
    diameter: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SeedSpecies {
    #[serde(flatten)]
    base: Base,
    name: String,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    designation: Option<String>,
    /// Centimeters.
    #[serde(default)]
    average_height: Option<f64>,
    #[serde(default)]
    average_lifespan: Option<i64>,
    #[serde(default)]
    eye_colors: Vec<String>,
    #[serde(default)]
    hair_colors: Vec<String>,
    #[serde(default)]
    skin_colors: Vec<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    homeworld: Option<u32>,
    #[serde(default)]
    people: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct SeedStarship {
    #[serde(flatten)]
    base: Base,
    name: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    starship_class: Option<String>,
    #[serde(default)]
    manufacturers: Vec<String>,
    #[serde(default)]
    cost_in_credits: Option<f64>,
    /// Meters.
    #[serde(default)]
    length: Option<f64>,
    #[serde(default)]
    crew: Option<String>,
    #[serde(default)]
    passengers: Option<String>,
    #[serde(default)]
    max_atmosphering_speed: Option<i64>,
    #[serde(default)]
    hyperdrive_rating: Option<f64>,
    #[serde(default, rename = "MGLT")]
    mglt: Option<i64>,
    /// Kilograms.
    #[serde(default)]
    cargo_capacity: Option<f64>,
    #[serde(default)]
    consumables: Option<String>,
    #[serde(default)]
    pilots: Vec<u32>,
    /// Keys no starship field claims. Must stay the last flattened field.
    #[serde(flatten)]
    unclaimed: BTreeMap<String, IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct SeedVehicle {
    #[serde(flatten)]
    base: Base,
    name: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    vehicle_class: Option<String>,
    #[serde(default)]
    manufacturers: Vec<String>,
    #[serde(default)]
    cost_in_credits: Option<f64>,
    /// Meters.
    #[serde(default)]
    length: Option<f64>,
    #[serde(default)]
    crew: Option<String>,
    #[serde(default)]
    passengers: Option<String>,
    #[serde(default)]
    max_atmosphering_speed: Option<i64>,
    /// Kilograms.
    #[serde(default)]
    cargo_capacity: Option<f64>,
    #[serde(default)]
    consumables: Option<String>,
    #[serde(default)]
    pilots: Vec<u32>,
    /// Keys no vehicle field claims. Must stay the last flattened field.
    #[serde(flatten)]
    unclaimed: BTreeMap<String, IgnoredAny>,
}

/// A parsed seed document.
#[derive(Debug, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    films: Vec<SeedFilm>,
    #[serde(default)]
    people: Vec<SeedPerson>,
    #[serde(default)]
    planets: Vec<SeedPlanet>,
    #[serde(default)]
    species: Vec<SeedSpecies>,
    #[serde(default)]
    starships: Vec<SeedStarship>,
    #[serde(default)]
    vehicles: Vec<SeedVehicle>,
}

impl SeedDocument {
    /// Parses a seed document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid seed document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::new(ErrorKind::InvalidSeed(e.to_string())))
    }

    /// Loads the document into a frozen repository.
    ///
    /// Entities are inserted collection by collection (films, people,
    /// planets, species, starships, vehicles), then every relation is linked
    /// in the same order.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier repeats within a collection, an
    /// `edited` timestamp precedes `created`, or a starship or vehicle record
    /// carries fields its kind cannot hold.
    pub fn into_repository(self) -> Result<Repository> {
        let mut b = Repository::builder();
        let mut links: Vec<(EntityId, Relation, EntityId)> = Vec::new();

        for f in self.films {
            let id = insert(&mut b, &f.base, EntityData::Film(Film {
                title: f.title,
                episode_id: f.episode_id,
                opening_crawl: f.opening_crawl,
                director: f.director,
                producers: f.producers,
                release_date: f.release_date.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            }))?;
            fan_out(&mut links, id, Relation::FilmCharacters, &f.characters);
            fan_out(&mut links, id, Relation::FilmPlanets, &f.planets);
            fan_out(&mut links, id, Relation::FilmSpecies, &f.species);
            fan_out(&mut links, id, Relation::FilmStarships, &f.starships);
            fan_out(&mut links, id, Relation::FilmVehicles, &f.vehicles);
        }

        for p in self.people {
            let id = insert(&mut b, &p.base, EntityData::Person(Person {
                name: p.name,
                birth_year: p.birth_year,
                eye_color: p.eye_color,
                hair_color: p.hair_color,
                skin_color: p.skin_color,
                gender: p.gender,
                height: p.height.map(|h| to_canonical(h, LengthUnit::Centimeter.into())),
                mass: p.mass.map(|m| to_canonical(m, MassUnit::Kilogram.into())),
            }))?;
            fan_out(&mut links, id, Relation::PersonHomeworld, p.homeworld.as_slice());
        }

        for p in self.planets {
            insert(&mut b, &p.base, EntityData::Planet(Planet {
                name: p.name,
                rotation_period: p.rotation_period,
                orbital_period: p.orbital_period,
                gravity: p.gravity,
                population: p.population,
                climates: p.climates,
                terrains: p.terrains,
                surface_water: p.surface_water,
                diameter: p.diameter.map(|d| to_canonical(d, LengthUnit::Kilometer.into())),
            }))?;
        }

        for s in self.species {
            let id = insert(&mut b, &s.base, EntityData::Species(Species {
                name: s.name,
                classification: s.classification,
                designation: s.designation,
                average_height: s
                    .average_height
                    .map(|h| to_canonical(h, LengthUnit::Centimeter.into())),
                average_lifespan: s.average_lifespan,
                eye_colors: s.eye_colors,
                hair_colors: s.hair_colors,
                skin_colors: s.skin_colors,
                language: s.language,
            }))?;
            fan_out(&mut links, id, Relation::SpeciesHomeworld, s.homeworld.as_slice());
            fan_out(&mut links, id, Relation::SpeciesPeople, &s.people);
        }

        for s in self.starships {
            refuse_unclaimed(&s.base, EntityKind::Starship, &s.unclaimed)?;
            let id = insert(&mut b, &s.base, EntityData::Starship(Starship {
                name: s.name,
                model: s.model,
                starship_class: s.starship_class,
                manufacturers: s.manufacturers,
                cost_in_credits: s.cost_in_credits,
                length: s.length.map(|l| to_canonical(l, LengthUnit::Meter.into())),
                crew: s.crew,
                passengers: s.passengers,
                max_atmosphering_speed: s.max_atmosphering_speed,
                hyperdrive_rating: s.hyperdrive_rating,
                mglt: s.mglt,
                cargo_capacity: s.cargo_capacity.map(|c| to_canonical(c, MassUnit::Kilogram.into())),
                consumables: s.consumables,
            }))?;
            fan_out(&mut links, id, Relation::StarshipPilots, &s.pilots);
        }

        for v in self.vehicles {
            refuse_unclaimed(&v.base, EntityKind::Vehicle, &v.unclaimed)?;
            let id = insert(&mut b, &v.base, EntityData::Vehicle(Vehicle {
                name: v.name,
                model: v.model,
                vehicle_class: v.vehicle_class,
                manufacturers: v.manufacturers,
                cost_in_credits: v.cost_in_credits,
                length: v.length.map(|l| to_canonical(l, LengthUnit::Meter.into())),
                crew: v.crew,
                passengers: v.passengers,
                max_atmosphering_speed: v.max_atmosphering_speed,
                cargo_capacity: v.cargo_capacity.map(|c| to_canonical(c, MassUnit::Kilogram.into())),
                consumables: v.consumables,
            }))?;
            fan_out(&mut links, id, Relation::VehiclePilots, &v.pilots);
        }

        debug!(edges = links.len(), "linking seed relations");
        for (source, relation, target) in links {
            b.link(source, relation, target)?;
        }
        Ok(b.build())
    }
}

fn insert(b: &mut RepositoryBuilder, base: &Base, data: EntityData) -> Result<EntityId> {
    let mut entity = Entity::new(base.id, base.created, data);
    if let Some(edited) = base.edited {
        if edited < base.created {
            return Err(Error::new(ErrorKind::InvalidSeed(format!(
                "{} edited before it was created",
                entity.id
            ))));
        }
        entity = entity.with_edited_at(edited);
    }
    let id = entity.id;
    b.insert(entity)?;
    Ok(id)
}

/// Rejects keys a craft record left unclaimed, such as `hyperdrive_rating`
/// on a vehicle.
fn refuse_unclaimed(
    base: &Base,
    kind: EntityKind,
    unclaimed: &BTreeMap<String, IgnoredAny>,
) -> Result<()> {
    if unclaimed.is_empty() {
        return Ok(());
    }
    let keys: Vec<&str> = unclaimed.keys().map(String::as_str).collect();
    Err(Error::new(ErrorKind::InvalidSeed(format!(
        "{} has fields a {} cannot hold: {}",
        EntityId::new(kind, base.id),
        kind.type_name(),
        keys.join(", ")
    ))))
}

fn fan_out(
    links: &mut Vec<(EntityId, Relation, EntityId)>,
    source: EntityId,
    relation: Relation,
    targets: &[u32],
) {
    let kind = relation.target_kind();
    links.extend(
        targets
            .iter()
            .map(|&n| (source, relation, EntityId::new(kind, n))),
    );
}

/// Loads a repository from seed JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a valid seed document or its
/// contents are inconsistent.
pub fn load_seed_str(json: &str) -> Result<Repository> {
    SeedDocument::from_json(json)?.into_repository()
}

/// Loads a repository from a seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds an invalid seed.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Repository> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| Error::new(ErrorKind::IoError(format!("{}: {e}", path.display()))))?;
    load_seed_str(&json)
}

/// Loads the bundled dataset.
///
/// # Errors
///
/// Returns an error only if the bundled dataset is corrupt.
pub fn load_bundled() -> Result<Repository> {
    load_seed_str(BUNDLED_SEED)
}
