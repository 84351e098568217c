//! Entity records.
//!
//! Every entity shares a base record (`id`, `created_at`, `edited_at`) and
//! carries kind-specific data in [`EntityData`]. Relations are not stored on
//! the records; they live in the [`RelationshipStore`](crate::RelationshipStore).
//!
//! Magnitudes are stored in canonical units: meters for lengths, kilograms
//! for masses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use holocron_foundation::{EntityId, EntityKind};

/// A catalog entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier, derived from the kind of `data`.
    pub id: EntityId,
    /// When the record was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// When the record was last edited, if ever.
    pub edited_at: Option<DateTime<Utc>>,
    /// Kind-specific attributes.
    pub data: EntityData,
}

impl Entity {
    /// Creates an entity. The kind of the identifier follows the data.
    #[must_use]
    pub fn new(index: u32, created_at: DateTime<Utc>, data: EntityData) -> Self {
        Self {
            id: EntityId::new(data.kind(), index),
            created_at,
            edited_at: None,
            data,
        }
    }

    /// Sets the edit timestamp.
    #[must_use]
    pub fn with_edited_at(mut self, edited_at: DateTime<Utc>) -> Self {
        self.edited_at = Some(edited_at);
        self
    }

    /// Returns the entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.id.kind
    }

    /// Returns the name, or the title for films.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.data {
            EntityData::Film(f) => &f.title,
            EntityData::Person(p) => &p.name,
            EntityData::Planet(p) => &p.name,
            EntityData::Species(s) => &s.name,
            EntityData::Starship(s) => &s.name,
            EntityData::Vehicle(v) => &v.name,
        }
    }
}

/// Kind-specific entity data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityData {
    /// Film attributes.
    Film(Film),
    /// Person attributes.
    Person(Person),
    /// Planet attributes.
    Planet(Planet),
    /// Species attributes.
    Species(Species),
    /// Starship attributes.
    Starship(Starship),
    /// Vehicle attributes.
    Vehicle(Vehicle),
}

impl EntityData {
    /// Returns the kind this data belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Film(_) => EntityKind::Film,
            Self::Person(_) => EntityKind::Person,
            Self::Planet(_) => EntityKind::Planet,
            Self::Species(_) => EntityKind::Species,
            Self::Starship(_) => EntityKind::Starship,
            Self::Vehicle(_) => EntityKind::Vehicle,
        }
    }
}

/// A film.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Title.
    pub title: String,
    /// Episode number.
    pub episode_id: i64,
    /// Opening crawl text.
    pub opening_crawl: String,
    /// Director.
    pub director: String,
    /// Producers, in credit order.
    pub producers: Vec<String>,
    /// Original release date.
    pub release_date: Option<DateTime<Utc>>,
}

/// A person.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Name.
    pub name: String,
    /// Birth year in the in-universe calendar (e.g. `19BBY`).
    pub birth_year: Option<String>,
    /// Eye color.
    pub eye_color: Option<String>,
    /// Hair color.
    pub hair_color: Option<String>,
    /// Skin color.
    pub skin_color: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Height in meters.
    pub height: Option<f64>,
    /// Mass in kilograms.
    pub mass: Option<f64>,
}

/// A planet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Name.
    pub name: String,
    /// Hours per rotation.
    pub rotation_period: Option<i64>,
    /// Days per orbit.
    pub orbital_period: Option<i64>,
    /// Gravity relative to standard.
    pub gravity: Option<f64>,
    /// Population.
    pub population: Option<f64>,
    /// Climates.
    pub climates: Vec<String>,
    /// Terrains.
    pub terrains: Vec<String>,
    /// Percentage of the surface covered by water.
    pub surface_water: Option<f64>,
    /// Diameter in meters.
    pub diameter: Option<f64>,
}

/// A species.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Name.
    pub name: String,
    /// Classification (e.g. `mammal`).
    pub classification: Option<String>,
    /// Designation (e.g. `sentient`).
    pub designation: Option<String>,
    /// Average height in meters.
    pub average_height: Option<f64>,
    /// Average lifespan in years.
    pub average_lifespan: Option<i64>,
    /// Common eye colors.
    pub eye_colors: Vec<String>,
    /// Common hair colors.
    pub hair_colors: Vec<String>,
    /// Common skin colors.
    pub skin_colors: Vec<String>,
    /// Language.
    pub language: Option<String>,
}

/// A starship.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    /// Name.
    pub name: String,
    /// Model.
    pub model: Option<String>,
    /// Class (e.g. `Starfighter`).
    pub starship_class: Option<String>,
    /// Manufacturers.
    pub manufacturers: Vec<String>,
    /// Cost in galactic credits.
    pub cost_in_credits: Option<f64>,
    /// Length in meters.
    pub length: Option<f64>,
    /// Crew size as published (may be a range).
    pub crew: Option<String>,
    /// Passenger capacity as published.
    pub passengers: Option<String>,
    /// Maximum speed in atmosphere.
    pub max_atmosphering_speed: Option<i64>,
    /// Hyperdrive class.
    pub hyperdrive_rating: Option<f64>,
    /// Maximum megalights per hour.
    pub mglt: Option<i64>,
    /// Cargo capacity in kilograms.
    pub cargo_capacity: Option<f64>,
    /// Consumables duration (e.g. `2 months`).
    pub consumables: Option<String>,
}

/// A vehicle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Name.
    pub name: String,
    /// Model.
    pub model: Option<String>,
    /// Class (e.g. `wheeled`).
    pub vehicle_class: Option<String>,
    /// Manufacturers.
    pub manufacturers: Vec<String>,
    /// Cost in galactic credits.
    pub cost_in_credits: Option<f64>,
    /// Length in meters.
    pub length: Option<f64>,
    /// Crew size as published.
    pub crew: Option<String>,
    /// Passenger capacity as published.
    pub passengers: Option<String>,
    /// Maximum speed in atmosphere.
    pub max_atmosphering_speed: Option<i64>,
    /// Cargo capacity in kilograms.
    pub cargo_capacity: Option<f64>,
    /// Consumables duration.
    pub consumables: Option<String>,
}
