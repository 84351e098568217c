//! Schema definitions for the selectable fields of every entity kind.
//!
//! The field table is static: each kind has a fixed list of [`FieldDef`]s
//! naming the request spelling of the field, its type, whether it may be
//! null, and how to read it from an [`Entity`]. Magnitude fields carry their
//! default unit; relation fields name the stored relation and the side they
//! read.

use holocron_foundation::{EntityKind, Family, LengthUnit, MassUnit, Type, Unit, Value};

use crate::entity::{Entity, EntityData};
use crate::relationship::{Direction, Relation};

/// Relationship cardinality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// A source has at most one target; a target may have many sources.
    ManyToOne,
    /// Unconstrained on both sides.
    ManyToMany,
}

/// A relation field: one side of a stored relation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationField {
    /// The stored relation.
    pub relation: Relation,
    /// Which side this field reads.
    pub direction: Direction,
}

impl RelationField {
    /// Kind of the entities this field yields.
    #[must_use]
    pub const fn target_kind(&self) -> EntityKind {
        match self.direction {
            Direction::Forward => self.relation.target_kind(),
            Direction::Reverse => self.relation.source_kind(),
        }
    }

    /// Returns true if this field yields at most one entity.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.direction == Direction::Forward
            && self.relation.cardinality() == Cardinality::ManyToOne
    }
}

/// How a field's value is produced.
#[derive(Copy, Clone, Debug)]
pub enum FieldKind {
    /// Read as stored.
    Scalar(fn(&Entity) -> Value),
    /// Read in the canonical unit and converted at query time.
    Magnitude {
        /// Unit used when the request names none.
        default_unit: Unit,
        /// Reads the canonical value.
        read: fn(&Entity) -> Option<f64>,
    },
    /// Resolved through the relationship store.
    Relation(RelationField),
}

/// A selectable field.
#[derive(Copy, Clone, Debug)]
pub struct FieldDef {
    /// Request spelling (e.g. `birthYear`).
    pub name: &'static str,
    /// Non-null type of the field.
    pub ty: Type,
    /// Whether the field may be null.
    pub nullable: bool,
    /// How the value is produced.
    pub kind: FieldKind,
}

impl FieldDef {
    const fn scalar(name: &'static str, ty: Type, nullable: bool, read: fn(&Entity) -> Value) -> Self {
        Self {
            name,
            ty,
            nullable,
            kind: FieldKind::Scalar(read),
        }
    }

    const fn length(name: &'static str, default: LengthUnit, read: fn(&Entity) -> Option<f64>) -> Self {
        Self {
            name,
            ty: Type::Magnitude(Family::Length),
            nullable: true,
            kind: FieldKind::Magnitude {
                default_unit: Unit::Length(default),
                read,
            },
        }
    }

    const fn mass(name: &'static str, default: MassUnit, read: fn(&Entity) -> Option<f64>) -> Self {
        Self {
            name,
            ty: Type::Magnitude(Family::Mass),
            nullable: true,
            kind: FieldKind::Magnitude {
                default_unit: Unit::Mass(default),
                read,
            },
        }
    }

    const fn single(name: &'static str, relation: Relation) -> Self {
        Self {
            name,
            ty: Type::Entity(relation.target_kind()),
            nullable: true,
            kind: FieldKind::Relation(RelationField {
                relation,
                direction: Direction::Forward,
            }),
        }
    }

    const fn many(name: &'static str, relation: Relation) -> Self {
        Self {
            name,
            ty: Type::Collection(relation.target_kind()),
            nullable: false,
            kind: FieldKind::Relation(RelationField {
                relation,
                direction: Direction::Forward,
            }),
        }
    }

    const fn inverse(name: &'static str, relation: Relation) -> Self {
        Self {
            name,
            ty: Type::Collection(relation.source_kind()),
            nullable: false,
            kind: FieldKind::Relation(RelationField {
                relation,
                direction: Direction::Reverse,
            }),
        }
    }

    /// Returns the relation this field reads, if it is a relation field.
    #[must_use]
    pub const fn relation(&self) -> Option<RelationField> {
        match self.kind {
            FieldKind::Relation(rel) => Some(rel),
            _ => None,
        }
    }

    /// Returns the default unit of a magnitude field.
    #[must_use]
    pub const fn default_unit(&self) -> Option<Unit> {
        match self.kind {
            FieldKind::Magnitude { default_unit, .. } => Some(default_unit),
            _ => None,
        }
    }
}

// Accessor closures. Each matches the kind's data variant; a mismatched
// kind cannot reach them because lookups go through the kind's own table.
macro_rules! read {
    ($variant:ident, |$r:ident| $body:expr) => {
        |e: &Entity| match &e.data {
            EntityData::$variant($r) => Value::from($body),
            _ => Value::Null,
        }
    };
}

macro_rules! magnitude {
    ($variant:ident, |$r:ident| $body:expr) => {
        |e: &Entity| match &e.data {
            EntityData::$variant($r) => $body,
            _ => None,
        }
    };
}

const ID: FieldDef = FieldDef::scalar("id", Type::Id, false, |e| Value::Id(e.id));
const CREATED_AT: FieldDef =
    FieldDef::scalar("createdAt", Type::Timestamp, false, |e| Value::Timestamp(e.created_at));
const EDITED_AT: FieldDef =
    FieldDef::scalar("editedAt", Type::Timestamp, true, |e| Value::from(e.edited_at));

static FILM: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("title", Type::String, false, read!(Film, |f| &f.title)),
    FieldDef::scalar("episodeID", Type::Int, false, read!(Film, |f| f.episode_id)),
    FieldDef::scalar("openingCrawl", Type::String, false, read!(Film, |f| &f.opening_crawl)),
    FieldDef::scalar("director", Type::String, false, read!(Film, |f| &f.director)),
    FieldDef::scalar("producers", Type::StringList, false, read!(Film, |f| &f.producers)),
    FieldDef::scalar("releaseDate", Type::Timestamp, true, read!(Film, |f| f.release_date)),
    FieldDef::many("species", Relation::FilmSpecies),
    FieldDef::many("starships", Relation::FilmStarships),
    FieldDef::many("vehicles", Relation::FilmVehicles),
    FieldDef::many("characters", Relation::FilmCharacters),
    FieldDef::many("planets", Relation::FilmPlanets),
];

static PERSON: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("name", Type::String, false, read!(Person, |p| &p.name)),
    FieldDef::scalar("birthYear", Type::String, true, read!(Person, |p| p.birth_year.as_deref())),
    FieldDef::scalar("eyeColor", Type::String, true, read!(Person, |p| p.eye_color.as_deref())),
    FieldDef::scalar("hairColor", Type::String, true, read!(Person, |p| p.hair_color.as_deref())),
    FieldDef::scalar("skinColor", Type::String, true, read!(Person, |p| p.skin_color.as_deref())),
    FieldDef::scalar("gender", Type::String, true, read!(Person, |p| p.gender.as_deref())),
    FieldDef::length("height", LengthUnit::Centimeter, magnitude!(Person, |p| p.height)),
    FieldDef::mass("mass", MassUnit::Kilogram, magnitude!(Person, |p| p.mass)),
    FieldDef::single("homeworld", Relation::PersonHomeworld),
    FieldDef::inverse("films", Relation::FilmCharacters),
    FieldDef::inverse("species", Relation::SpeciesPeople),
    FieldDef::inverse("starships", Relation::StarshipPilots),
    FieldDef::inverse("vehicles", Relation::VehiclePilots),
];

static PLANET: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("name", Type::String, false, read!(Planet, |p| &p.name)),
    FieldDef::scalar("rotationPeriod", Type::Int, true, read!(Planet, |p| p.rotation_period)),
    FieldDef::scalar("orbitalPeriod", Type::Int, true, read!(Planet, |p| p.orbital_period)),
    FieldDef::scalar("gravity", Type::Float, true, read!(Planet, |p| p.gravity)),
    FieldDef::scalar("population", Type::Float, true, read!(Planet, |p| p.population)),
    FieldDef::scalar("climates", Type::StringList, false, read!(Planet, |p| &p.climates)),
    FieldDef::scalar("terrains", Type::StringList, false, read!(Planet, |p| &p.terrains)),
    FieldDef::scalar("surfaceWater", Type::Float, true, read!(Planet, |p| p.surface_water)),
    FieldDef::length("diameter", LengthUnit::Kilometer, magnitude!(Planet, |p| p.diameter)),
    FieldDef::inverse("residents", Relation::PersonHomeworld),
    FieldDef::inverse("films", Relation::FilmPlanets),
];

static SPECIES: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("name", Type::String, false, read!(Species, |s| &s.name)),
    FieldDef::scalar("classification", Type::String, true, read!(Species, |s| s.classification.as_deref())),
    FieldDef::scalar("designation", Type::String, true, read!(Species, |s| s.designation.as_deref())),
    FieldDef::length("averageHeight", LengthUnit::Centimeter, magnitude!(Species, |s| s.average_height)),
    FieldDef::scalar("averageLifespan", Type::Int, true, read!(Species, |s| s.average_lifespan)),
    FieldDef::scalar("eyeColors", Type::StringList, false, read!(Species, |s| &s.eye_colors)),
    FieldDef::scalar("hairColors", Type::StringList, false, read!(Species, |s| &s.hair_colors)),
    FieldDef::scalar("skinColors", Type::StringList, false, read!(Species, |s| &s.skin_colors)),
    FieldDef::scalar("language", Type::String, true, read!(Species, |s| s.language.as_deref())),
    FieldDef::single("homeworld", Relation::SpeciesHomeworld),
    FieldDef::many("characters", Relation::SpeciesPeople),
    FieldDef::inverse("films", Relation::FilmSpecies),
];

static STARSHIP: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("name", Type::String, false, read!(Starship, |s| &s.name)),
    FieldDef::scalar("model", Type::String, true, read!(Starship, |s| s.model.as_deref())),
    FieldDef::scalar("starshipClass", Type::String, true, read!(Starship, |s| s.starship_class.as_deref())),
    FieldDef::scalar("manufacturers", Type::StringList, false, read!(Starship, |s| &s.manufacturers)),
    FieldDef::scalar("costInCredits", Type::Float, true, read!(Starship, |s| s.cost_in_credits)),
    FieldDef::length("length", LengthUnit::Meter, magnitude!(Starship, |s| s.length)),
    FieldDef::scalar("crew", Type::String, true, read!(Starship, |s| s.crew.as_deref())),
    FieldDef::scalar("passengers", Type::String, true, read!(Starship, |s| s.passengers.as_deref())),
    FieldDef::scalar("maxAtmospheringSpeed", Type::Int, true, read!(Starship, |s| s.max_atmosphering_speed)),
    FieldDef::scalar("hyperdriveRating", Type::Float, true, read!(Starship, |s| s.hyperdrive_rating)),
    FieldDef::scalar("MGLT", Type::Int, true, read!(Starship, |s| s.mglt)),
    FieldDef::mass("cargoCapacity", MassUnit::Kilogram, magnitude!(Starship, |s| s.cargo_capacity)),
    FieldDef::scalar("consumables", Type::String, true, read!(Starship, |s| s.consumables.as_deref())),
    FieldDef::inverse("films", Relation::FilmStarships),
    FieldDef::many("pilots", Relation::StarshipPilots),
];

static VEHICLE: &[FieldDef] = &[
    ID,
    CREATED_AT,
    EDITED_AT,
    FieldDef::scalar("name", Type::String, false, read!(Vehicle, |v| &v.name)),
    FieldDef::scalar("model", Type::String, true, read!(Vehicle, |v| v.model.as_deref())),
    FieldDef::scalar("vehicleClass", Type::String, true, read!(Vehicle, |v| v.vehicle_class.as_deref())),
    FieldDef::scalar("manufacturers", Type::StringList, false, read!(Vehicle, |v| &v.manufacturers)),
    FieldDef::scalar("costInCredits", Type::Float, true, read!(Vehicle, |v| v.cost_in_credits)),
    FieldDef::length("length", LengthUnit::Meter, magnitude!(Vehicle, |v| v.length)),
    FieldDef::scalar("crew", Type::String, true, read!(Vehicle, |v| v.crew.as_deref())),
    FieldDef::scalar("passengers", Type::String, true, read!(Vehicle, |v| v.passengers.as_deref())),
    FieldDef::scalar("maxAtmospheringSpeed", Type::Int, true, read!(Vehicle, |v| v.max_atmosphering_speed)),
    FieldDef::mass("cargoCapacity", MassUnit::Kilogram, magnitude!(Vehicle, |v| v.cargo_capacity)),
    FieldDef::scalar("consumables", Type::String, true, read!(Vehicle, |v| v.consumables.as_deref())),
    FieldDef::inverse("films", Relation::FilmVehicles),
    FieldDef::many("pilots", Relation::VehiclePilots),
];

/// Returns every selectable field of `kind`, in declaration order.
#[must_use]
pub fn fields(kind: EntityKind) -> &'static [FieldDef] {
    match kind {
        EntityKind::Film => FILM,
        EntityKind::Person => PERSON,
        EntityKind::Planet => PLANET,
        EntityKind::Species => SPECIES,
        EntityKind::Starship => STARSHIP,
        EntityKind::Vehicle => VEHICLE,
    }
}

/// Looks up a field of `kind` by its request spelling.
#[must_use]
pub fn field(kind: EntityKind, name: &str) -> Option<&'static FieldDef> {
    fields(kind).iter().find(|f| f.name == name)
}

/// Looks up a relation field of `kind` by name.
#[must_use]
pub fn relation_field(kind: EntityKind, name: &str) -> Option<RelationField> {
    field(kind, name).and_then(FieldDef::relation)
}
