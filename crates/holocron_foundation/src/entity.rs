//! Entity kinds and kind-partitioned identifiers.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// The six kinds of entity in the catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// A film in the saga.
    Film,
    /// A character.
    Person,
    /// A planet.
    Planet,
    /// A species.
    Species,
    /// A hyperdrive-capable starship.
    Starship,
    /// A vehicle without hyperdrive.
    Vehicle,
}

impl EntityKind {
    /// Every kind, in load order.
    pub const ALL: [Self; 6] = [
        Self::Film,
        Self::Person,
        Self::Planet,
        Self::Species,
        Self::Starship,
        Self::Vehicle,
    ];

    /// Returns the type name (e.g. `Person`).
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Film => "Film",
            Self::Person => "Person",
            Self::Planet => "Planet",
            Self::Species => "Species",
            Self::Starship => "Starship",
            Self::Vehicle => "Vehicle",
        }
    }

    /// Returns the collection name (e.g. `people`).
    ///
    /// This is also the prefix used inside global identifiers.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Film => "films",
            Self::Person => "people",
            Self::Planet => "planets",
            Self::Species => "species",
            Self::Starship => "starships",
            Self::Vehicle => "vehicles",
        }
    }

    /// Returns the `all*` root name (e.g. `allPeople`).
    #[must_use]
    pub const fn all_name(self) -> &'static str {
        match self {
            Self::Film => "allFilms",
            Self::Person => "allPeople",
            Self::Planet => "allPlanets",
            Self::Species => "allSpecies",
            Self::Starship => "allStarships",
            Self::Vehicle => "allVehicles",
        }
    }

    /// Returns the attribute searched by name filters.
    ///
    /// Films are filtered by `title`, everything else by `name`.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::Film => "title",
            _ => "name",
        }
    }

    /// Parses a collection name (`films`, `people`, ...).
    #[must_use]
    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == name)
    }

    /// Parses any accepted root designator.
    ///
    /// Accepts the type name in any case (`Person`, `person`), the
    /// collection name (`people`) and the all-form (`allPeople`).
    #[must_use]
    pub fn from_designator(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| {
            k.type_name().eq_ignore_ascii_case(name)
                || k.collection() == name
                || k.all_name() == name
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Identifier of an entity within its kind's namespace.
///
/// The public form is the opaque global id: base64 of `<collection>:<index>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    /// The kind partition this identifier lives in.
    pub kind: EntityKind,
    /// Kind-local index, as assigned by the source data.
    pub index: u32,
}

impl EntityId {
    /// Creates a new entity ID.
    #[must_use]
    pub const fn new(kind: EntityKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// Returns the opaque global identifier.
    #[must_use]
    pub fn global_id(self) -> String {
        STANDARD.encode(self.to_string())
    }

    /// Decodes an opaque global identifier.
    ///
    /// Returns `None` for anything that is not base64 of `<collection>:<index>`.
    #[must_use]
    pub fn from_global_id(global: &str) -> Option<Self> {
        let bytes = STANDARD.decode(global).ok()?;
        let raw = String::from_utf8(bytes).ok()?;
        let (collection, index) = raw.split_once(':')?;
        let kind = EntityKind::from_collection(collection)?;
        let index = index.parse().ok()?;
        Some(Self::new(kind, index))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}:{})", self.kind.collection(), self.index)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.collection(), self.index)
    }
}
