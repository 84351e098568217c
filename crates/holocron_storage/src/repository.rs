//! The read-only entity repository.
//!
//! A [`Repository`] is assembled once through a [`RepositoryBuilder`] and is
//! immutable afterwards. It is `Send + Sync`; share it as
//! `Arc<Repository>` between any number of readers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use holocron_foundation::{EntityId, EntityKind, Error, ErrorKind, Result};

use crate::entity::Entity;
use crate::relationship::{Edge, Relation, RelationshipStore};

/// Read access to a catalog of entities and their relations.
///
/// The query engine only reads through this trait, so it runs against any
/// store that can answer these lookups.
pub trait Catalog {
    /// Looks up an entity by identifier.
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// Returns every entity of `kind`, in load order.
    fn all(&self, kind: EntityKind) -> Vec<&Entity>;

    /// Returns the entities of `kind` whose name (title for films) contains
    /// `needle`, ignoring case, in load order. An empty needle matches all.
    fn find_by_name(&self, kind: EntityKind, needle: &str) -> Vec<&Entity>;

    /// Returns the targets of `source` along `relation`, in link order.
    fn targets(&self, source: EntityId, relation: Relation) -> &[EntityId];

    /// Returns the sources pointing at `target` along `relation`, in link order.
    fn sources(&self, target: EntityId, relation: Relation) -> &[EntityId];
}

/// Per-kind load order and lowercase name index.
#[derive(Clone, Debug, Default)]
struct Partition {
    order: Vec<EntityId>,
    names: Vec<String>,
}

impl Partition {
    fn push(&mut self, entity: &Entity) {
        self.order.push(entity.id);
        self.names.push(entity.display_name().to_lowercase());
    }
}

/// Immutable, indexed entity store.
#[derive(Clone, Debug, Default)]
pub struct Repository {
    entities: HashMap<EntityId, Entity>,
    partitions: HashMap<EntityKind, Partition>,
    relationships: RelationshipStore,
}

impl Repository {
    /// Starts building a repository.
    #[must_use]
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::default()
    }

    /// Looks up an entity by kind and kind-local number.
    #[must_use]
    pub fn get_by_id(&self, kind: EntityKind, index: u32) -> Option<&Entity> {
        self.entities.get(&EntityId::new(kind, index))
    }

    /// Looks up an entity by its opaque global id.
    #[must_use]
    pub fn get_by_global_id(&self, global: &str) -> Option<&Entity> {
        EntityId::from_global_id(global).and_then(|id| self.entities.get(&id))
    }

    /// Returns every entity of `kind`, in load order.
    #[must_use]
    pub fn get_all(&self, kind: EntityKind) -> Vec<&Entity> {
        self.partition(kind)
            .map(|p| p.order.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    /// Returns the number of entities of `kind`.
    #[must_use]
    pub fn len(&self, kind: EntityKind) -> usize {
        self.partition(kind).map_or(0, |p| p.order.len())
    }

    /// Returns true if the repository holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the total number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.relationships.edge_count()
    }

    /// Returns the relationship store.
    #[must_use]
    pub const fn relationships(&self) -> &RelationshipStore {
        &self.relationships
    }

    /// Captures the repository contents for serialization.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entities: EntityKind::ALL
                .into_iter()
                .flat_map(|kind| self.get_all(kind))
                .cloned()
                .collect(),
            edges: self.relationships.edges().copied().collect(),
        }
    }

    /// Rebuilds a repository from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot holds duplicate entities or edges
    /// violating a relation's cardinality.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut builder = Self::builder();
        for entity in snapshot.entities {
            builder.insert(entity)?;
        }
        for edge in snapshot.edges {
            builder.link(edge.source, edge.relation, edge.target)?;
        }
        Ok(builder.build())
    }

    fn partition(&self, kind: EntityKind) -> Option<&Partition> {
        self.partitions.get(&kind)
    }
}

impl Catalog for Repository {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn all(&self, kind: EntityKind) -> Vec<&Entity> {
        self.get_all(kind)
    }

    fn find_by_name(&self, kind: EntityKind, needle: &str) -> Vec<&Entity> {
        let Some(partition) = self.partition(kind) else {
            return Vec::new();
        };
        let needle = needle.to_lowercase();
        partition
            .order
            .iter()
            .zip(&partition.names)
            .filter(|(_, name)| name.contains(&needle))
            .filter_map(|(id, _)| self.entities.get(id))
            .collect()
    }

    fn targets(&self, source: EntityId, relation: Relation) -> &[EntityId] {
        self.relationships.targets(source, relation)
    }

    fn sources(&self, target: EntityId, relation: Relation) -> &[EntityId] {
        self.relationships.sources(target, relation)
    }
}

/// Builds a [`Repository`] from entities and edges.
#[derive(Debug, Default)]
pub struct RepositoryBuilder {
    repository: Repository,
}

impl RepositoryBuilder {
    /// Adds an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity with the same identifier was already added.
    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        let repo = &mut self.repository;
        if repo.entities.contains_key(&entity.id) {
            return Err(Error::new(ErrorKind::DuplicateEntity(entity.id)));
        }
        repo.partitions.entry(entity.kind()).or_default().push(&entity);
        repo.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Adds a relation edge. Endpoints need not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint kinds do not match the relation or
    /// a many-to-one relation receives a second target.
    pub fn link(&mut self, source: EntityId, relation: Relation, target: EntityId) -> Result<()> {
        self.repository.relationships.link(source, relation, target)
    }

    /// Freezes the repository.
    ///
    /// Edges whose endpoints were never inserted are kept; they resolve as
    /// absent at query time.
    #[must_use]
    pub fn build(self) -> Repository {
        let repo = self.repository;
        let dangling = repo
            .relationships
            .edges()
            .filter(|edge| !is_resolvable(&repo, edge))
            .inspect(|edge| {
                warn!(
                    source = %edge.source,
                    relation = %edge.relation,
                    target = %edge.target,
                    "dangling edge"
                );
            })
            .count();
        info!(
            entities = repo.entities.len(),
            edges = repo.edge_count(),
            dangling,
            "repository loaded"
        );
        repo
    }
}

fn is_resolvable(repo: &Repository, edge: &Edge) -> bool {
    repo.entities.contains_key(&edge.source) && repo.entities.contains_key(&edge.target)
}

/// Serializable contents of a repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Entities, grouped by kind in load order.
    pub entities: Vec<Entity>,
    /// Edges in link order.
    pub edges: Vec<Edge>,
}
