//! Integration tests for request validation
//!
//! Invalid requests are rejected before the catalog is read.

use std::cell::Cell;

use holocron_engine::config::DEFAULT_MAX_DEPTH;
use holocron_engine::{EngineConfig, QueryCompiler, QueryExecutor};
use holocron_foundation::{EntityId, EntityKind, ErrorKind, Result, SemanticLimit, Value};
use holocron_language::{QueryRequest, Selection, parse};
use holocron_storage::seed::load_bundled;
use holocron_storage::{Catalog, Entity, Relation, Repository};

/// Delegates to a repository, counting every read.
struct CountingCatalog {
    inner: Repository,
    reads: Cell<usize>,
}

impl CountingCatalog {
    fn new() -> Self {
        Self {
            inner: load_bundled().unwrap(),
            reads: Cell::new(0),
        }
    }

    fn touch(&self) {
        self.reads.set(self.reads.get() + 1);
    }

    fn run(&self, source: &str, config: &EngineConfig) -> Result<Value> {
        let document = QueryCompiler::compile_document(&parse(source)?, config)?;
        QueryExecutor::execute_document(&document, self, config)
    }
}

impl Catalog for CountingCatalog {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.touch();
        self.inner.get(id)
    }

    fn all(&self, kind: EntityKind) -> Vec<&Entity> {
        self.touch();
        self.inner.all(kind)
    }

    fn find_by_name(&self, kind: EntityKind, needle: &str) -> Vec<&Entity> {
        self.touch();
        self.inner.find_by_name(kind, needle)
    }

    fn targets(&self, source: EntityId, relation: Relation) -> &[EntityId] {
        self.touch();
        self.inner.targets(source, relation)
    }

    fn sources(&self, target: EntityId, relation: Relation) -> &[EntityId] {
        self.touch();
        self.inner.sources(target, relation)
    }
}

fn rejected(source: &str) -> (ErrorKind, Option<String>) {
    rejected_with(source, &EngineConfig::default())
}

fn rejected_with(source: &str, config: &EngineConfig) -> (ErrorKind, Option<String>) {
    let catalog = CountingCatalog::new();
    let err = catalog.run(source, config).unwrap_err();
    assert_eq!(catalog.reads.get(), 0, "catalog read for {source}");
    (err.kind, err.path)
}

#[test]
fn valid_queries_do_read() {
    let catalog = CountingCatalog::new();
    catalog
        .run("people { homeworld { name } }", &EngineConfig::default())
        .unwrap();
    assert!(catalog.reads.get() > 0);
}

#[test]
fn furlong_is_rejected_untouched() {
    let (kind, path) = rejected("people { homeworld { diameter(unit: FURLONG) } }");
    assert!(
        matches!(&kind, ErrorKind::UnsupportedUnit { field, unit } if field == "diameter" && unit == "FURLONG"),
        "{kind:?}"
    );
    assert_eq!(path.as_deref(), Some("people.homeworld.diameter"));
}

#[test]
fn mass_unit_on_a_length_field() {
    let (kind, _) = rejected("people { height(unit: KILOGRAM) }");
    assert!(matches!(kind, ErrorKind::UnsupportedUnit { .. }));
}

#[test]
fn late_errors_still_reject_the_whole_document() {
    let (kind, path) = rejected("{ films { title } people { starships { warpFactor } } }");
    assert!(matches!(kind, ErrorKind::UnknownField { .. }));
    assert_eq!(path.as_deref(), Some("people.starships.warpFactor"));
}

#[test]
fn unknown_root() {
    assert!(matches!(rejected("droids { name }").0, ErrorKind::UnknownKind(_)));
}

#[test]
fn selection_shape_errors() {
    assert!(matches!(
        rejected("people { homeworld }").0,
        ErrorKind::MissingSelection(_)
    ));
    assert!(matches!(
        rejected("people { name { first } }").0,
        ErrorKind::UnexpectedSelection(_)
    ));
    assert!(matches!(
        rejected("people { name name }").0,
        ErrorKind::DuplicateField(_)
    ));
}

#[test]
fn argument_errors() {
    assert!(matches!(
        rejected("people(title: \"x\") { name }").0,
        ErrorKind::UnknownArgument { .. }
    ));
    assert!(matches!(
        rejected("people(name: 7) { name }").0,
        ErrorKind::MalformedFilter(_)
    ));
    assert!(matches!(
        rejected("people(id: 1, name: \"Luke\") { name }").0,
        ErrorKind::InvalidArgument { .. }
    ));
    assert!(matches!(
        rejected("planet(id: \"cGVvcGxlOjE=\") { name }").0,
        ErrorKind::InvalidArgument { .. }
    ));
}

#[test]
fn limits() {
    let config = EngineConfig::default().with_max_depth(2).with_max_filter_len(4);
    assert!(matches!(
        rejected_with("people { homeworld { residents { name } } }", &config).0,
        ErrorKind::LimitExceeded(SemanticLimit::MaxDepth { limit: 2 })
    ));
    assert!(matches!(
        rejected_with("people(name: \"Skywalker\") { name }", &config).0,
        ErrorKind::LimitExceeded(SemanticLimit::MaxFilterLength { limit: 4 })
    ));
}

#[test]
fn parse_errors_reject_before_compilation() {
    assert!(matches!(
        rejected("people { name").0,
        ErrorKind::ParseError { .. }
    ));
}

fn nested(pairs: usize) -> String {
    format!(
        "people {{ {}name{} }}",
        "homeworld { residents { ".repeat(pairs),
        " } }".repeat(pairs)
    )
}

#[test]
fn deep_text_is_rejected_not_overflowed() {
    assert!(matches!(
        rejected(&nested(5_000)).0,
        ErrorKind::ParseError { .. }
    ));
    assert!(matches!(
        rejected_with(&nested(10), &EngineConfig::strict()).0,
        ErrorKind::LimitExceeded(SemanticLimit::MaxDepth { limit: 6 })
    ));
    assert!(matches!(
        rejected(&nested(DEFAULT_MAX_DEPTH)).0,
        ErrorKind::LimitExceeded(SemanticLimit::MaxDepth { .. })
    ));
}

#[test]
fn deep_built_requests_hit_the_default_limit() {
    let mut deep = Selection::field("name");
    for _ in 0..100 {
        deep = Selection::field("homeworld")
            .with_field(Selection::field("residents").with_field(deep));
    }
    let request = QueryRequest::new("people").with_field(deep);
    let err = QueryCompiler::compile(&request, &EngineConfig::default()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxDepth { limit: DEFAULT_MAX_DEPTH })
    ));
}
