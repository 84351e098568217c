//! Integration tests for Layer 3: Engine
//!
//! Tests for query compilation, relationship resolution, and execution
//! driven from query text against the bundled catalog.

mod queries;
mod validation;
