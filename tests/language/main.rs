//! Integration tests for Layer 2: Language
//!
//! Tests for parsing query text into request trees.

mod parser;
