//! Integration tests for Layer 1: Storage
//!
//! Tests for the repository, relationship indices, and seed loading.

mod relationships;
mod repository;
mod seed;
