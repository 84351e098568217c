//! Integration tests for Layer 4: Runtime
//!
//! End-to-end tests through sessions: output shape, determinism,
//! concurrent readers, and snapshot and config loading.

mod concurrency;
mod properties;
mod snapshots;
