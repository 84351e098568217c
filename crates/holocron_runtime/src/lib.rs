//! Sessions, configuration, snapshots, REPL, and CLI for Holocron.
//!
//! This crate provides:
//! - [`Session`] - A loaded repository plus engine configuration, answering queries
//! - [`RuntimeConfig`] - TOML configuration for the CLI and REPL
//! - [`Repl`] - Interactive read-eval-print loop
//! - [`serialize`] - `MessagePack` snapshots of a loaded repository
//! - [`logging`] - `tracing` subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod logging;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use logging::init_logging;
pub use repl::Repl;
pub use session::{Session, SessionStats};
