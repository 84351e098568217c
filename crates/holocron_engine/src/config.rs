//! Configuration for query compilation and execution.

use serde::{Deserialize, Serialize};

/// Depth bound applied when no configuration overrides it.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Limits and switches applied to every query.
///
/// Deserializes from a TOML/JSON table; missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest allowed selection nesting (root selection is depth 1).
    /// `None` removes the configured bound, leaving only the parser's
    /// nesting ceiling.
    pub max_depth: Option<usize>,

    /// Memoize assembled `(entity, selection)` objects within one execution.
    pub memoize: bool,

    /// Longest accepted name filter, in characters.
    pub max_filter_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            memoize: true,
            max_filter_len: 256,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration suited to untrusted input.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_depth: Some(6),
            memoize: true,
            max_filter_len: 64,
        }
    }

    /// Builder method to bound selection depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method to remove the configured depth bound.
    ///
    /// Compilation still stops at [`holocron_language::MAX_NESTING`].
    #[must_use]
    pub fn without_depth_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Builder method to toggle memoization.
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Builder method to set the filter length limit.
    #[must_use]
    pub fn with_max_filter_len(mut self, len: usize) -> Self {
        self.max_filter_len = len;
        self
    }
}
