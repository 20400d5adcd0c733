//! Configuration errors for the legend registry.
//!
//! These are programmer/configuration mistakes, detected once when a registry
//! is built. Per-point data problems are never errors: they simply hide the
//! affected series.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two descriptors share the same display name.
    #[error("duplicate series name in legend registry: {name:?}")]
    DuplicateName { name: String },

    /// A descriptor has an empty (or whitespace-only) name.
    #[error("legend registry entry #{index} has an empty name")]
    EmptyName { index: usize },

    /// A descriptor was not assigned to any category.
    #[error("series {name:?} is not assigned to a category")]
    MissingCategory { name: String },

    /// A descriptor names a category outside the fixed set.
    #[error("series {name:?} has unknown category {category:?}")]
    UnknownCategory { name: String, category: String },
}
