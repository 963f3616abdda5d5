//! Core type definitions for the Twitter response model.
//!
//! This crate defines the leaf types every other crate builds on:
//! - [`Attrs`]: the decoded JSON object an entity is constructed from
//! - [`Id`]: opaque entity identifiers (numeric ids, place ids)
//! - `created_at` parsing for entities that carry a creation time
//!
//! Domain entities, the identity map and the factories live in
//! `twitter-model`; request plumbing lives in `twitter-api`.

mod attrs;
mod ids;
mod timestamp;

pub use attrs::{hash_value, Attrs};
pub use ids::Id;
pub use timestamp::{created_at, parse_created_at};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning payloads into entities.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required key or sub-mapping was missing at construction time.
    #[error("argument must have :{key} key")]
    Construction { key: String },

    /// `fetch` found no entry for this key while the identity map was enabled.
    #[error("{kind} {key} not found in identity map")]
    IdentityMapMiss { kind: &'static str, key: String },

    /// A discriminator named a variant outside the family's closed set.
    #[error("unknown {family} variant: {name}")]
    UnknownVariant { family: &'static str, name: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl Error {
    /// Shorthand for a missing required key.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Construction { key: key.into() }
    }
}
