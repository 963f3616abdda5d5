//! Typed response entities for the Twitter REST API.
//!
//! Decoded JSON turns into entities through a [`Context`]:
//! - [`Entity`] and [`Identified`]: construction from an [`Attrs`] mapping,
//!   plus the equality rules (by id, by a natural key, or by full mapping)
//! - [`IdentityMap`]: the optional cache that keeps one live instance per
//!   (type, identity key), behind the [`EntityCache`] seam
//! - [`factory`]: discriminator dispatch for the closed [`Action`], [`Geo`]
//!   and [`Media`] families
//! - [`Lazy`]: the write-once slots every nested relation is memoized in
//! - [`cursor`]: the `-1`/`0` cursor protocol over an injected page fetcher
//!
//! Relations are built on first access and never fail for absent keys; they
//! return `None` or an empty slice instead.

pub mod action;
mod context;
pub mod cursor;
mod direct_message;
mod entities;
mod entity;
pub mod factory;
pub mod geo;
mod help;
mod identity_map;
mod lazy;
mod list;
pub mod media;
mod place;
mod saved_search;
mod trend;
mod tweet;
mod user;

pub use action::{Action, Target};
pub use context::Context;
pub use cursor::{Cursor, CursorPage, PageFetcher};
pub use direct_message::DirectMessage;
pub use entities::{Hashtag, Url, UserMention};
pub use entity::{Entity, IdentityKey, Identified};
pub use factory::Family;
pub use geo::Geo;
pub use help::{Configuration, Language, OEmbed, ProfileBanner, Settings};
pub use identity_map::{CacheKey, EntityCache, IdentityMap, NullCache, SharedEntity};
pub use lazy::Lazy;
pub use list::List;
pub use media::{Media, Size};
pub use place::Place;
pub use saved_search::SavedSearch;
pub use trend::{Suggestion, Trend};
pub use tweet::{Metadata, Tweet};
pub use user::{Relationship, SourceUser, TargetUser, User};

pub use twitter_types::{Attrs, Error, Id, Result};
