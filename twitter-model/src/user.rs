//! Users, and the two sides of a friendship lookup.

use crate::entity::{Entity, IdentityKey, Identified, attrs_equal, id_equality, require_id};
use crate::lazy::{self, Lazy};
use crate::tweet::Tweet;
use crate::Context;
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use twitter_types::{Attrs, Error, Id, Result};

#[derive(Debug)]
pub struct User {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    status: Lazy<Option<Arc<Tweet>>>,
}

impl User {
    pub fn screen_name(&self) -> Option<&str> {
        self.attrs.get_str("screen_name")
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.attrs.get_str("description")
    }

    pub fn location(&self) -> Option<&str> {
        self.attrs.get_str("location")
    }

    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    pub fn lang(&self) -> Option<&str> {
        self.attrs.get_str("lang")
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.attrs.get_str("time_zone")
    }

    pub fn profile_image_url(&self) -> Option<&str> {
        self.attrs.get_str("profile_image_url")
    }

    pub fn profile_image_url_https(&self) -> Option<&str> {
        self.attrs.get_str("profile_image_url_https")
    }

    pub fn followers_count(&self) -> Option<u64> {
        self.attrs.get_u64("followers_count")
    }

    pub fn friends_count(&self) -> Option<u64> {
        self.attrs.get_u64("friends_count")
    }

    pub fn statuses_count(&self) -> Option<u64> {
        self.attrs.get_u64("statuses_count")
    }

    pub fn listed_count(&self) -> Option<u64> {
        self.attrs.get_u64("listed_count")
    }

    pub fn favourites_count(&self) -> Option<u64> {
        self.attrs.get_u64("favourites_count")
    }

    pub fn is_following(&self) -> bool {
        self.attrs.get_bool("following").unwrap_or(false)
    }

    pub fn is_protected(&self) -> bool {
        self.attrs.get_bool("protected").unwrap_or(false)
    }

    pub fn is_verified(&self) -> bool {
        self.attrs.get_bool("verified").unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(&self.attrs)
    }

    pub fn has_status(&self) -> bool {
        self.attrs.contains("status")
    }

    /// The user's most recent tweet. The tweet sees this user as its author.
    pub fn status(&self) -> Result<Option<&Arc<Tweet>>> {
        let status = self.status.get_or_try_init(|| {
            match self.attrs.nested_without_self("status", "user") {
                Some(attrs) => self.ctx.fetch_or_construct(attrs).map(Some),
                None => Ok(None),
            }
        })?;
        Ok(status.as_ref())
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = require_id(&attrs)?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            status: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::id(attrs)
    }
}

impl Identified for User {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// The authenticating side of a [`Relationship`].
#[derive(Debug)]
pub struct SourceUser {
    attrs: Attrs,
    id: Id,
}

impl SourceUser {
    pub fn screen_name(&self) -> Option<&str> {
        self.attrs.get_str("screen_name")
    }

    pub fn is_following(&self) -> bool {
        self.flag("following")
    }

    pub fn is_followed_by(&self) -> bool {
        self.flag("followed_by")
    }

    pub fn is_blocking(&self) -> bool {
        self.flag("blocking")
    }

    pub fn can_dm(&self) -> bool {
        self.flag("can_dm")
    }

    pub fn all_replies(&self) -> bool {
        self.flag("all_replies")
    }

    pub fn marked_spam(&self) -> bool {
        self.flag("marked_spam")
    }

    pub fn notifications_enabled(&self) -> bool {
        self.flag("notifications_enabled")
    }

    pub fn want_retweets(&self) -> bool {
        self.flag("want_retweets")
    }

    fn flag(&self, key: &str) -> bool {
        self.attrs.get_bool(key).unwrap_or(false)
    }
}

/// The other side of a [`Relationship`].
#[derive(Debug)]
pub struct TargetUser {
    attrs: Attrs,
    id: Id,
}

impl TargetUser {
    pub fn screen_name(&self) -> Option<&str> {
        self.attrs.get_str("screen_name")
    }

    pub fn is_following(&self) -> bool {
        self.attrs.get_bool("following").unwrap_or(false)
    }

    pub fn is_followed_by(&self) -> bool {
        self.attrs.get_bool("followed_by").unwrap_or(false)
    }
}

macro_rules! basic_user {
    ($($ty:ident => $kind:literal),+ $(,)?) => {$(
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
                let id = require_id(&attrs)?;
                Ok(Self { attrs, id })
            }

            fn attrs(&self) -> &Attrs {
                &self.attrs
            }

            fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
                IdentityKey::id(attrs)
            }
        }

        impl Identified for $ty {
            fn id(&self) -> &Id {
                &self.id
            }
        }
    )+};
}

basic_user! {
    SourceUser => "SourceUser",
    TargetUser => "TargetUser",
}

id_equality!(User, SourceUser, TargetUser);

/// The friendship between two users, as `friendships/show` reports it.
///
/// Built from a payload whose `relationship` key holds the actual mapping;
/// that inner mapping becomes the entity's attributes. The mapping can be
/// refreshed in place with [`update`](Self::update), so a cached instance
/// shared through an `Arc` stays current.
#[derive(Debug)]
pub struct Relationship {
    ctx: Context,
    /// The mapping as constructed. It fixes the identity key, which does not
    /// move when the relationship is updated.
    attrs: Attrs,
    state: RwLock<RelationshipState>,
}

#[derive(Debug)]
struct RelationshipState {
    attrs: Attrs,
    source: Lazy<Option<Arc<SourceUser>>>,
    target: Lazy<Option<Arc<TargetUser>>>,
}

impl Relationship {
    fn state(&self) -> RwLockReadGuard<'_, RelationshipState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current mapping, updates included.
    pub fn current(&self) -> Attrs {
        self.state().attrs.clone()
    }

    pub fn source(&self) -> Result<Option<Arc<SourceUser>>> {
        let state = self.state();
        let source = state
            .source
            .get_or_try_init(|| lazy::one(&self.ctx, &state.attrs, "source"))?;
        Ok(source.clone())
    }

    pub fn target(&self) -> Result<Option<Arc<TargetUser>>> {
        let state = self.state();
        let target = state
            .target
            .get_or_try_init(|| lazy::one(&self.ctx, &state.attrs, "target"))?;
        Ok(target.clone())
    }

    /// Merges a newer `{"relationship": {..}}` payload into this one.
    ///
    /// A payload without `relationship` leaves the entity untouched. The
    /// memoized `source` and `target` are rebuilt on next access.
    pub fn update(&self, attrs: Attrs) -> &Self {
        if let Some(inner) = attrs.get_attrs("relationship") {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.attrs.update(inner);
            state.source.reset();
            state.target.reset();
        }
        self
    }
}

impl Entity for Relationship {
    const KIND: &'static str = "Relationship";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let inner = attrs
            .get_attrs("relationship")
            .ok_or_else(|| Error::missing("relationship"))?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs: inner.clone(),
            state: RwLock::new(RelationshipState {
                attrs: inner,
                source: Lazy::new(),
                target: Lazy::new(),
            }),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Keyed on the inner mapping, so a fresh payload and a constructed
    /// entity agree.
    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        match attrs.get_attrs("relationship") {
            Some(inner) => IdentityKey::attrs(&inner),
            None => IdentityKey::attrs(attrs),
        }
    }
}

// Compared on the current mapping.
impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        attrs_equal(&self.current(), &other.current())
    }
}

impl std::hash::Hash for Relationship {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.state().attrs, state);
    }
}
