use crate::entity::{Entity, IdentityKey, Identified, id_equality, require_id};
use crate::lazy::{self, Lazy};
use crate::user::User;
use crate::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use twitter_types::{Attrs, Id, Result};

/// A curated list of users.
#[derive(Debug)]
pub struct List {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    user: Lazy<Option<Arc<User>>>,
}

impl List {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.attrs.get_str("full_name")
    }

    pub fn slug(&self) -> Option<&str> {
        self.attrs.get_str("slug")
    }

    pub fn description(&self) -> Option<&str> {
        self.attrs.get_str("description")
    }

    /// `"public"` or `"private"`.
    pub fn mode(&self) -> Option<&str> {
        self.attrs.get_str("mode")
    }

    pub fn uri(&self) -> Option<&str> {
        self.attrs.get_str("uri")
    }

    pub fn member_count(&self) -> Option<u64> {
        self.attrs.get_u64("member_count")
    }

    pub fn subscriber_count(&self) -> Option<u64> {
        self.attrs.get_u64("subscriber_count")
    }

    pub fn is_following(&self) -> bool {
        self.attrs.get_bool("following").unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(&self.attrs)
    }

    /// The list's owner.
    pub fn user(&self) -> Result<Option<&Arc<User>>> {
        let user = self
            .user
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "user"))?;
        Ok(user.as_ref())
    }
}

impl Entity for List {
    const KIND: &'static str = "List";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = require_id(&attrs)?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            user: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::id(attrs)
    }
}

impl Identified for List {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(List);
