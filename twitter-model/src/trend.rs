//! Trending topics and suggested-user categories.

use crate::entity::{Entity, key_equality};
use crate::lazy::{self, Lazy};
use crate::user::User;
use crate::Context;
use std::sync::Arc;
use twitter_types::{Attrs, Result};

/// A trending topic. Equal by `name`.
#[derive(Debug)]
pub struct Trend {
    attrs: Attrs,
}

impl Trend {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn query(&self) -> Option<&str> {
        self.attrs.get_str("query")
    }

    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    pub fn events(&self) -> Option<&serde_json::Value> {
        self.attrs.get("events")
    }

    pub fn promoted_content(&self) -> Option<&serde_json::Value> {
        self.attrs.get("promoted_content")
    }
}

impl Entity for Trend {
    const KIND: &'static str = "Trend";

    fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self { attrs })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

key_equality!(Trend, "name");

/// A suggested-users category. Equal by `slug`.
#[derive(Debug)]
pub struct Suggestion {
    ctx: Context,
    attrs: Attrs,
    users: Lazy<Vec<Arc<User>>>,
}

impl Suggestion {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn slug(&self) -> Option<&str> {
        self.attrs.get_str("slug")
    }

    pub fn size(&self) -> Option<u64> {
        self.attrs.get_u64("size")
    }

    pub fn users(&self) -> Result<&[Arc<User>]> {
        self.users
            .get_or_try_init(|| lazy::many(&self.ctx, &self.attrs, "users"))
            .map(Vec::as_slice)
    }
}

impl Entity for Suggestion {
    const KIND: &'static str = "Suggestion";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            users: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

key_equality!(Suggestion, "slug");
