use crate::entity::{Entity, IdentityKey, Identified, id_equality, require_id};
use crate::Context;
use chrono::{DateTime, Utc};
use twitter_types::{Attrs, Id, Result};

#[derive(Debug)]
pub struct SavedSearch {
    attrs: Attrs,
    id: Id,
}

impl SavedSearch {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn query(&self) -> Option<&str> {
        self.attrs.get_str("query")
    }

    pub fn position(&self) -> Option<i64> {
        self.attrs.get_i64("position")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(&self.attrs)
    }
}

impl Entity for SavedSearch {
    const KIND: &'static str = "SavedSearch";

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

impl Identified for SavedSearch {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(SavedSearch);
