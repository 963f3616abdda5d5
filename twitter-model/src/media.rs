//! Media attached to tweets.

use crate::entity::{Entity, IdentityKey, Identified, id_equality, key_equality, require_id};
use crate::factory::{Constructor, Family};
use crate::lazy::{self, Lazy};
use crate::Context;
use std::collections::BTreeMap;
use std::sync::Arc;
use twitter_types::{Attrs, Id, Result};

/// One rendition size of a photo or banner. Equal by `h` and `w`.
#[derive(Debug)]
pub struct Size {
    attrs: Attrs,
}

impl Size {
    pub fn h(&self) -> Option<u64> {
        self.attrs.get_u64("h")
    }

    pub fn w(&self) -> Option<u64> {
        self.attrs.get_u64("w")
    }

    /// `"fit"` or `"crop"`.
    pub fn resize(&self) -> Option<&str> {
        self.attrs.get_str("resize")
    }
}

impl Entity for Size {
    const KIND: &'static str = "Size";

    fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self { attrs })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

key_equality!(Size, "h", "w");

#[derive(Debug)]
pub struct Photo {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    sizes: Lazy<BTreeMap<String, Arc<Size>>>,
}

impl Photo {
    pub fn display_url(&self) -> Option<&str> {
        self.attrs.get_str("display_url")
    }

    pub fn expanded_url(&self) -> Option<&str> {
        self.attrs.get_str("expanded_url")
    }

    pub fn media_url(&self) -> Option<&str> {
        self.attrs.get_str("media_url")
    }

    pub fn media_url_https(&self) -> Option<&str> {
        self.attrs.get_str("media_url_https")
    }

    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    /// Start and end offsets of the media link within the tweet text.
    pub fn indices(&self) -> Vec<u64> {
        indices(&self.attrs)
    }

    /// Renditions by name (`thumb`, `small`, `medium`, `large`).
    pub fn sizes(&self) -> Result<&BTreeMap<String, Arc<Size>>> {
        self.sizes
            .get_or_try_init(|| lazy::size_map(&self.ctx, &self.attrs, "sizes"))
    }
}

impl Entity for Photo {
    const KIND: &'static str = "Media::Photo";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = require_id(&attrs)?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            sizes: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::id(attrs)
    }
}

impl Identified for Photo {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(Photo);

/// The media family, dispatched on `type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Media {
    Photo(Arc<Photo>),
}

impl Media {
    pub fn id(&self) -> &Id {
        match self {
            Self::Photo(photo) => photo.id(),
        }
    }

    pub fn attrs(&self) -> &Attrs {
        match self {
            Self::Photo(photo) => photo.attrs(),
        }
    }

    pub fn as_photo(&self) -> Option<&Arc<Photo>> {
        match self {
            Self::Photo(photo) => Some(photo),
        }
    }
}

fn photo(ctx: &Context, attrs: Attrs) -> Result<Media> {
    ctx.fetch_or_construct(attrs).map(Media::Photo)
}

impl Family for Media {
    const NAME: &'static str = "Media";
    const FIELD: &'static str = "type";
    const VARIANTS: &'static [(&'static str, Constructor<Self>)] = &[("Photo", photo)];
}

pub(crate) fn indices(attrs: &Attrs) -> Vec<u64> {
    attrs
        .get_array("indices")
        .map(|items| items.iter().filter_map(serde_json::Value::as_u64).collect())
        .unwrap_or_default()
}
