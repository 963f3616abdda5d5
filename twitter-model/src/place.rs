use crate::entity::{Entity, IdentityKey, Identified, id_equality};
use crate::factory;
use crate::geo::Geo;
use crate::lazy::Lazy;
use crate::Context;
use serde_json::Value;
use twitter_types::{Attrs, Error, Id, Result};

/// A named location. Places from the trends API carry a `woeid` instead of an
/// `id`; either one identifies the place.
#[derive(Debug)]
pub struct Place {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    bounding_box: Lazy<Option<Geo>>,
}

impl Place {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.attrs.get_str("full_name")
    }

    pub fn country(&self) -> Option<&str> {
        self.attrs.get_str("country")
    }

    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    pub fn woeid(&self) -> Option<u64> {
        self.attrs.get_u64("woeid")
    }

    pub fn attributes(&self) -> Option<Attrs> {
        self.attrs.get_attrs("attributes")
    }

    pub fn country_code(&self) -> Option<&str> {
        self.attrs
            .get_str("country_code")
            .or_else(|| self.attrs.get_str("countryCode"))
    }

    pub fn parent_id(&self) -> Option<u64> {
        self.attrs.get_u64("parentid")
    }

    /// `place_type`, or the trends API's `placeType.name`.
    pub fn place_type(&self) -> Option<&str> {
        self.attrs.get_str("place_type").or_else(|| {
            self.attrs
                .get("placeType")
                .and_then(|kind| kind.get("name"))
                .and_then(Value::as_str)
        })
    }

    pub fn bounding_box(&self) -> Result<Option<&Geo>> {
        let bounding_box = self
            .bounding_box
            .get_or_try_init(|| match self.attrs.get("bounding_box") {
                Some(value) => factory::resolve_value(&self.ctx, Some(value)).map(Some),
                None => Ok(None),
            })?;
        Ok(bounding_box.as_ref())
    }
}

fn place_id(attrs: &Attrs) -> Option<Id> {
    attrs
        .get("id")
        .or_else(|| attrs.get("woeid"))
        .and_then(Id::from_value)
}

impl Entity for Place {
    const KIND: &'static str = "Place";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = place_id(&attrs).ok_or_else(|| Error::missing("id"))?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            bounding_box: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        place_id(attrs).map(IdentityKey::Id)
    }
}

impl Identified for Place {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(Place);
