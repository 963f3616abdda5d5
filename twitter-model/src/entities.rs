//! Text entities extracted from a tweet: hashtags, links, mentions.
//!
//! These only arrive when the request asked for `include_entities`, and none
//! of them has an id of its own, so they compare by their whole mapping.

use crate::entity::{Entity, attrs_equality};
use crate::media::indices;
use crate::Context;
use twitter_types::{Attrs, Id, Result};

#[derive(Debug)]
pub struct Hashtag {
    attrs: Attrs,
}

impl Hashtag {
    /// The tag without its leading `#`.
    pub fn text(&self) -> Option<&str> {
        self.attrs.get_str("text")
    }

    pub fn indices(&self) -> Vec<u64> {
        indices(&self.attrs)
    }
}

#[derive(Debug)]
pub struct Url {
    attrs: Attrs,
}

impl Url {
    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    pub fn expanded_url(&self) -> Option<&str> {
        self.attrs.get_str("expanded_url")
    }

    pub fn display_url(&self) -> Option<&str> {
        self.attrs.get_str("display_url")
    }

    pub fn indices(&self) -> Vec<u64> {
        indices(&self.attrs)
    }
}

#[derive(Debug)]
pub struct UserMention {
    attrs: Attrs,
}

impl UserMention {
    /// The mentioned user's id. Mentions are not deduplicated by it.
    pub fn id(&self) -> Option<Id> {
        self.attrs.get("id").and_then(Id::from_value)
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn screen_name(&self) -> Option<&str> {
        self.attrs.get_str("screen_name")
    }

    pub fn indices(&self) -> Vec<u64> {
        indices(&self.attrs)
    }
}

macro_rules! plain_entity {
    ($($ty:ident => $kind:literal),+ $(,)?) => {$(
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
                Ok(Self { attrs })
            }

            fn attrs(&self) -> &Attrs {
                &self.attrs
            }
        }
    )+};
}

plain_entity! {
    Hashtag => "Entity::Hashtag",
    Url => "Entity::Url",
    UserMention => "Entity::UserMention",
}

attrs_equality!(Hashtag, Url, UserMention);
