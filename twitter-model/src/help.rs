//! Service metadata: configuration, languages, account settings, embeds and
//! banners.

use crate::entity::{Entity, attrs_equality};
use crate::lazy::{self, Lazy};
use crate::media::Size;
use crate::place::Place;
use crate::Context;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use twitter_types::{Attrs, Result};

/// Limits and reserved paths the service currently enforces.
#[derive(Debug)]
pub struct Configuration {
    ctx: Context,
    attrs: Attrs,
    photo_sizes: Lazy<BTreeMap<String, Arc<Size>>>,
}

impl Configuration {
    pub fn characters_reserved_per_media(&self) -> Option<u64> {
        self.attrs.get_u64("characters_reserved_per_media")
    }

    pub fn max_media_per_upload(&self) -> Option<u64> {
        self.attrs.get_u64("max_media_per_upload")
    }

    pub fn photo_size_limit(&self) -> Option<u64> {
        self.attrs.get_u64("photo_size_limit")
    }

    pub fn short_url_length(&self) -> Option<u64> {
        self.attrs.get_u64("short_url_length")
    }

    pub fn short_url_length_https(&self) -> Option<u64> {
        self.attrs.get_u64("short_url_length_https")
    }

    /// Paths that can never be used as screen names.
    pub fn non_username_paths(&self) -> Vec<&str> {
        self.attrs
            .get_array("non_username_paths")
            .map(|paths| paths.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn photo_sizes(&self) -> Result<&BTreeMap<String, Arc<Size>>> {
        self.photo_sizes
            .get_or_try_init(|| lazy::size_map(&self.ctx, &self.attrs, "photo_sizes"))
    }
}

/// A language the web interface is translated into.
#[derive(Debug)]
pub struct Language {
    attrs: Attrs,
}

impl Language {
    pub fn code(&self) -> Option<&str> {
        self.attrs.get_str("code")
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    pub fn status(&self) -> Option<&str> {
        self.attrs.get_str("status")
    }
}

/// Embeddable HTML for a tweet.
#[derive(Debug)]
pub struct OEmbed {
    attrs: Attrs,
}

impl OEmbed {
    pub fn html(&self) -> Option<&str> {
        self.attrs.get_str("html")
    }

    pub fn url(&self) -> Option<&str> {
        self.attrs.get_str("url")
    }

    pub fn author_name(&self) -> Option<&str> {
        self.attrs.get_str("author_name")
    }

    pub fn author_url(&self) -> Option<&str> {
        self.attrs.get_str("author_url")
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.attrs.get_str("provider_name")
    }

    pub fn provider_url(&self) -> Option<&str> {
        self.attrs.get_str("provider_url")
    }

    /// The oEmbed resource type, normally `"rich"`.
    pub fn kind(&self) -> Option<&str> {
        self.attrs.get_str("type")
    }

    pub fn version(&self) -> Option<&str> {
        self.attrs.get_str("version")
    }

    pub fn cache_age(&self) -> Option<u64> {
        self.attrs.get_u64("cache_age")
    }

    pub fn height(&self) -> Option<u64> {
        self.attrs.get_u64("height")
    }

    pub fn width(&self) -> Option<u64> {
        self.attrs.get_u64("width")
    }
}

#[derive(Debug)]
pub struct ProfileBanner {
    ctx: Context,
    attrs: Attrs,
    sizes: Lazy<BTreeMap<String, Arc<Size>>>,
}

impl ProfileBanner {
    /// Renditions by name (`web`, `mobile_retina`, ...).
    pub fn sizes(&self) -> Result<&BTreeMap<String, Arc<Size>>> {
        self.sizes
            .get_or_try_init(|| lazy::size_map(&self.ctx, &self.attrs, "sizes"))
    }
}

/// The authenticated account's settings.
#[derive(Debug)]
pub struct Settings {
    ctx: Context,
    attrs: Attrs,
    trend_location: Lazy<Option<Arc<Place>>>,
}

impl Settings {
    pub fn screen_name(&self) -> Option<&str> {
        self.attrs.get_str("screen_name")
    }

    pub fn language(&self) -> Option<&str> {
        self.attrs.get_str("language")
    }

    pub fn time_zone(&self) -> Option<&Value> {
        self.attrs.get("time_zone")
    }

    pub fn sleep_time(&self) -> Option<&Value> {
        self.attrs.get("sleep_time")
    }

    pub fn always_use_https(&self) -> bool {
        self.flag("always_use_https")
    }

    pub fn discoverable_by_email(&self) -> bool {
        self.flag("discoverable_by_email")
    }

    pub fn geo_enabled(&self) -> bool {
        self.flag("geo_enabled")
    }

    pub fn is_protected(&self) -> bool {
        self.flag("protected")
    }

    pub fn show_all_inline_media(&self) -> bool {
        self.flag("show_all_inline_media")
    }

    /// The place trends are reported for: the first entry of
    /// `trend_location`.
    pub fn trend_location(&self) -> Result<Option<&Arc<Place>>> {
        let place = self.trend_location.get_or_try_init(|| {
            let first = match self.attrs.get("trend_location") {
                Some(Value::Array(places)) => places.first(),
                other => other,
            };
            match first {
                Some(value) => self.ctx.fetch_or_construct_value(value),
                None => Ok(None),
            }
        })?;
        Ok(place.as_ref())
    }

    fn flag(&self, key: &str) -> bool {
        self.attrs.get_bool(key).unwrap_or(false)
    }
}

macro_rules! help_entity {
    ($ty:ident => $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
                Ok(Self { attrs })
            }

            fn attrs(&self) -> &Attrs {
                &self.attrs
            }
        }
    };
    ($ty:ident => $kind:literal, $slot:ident) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
                Ok(Self {
                    ctx: ctx.clone(),
                    attrs,
                    $slot: Lazy::new(),
                })
            }

            fn attrs(&self) -> &Attrs {
                &self.attrs
            }
        }
    };
}

help_entity!(Configuration => "Configuration", photo_sizes);
help_entity!(Language => "Language");
help_entity!(OEmbed => "OEmbed");
help_entity!(ProfileBanner => "ProfileBanner", sizes);
help_entity!(Settings => "Settings", trend_location);

attrs_equality!(Configuration, Language, OEmbed, ProfileBanner, Settings);
