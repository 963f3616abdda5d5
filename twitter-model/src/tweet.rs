//! Tweets and their search metadata.

use crate::entities::{Hashtag, Url, UserMention};
use crate::entity::{Entity, IdentityKey, Identified, attrs_equality, id_equality, require_id};
use crate::factory;
use crate::geo::Geo;
use crate::lazy::{self, Lazy};
use crate::media::Media;
use crate::place::Place;
use crate::user::User;
use crate::Context;
use chrono::{DateTime, Utc};
use regex_lite::Regex;
use std::sync::{Arc, LazyLock};
use twitter_types::{Attrs, Id, Result};

/// Matches the `RT @name: ` prefix a retweet's own text starts with.
static RT_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(RT @[a-z0-9_]{1,20}: )").ok());

#[derive(Debug)]
pub struct Tweet {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    user: Lazy<Option<Arc<User>>>,
    retweeted_status: Lazy<Option<Arc<Tweet>>>,
    geo: Lazy<Option<Geo>>,
    place: Lazy<Option<Arc<Place>>>,
    metadata: Lazy<Option<Arc<Metadata>>>,
    hashtags: Lazy<Vec<Arc<Hashtag>>>,
    urls: Lazy<Vec<Arc<Url>>>,
    user_mentions: Lazy<Vec<Arc<UserMention>>>,
    media: Lazy<Vec<Media>>,
    full_text: Lazy<Option<String>>,
}

impl Tweet {
    pub fn text(&self) -> Option<&str> {
        self.attrs.get_str("text")
    }

    pub fn source(&self) -> Option<&str> {
        self.attrs.get_str("source")
    }

    pub fn lang(&self) -> Option<&str> {
        self.attrs.get_str("lang")
    }

    pub fn in_reply_to_screen_name(&self) -> Option<&str> {
        self.attrs.get_str("in_reply_to_screen_name")
    }

    pub fn in_reply_to_status_id(&self) -> Option<u64> {
        self.attrs.get_u64("in_reply_to_status_id")
    }

    pub fn in_reply_to_user_id(&self) -> Option<u64> {
        self.attrs.get_u64("in_reply_to_user_id")
    }

    pub fn is_favorited(&self) -> bool {
        self.attrs.get_bool("favorited").unwrap_or(false)
    }

    pub fn is_retweeted(&self) -> bool {
        self.attrs.get_bool("retweeted").unwrap_or(false)
    }

    pub fn is_truncated(&self) -> bool {
        self.attrs.get_bool("truncated").unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(&self.attrs)
    }

    /// The author's screen name: the explicit `from_user` field (search
    /// results carry one), else the embedded user's.
    pub fn from_user(&self) -> Result<Option<String>> {
        if let Some(name) = self.attrs.get_str("from_user") {
            return Ok(Some(name.to_string()));
        }
        Ok(self
            .user()?
            .and_then(|user| user.screen_name())
            .map(str::to_string))
    }

    /// Streaming filter level; `"none"` when unset.
    pub fn filter_level(&self) -> &str {
        self.attrs.get_str("filter_level").unwrap_or("none")
    }

    pub fn favoriters_count(&self) -> Option<i64> {
        self.attrs.get_i64("favoriters_count")
    }

    pub fn repliers_count(&self) -> Option<i64> {
        self.attrs.get_i64("repliers_count")
    }

    pub fn retweeters_count(&self) -> Option<i64> {
        self.attrs
            .get_i64("retweet_count")
            .or_else(|| self.attrs.get_i64("retweeters_count"))
    }

    pub fn is_reply(&self) -> bool {
        self.attrs.contains("in_reply_to_status_id")
    }

    pub fn is_retweet(&self) -> bool {
        self.attrs.contains("retweeted_status")
    }

    pub fn has_entities(&self) -> bool {
        self.attrs.contains("entities")
    }

    pub fn has_user(&self) -> bool {
        self.attrs.contains("user")
    }

    /// The author. The user sees this tweet (minus its `user`) as its status.
    pub fn user(&self) -> Result<Option<&Arc<User>>> {
        let user = self.user.get_or_try_init(|| {
            match self.attrs.nested_without_self("user", "status") {
                Some(attrs) => self.ctx.fetch_or_construct(attrs).map(Some),
                None => Ok(None),
            }
        })?;
        Ok(user.as_ref())
    }

    /// The original tweet when this one is a retweet.
    pub fn retweeted_status(&self) -> Result<Option<&Arc<Tweet>>> {
        let status = self
            .retweeted_status
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "retweeted_status"))?;
        Ok(status.as_ref())
    }

    /// Untruncated text.
    ///
    /// For a retweet this is the `RT @name: ` prefix of this tweet's own
    /// text followed by the original tweet's full text, which the API would
    /// otherwise cut off at the length limit.
    pub fn full_text(&self) -> Result<Option<&str>> {
        let text = self.full_text.get_or_try_init(|| {
            let Some(original) = self.retweeted_status()? else {
                return Ok(self.text().map(str::to_string));
            };
            let prefix = self.text().and_then(retweet_prefix);
            let parts: Vec<&str> = [prefix, original.text()].into_iter().flatten().collect();
            Ok(Some(parts.concat()))
        })?;
        Ok(text.as_deref())
    }

    pub fn geo(&self) -> Result<Option<&Geo>> {
        let geo = self.geo.get_or_try_init(|| match self.attrs.get("geo") {
            Some(value) => factory::resolve_value(&self.ctx, Some(value)).map(Some),
            None => Ok(None),
        })?;
        Ok(geo.as_ref())
    }

    pub fn place(&self) -> Result<Option<&Arc<Place>>> {
        let place = self
            .place
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "place"))?;
        Ok(place.as_ref())
    }

    pub fn metadata(&self) -> Result<Option<&Arc<Metadata>>> {
        let metadata = self
            .metadata
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "metadata"))?;
        Ok(metadata.as_ref())
    }

    /// Requires `include_entities`; see [`has_entities`](Self::has_entities).
    pub fn hashtags(&self) -> Result<&[Arc<Hashtag>]> {
        self.hashtags
            .get_or_try_init(|| self.entities("hashtags", |v| lazy::collect(&self.ctx, v)))
            .map(Vec::as_slice)
    }

    /// Requires `include_entities`.
    pub fn urls(&self) -> Result<&[Arc<Url>]> {
        self.urls
            .get_or_try_init(|| self.entities("urls", |v| lazy::collect(&self.ctx, v)))
            .map(Vec::as_slice)
    }

    /// Requires `include_entities`.
    pub fn user_mentions(&self) -> Result<&[Arc<UserMention>]> {
        self.user_mentions
            .get_or_try_init(|| self.entities("user_mentions", |v| lazy::collect(&self.ctx, v)))
            .map(Vec::as_slice)
    }

    /// Requires `include_entities`.
    pub fn media(&self) -> Result<&[Media]> {
        self.media
            .get_or_try_init(|| self.entities("media", |v| factory::collect(&self.ctx, v)))
            .map(Vec::as_slice)
    }

    fn entities<T>(
        &self,
        key: &str,
        build: impl FnOnce(Option<&serde_json::Value>) -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        lazy::with_entities(&self.attrs, key, "Tweet", build)
    }
}

fn retweet_prefix(text: &str) -> Option<&str> {
    let pattern = RT_PREFIX.as_ref()?;
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl Entity for Tweet {
    const KIND: &'static str = "Tweet";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = require_id(&attrs)?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            user: Lazy::new(),
            retweeted_status: Lazy::new(),
            geo: Lazy::new(),
            place: Lazy::new(),
            metadata: Lazy::new(),
            hashtags: Lazy::new(),
            urls: Lazy::new(),
            user_mentions: Lazy::new(),
            media: Lazy::new(),
            full_text: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::id(attrs)
    }
}

impl Identified for Tweet {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(Tweet);

/// Search metadata attached to a tweet.
#[derive(Debug)]
pub struct Metadata {
    attrs: Attrs,
}

impl Metadata {
    /// `"recent"` or `"popular"`.
    pub fn result_type(&self) -> Option<&str> {
        self.attrs.get_str("result_type")
    }

    pub fn iso_language_code(&self) -> Option<&str> {
        self.attrs.get_str("iso_language_code")
    }
}

impl Entity for Metadata {
    const KIND: &'static str = "Metadata";

    fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self { attrs })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

attrs_equality!(Metadata);
