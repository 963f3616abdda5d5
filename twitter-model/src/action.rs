//! Activity events from the `activity/about_me` timeline.
//!
//! Every action has `sources` (the users who acted) and `targets` (what they
//! acted on); most also carry `target_objects`, the content that records the
//! action. The concrete entity type behind each relation differs per variant,
//! so each variant spells out its own relations.

use crate::entity::{Entity, attrs_equality};
use crate::factory::{self, Constructor, Family};
use crate::lazy::{self, Lazy};
use crate::list::List;
use crate::tweet::Tweet;
use crate::user::User;
use crate::Context;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use twitter_types::{Attrs, Result};

/// State every action variant shares.
#[derive(Debug)]
struct ActionCore {
    ctx: Context,
    attrs: Attrs,
    sources: Lazy<Vec<Arc<User>>>,
}

impl ActionCore {
    fn new(ctx: &Context, attrs: Attrs) -> Self {
        Self {
            ctx: ctx.clone(),
            attrs,
            sources: Lazy::new(),
        }
    }

    fn sources(&self) -> Result<&[Arc<User>]> {
        self.sources
            .get_or_try_init(|| lazy::many(&self.ctx, &self.attrs, "sources"))
            .map(Vec::as_slice)
    }

    fn relation<'a, T: Entity>(&'a self, slot: &'a Lazy<Vec<Arc<T>>>, key: &str) -> Result<&'a [Arc<T>]> {
        slot.get_or_try_init(|| lazy::many(&self.ctx, &self.attrs, key))
            .map(Vec::as_slice)
    }
}

macro_rules! action_variant {
    ($ty:ident => $kind:literal { $($slot:ident),* }) => {
        impl $ty {
            pub fn created_at(&self) -> Option<DateTime<Utc>> {
                twitter_types::created_at(&self.core.attrs)
            }

            pub fn max_position(&self) -> Option<i64> {
                self.core.attrs.get_i64("max_position")
            }

            pub fn min_position(&self) -> Option<i64> {
                self.core.attrs.get_i64("min_position")
            }

            /// The users who performed the action.
            pub fn sources(&self) -> Result<&[Arc<User>]> {
                self.core.sources()
            }
        }

        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
                Ok(Self {
                    core: ActionCore::new(ctx, attrs),
                    $($slot: Lazy::new(),)*
                })
            }

            fn attrs(&self) -> &Attrs {
                &self.core.attrs
            }
        }

        attrs_equality!($ty);
    };
}

/// Someone favorited a tweet.
#[derive(Debug)]
pub struct Favorite {
    core: ActionCore,
    targets: Lazy<Vec<Arc<Tweet>>>,
}

impl Favorite {
    /// The favorited tweet.
    pub fn targets(&self) -> Result<&[Arc<Tweet>]> {
        self.core.relation(&self.targets, "targets")
    }

    /// Untyped; favorites record no content of their own.
    pub fn target_objects(&self) -> Option<&Value> {
        self.core.attrs.get("target_objects")
    }
}

action_variant!(Favorite => "Action::Favorite" { targets });

/// Someone followed a user.
#[derive(Debug)]
pub struct Follow {
    core: ActionCore,
    targets: Lazy<Vec<Arc<User>>>,
}

impl Follow {
    /// The followed user.
    pub fn targets(&self) -> Result<&[Arc<User>]> {
        self.core.relation(&self.targets, "targets")
    }

    pub fn target_objects(&self) -> Option<&Value> {
        self.core.attrs.get("target_objects")
    }
}

action_variant!(Follow => "Action::Follow" { targets });

/// Someone added a user to a list.
#[derive(Debug)]
pub struct ListMemberAdded {
    core: ActionCore,
    target_objects: Lazy<Vec<Arc<List>>>,
    targets: Lazy<Vec<Arc<User>>>,
}

impl ListMemberAdded {
    /// The lists that were added to.
    pub fn target_objects(&self) -> Result<&[Arc<List>]> {
        self.core.relation(&self.target_objects, "target_objects")
    }

    /// The users who were added.
    pub fn targets(&self) -> Result<&[Arc<User>]> {
        self.core.relation(&self.targets, "targets")
    }
}

action_variant!(ListMemberAdded => "Action::ListMemberAdded" { target_objects, targets });

/// Someone mentioned a user.
#[derive(Debug)]
pub struct Mention {
    core: ActionCore,
    target_objects: Lazy<Vec<Arc<Tweet>>>,
    targets: Lazy<Vec<Arc<User>>>,
}

impl Mention {
    /// The first of [`sources`](Self::sources).
    pub fn source(&self) -> Result<Option<&Arc<User>>> {
        Ok(self.sources()?.first())
    }

    /// The tweets containing the mention.
    pub fn target_objects(&self) -> Result<&[Arc<Tweet>]> {
        self.core.relation(&self.target_objects, "target_objects")
    }

    /// The mentioned user.
    pub fn targets(&self) -> Result<&[Arc<User>]> {
        self.core.relation(&self.targets, "targets")
    }
}

action_variant!(Mention => "Action::Mention" { target_objects, targets });

/// Someone replied to a tweet.
#[derive(Debug)]
pub struct Reply {
    core: ActionCore,
    target_objects: Lazy<Vec<Arc<Tweet>>>,
    targets: Lazy<Vec<Arc<Tweet>>>,
}

impl Reply {
    /// The replies.
    pub fn target_objects(&self) -> Result<&[Arc<Tweet>]> {
        self.core.relation(&self.target_objects, "target_objects")
    }

    /// The replied-to tweets.
    pub fn targets(&self) -> Result<&[Arc<Tweet>]> {
        self.core.relation(&self.targets, "targets")
    }
}

action_variant!(Reply => "Action::Reply" { target_objects, targets });

/// Someone retweeted a user's tweet.
#[derive(Debug)]
pub struct Retweet {
    core: ActionCore,
    target_objects: Lazy<Vec<Arc<Tweet>>>,
    targets: Lazy<Vec<Arc<User>>>,
}

impl Retweet {
    /// The retweets.
    pub fn target_objects(&self) -> Result<&[Arc<Tweet>]> {
        self.core.relation(&self.target_objects, "target_objects")
    }

    /// The retweeted user.
    pub fn targets(&self) -> Result<&[Arc<User>]> {
        self.core.relation(&self.targets, "targets")
    }
}

action_variant!(Retweet => "Action::Retweet" { target_objects, targets });

/// The action family, dispatched on `action`.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum Action {
    Favorite(Arc<Favorite>),
    Follow(Arc<Follow>),
    ListMemberAdded(Arc<ListMemberAdded>),
    Mention(Arc<Mention>),
    Reply(Arc<Reply>),
    Retweet(Arc<Retweet>),
}

impl Action {
    fn core(&self) -> &ActionCore {
        match self {
            Self::Favorite(a) => &a.core,
            Self::Follow(a) => &a.core,
            Self::ListMemberAdded(a) => &a.core,
            Self::Mention(a) => &a.core,
            Self::Reply(a) => &a.core,
            Self::Retweet(a) => &a.core,
        }
    }

    pub fn attrs(&self) -> &Attrs {
        &self.core().attrs
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(self.attrs())
    }

    pub fn sources(&self) -> Result<&[Arc<User>]> {
        self.core().sources()
    }

    /// The kind a target fragment has when it does not name one itself.
    pub fn target_kind(&self) -> &'static str {
        match self {
            Self::Favorite(_) | Self::Reply(_) => "tweet",
            Self::Follow(_) | Self::ListMemberAdded(_) | Self::Mention(_) | Self::Retweet(_) => {
                "user"
            }
        }
    }

    /// The targets as a closed union.
    ///
    /// A fragment's own `type` tag wins; an untagged fragment takes this
    /// variant's [`target_kind`](Self::target_kind). Not memoized; the typed
    /// per-variant `targets` accessors are.
    pub fn targets(&self) -> Result<Vec<Target>> {
        let core = self.core();
        let fragments = match core.attrs.get("targets") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(object @ Value::Object(_)) => vec![object],
            _ => Vec::new(),
        };
        fragments
            .into_iter()
            .filter_map(Value::as_object)
            .map(|map| {
                factory::resolve_or_inherit(&core.ctx, Attrs::from(map.clone()), self.target_kind())
            })
            .collect()
    }
}

fn favorite(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::Favorite)
}

fn follow(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::Follow)
}

fn list_member_added(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::ListMemberAdded)
}

fn mention(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::Mention)
}

fn reply(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::Reply)
}

fn retweet(ctx: &Context, attrs: Attrs) -> Result<Action> {
    ctx.fetch_or_construct(attrs).map(Action::Retweet)
}

impl Family for Action {
    const NAME: &'static str = "Action";
    const FIELD: &'static str = "action";
    const VARIANTS: &'static [(&'static str, Constructor<Self>)] = &[
        ("Favorite", favorite),
        ("Follow", follow),
        ("ListMemberAdded", list_member_added),
        ("Mention", mention),
        ("Reply", reply),
        ("Retweet", retweet),
    ];
}

/// Anything an action can target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Tweet(Arc<Tweet>),
    User(Arc<User>),
    List(Arc<List>),
}

fn target_tweet(ctx: &Context, attrs: Attrs) -> Result<Target> {
    ctx.fetch_or_construct(attrs).map(Target::Tweet)
}

fn target_user(ctx: &Context, attrs: Attrs) -> Result<Target> {
    ctx.fetch_or_construct(attrs).map(Target::User)
}

fn target_list(ctx: &Context, attrs: Attrs) -> Result<Target> {
    ctx.fetch_or_construct(attrs).map(Target::List)
}

impl Family for Target {
    const NAME: &'static str = "Target";
    const FIELD: &'static str = "type";
    const VARIANTS: &'static [(&'static str, Constructor<Self>)] = &[
        ("Tweet", target_tweet),
        ("User", target_user),
        ("List", target_list),
    ];
}
