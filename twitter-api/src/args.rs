//! Positional arguments for overloaded calls.
//!
//! Calls such as `list_member` accept `(list, user)`, `(owner, list, user)`
//! or either of those followed by an options mapping, with every identifier
//! given as a numeric id, a name, or an entity. [`Arguments`] holds such a
//! list; the [`resolver`](crate::resolver) decides what each slot means.

use crate::transport::Params;
use std::sync::Arc;
use twitter_model::{List, User};

/// One positional argument.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A numeric id.
    Id(u64),
    /// A screen name or list slug.
    Name(String),
    User(Arc<User>),
    List(Arc<List>),
    /// A collection, as batch calls take.
    Many(Vec<Arg>),
    /// A trailing options mapping.
    Options(Params),
}

impl From<u64> for Arg {
    fn from(id: u64) -> Self {
        Arg::Id(id)
    }
}

impl From<&str> for Arg {
    fn from(name: &str) -> Self {
        Arg::Name(name.to_string())
    }
}

impl From<String> for Arg {
    fn from(name: String) -> Self {
        Arg::Name(name)
    }
}

impl From<Arc<User>> for Arg {
    fn from(user: Arc<User>) -> Self {
        Arg::User(user)
    }
}

impl From<Arc<List>> for Arg {
    fn from(list: Arc<List>) -> Self {
        Arg::List(list)
    }
}

impl From<Params> for Arg {
    fn from(options: Params) -> Self {
        Arg::Options(options)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Builds a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use twitter_api::args;
/// let args = args![7505382u64, "team"];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Arg>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// A positional argument list with its trailing options split off.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    positional: Vec<Arg>,
    options: Params,
}

impl Arguments {
    /// Splits off the last element when it is an options mapping.
    pub fn new(mut args: Vec<Arg>) -> Self {
        let options = match args.pop() {
            Some(Arg::Options(options)) => options,
            Some(other) => {
                args.push(other);
                Params::new()
            }
            None => Params::new(),
        };
        Self {
            positional: args,
            options,
        }
    }

    /// Removes and returns the rightmost positional argument.
    pub fn pop(&mut self) -> Option<Arg> {
        self.positional.pop()
    }

    pub fn options(&self) -> &Params {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Params {
        &mut self.options
    }

    /// Hands the options over, leaving an empty mapping behind.
    pub fn take_options(&mut self) -> Params {
        std::mem::take(&mut self.options)
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// The remaining positional arguments with nested collections expanded,
    /// in order.
    pub fn flatten(self) -> Vec<Arg> {
        flatten(self.positional)
    }
}

/// Expands nested [`Arg::Many`] collections in place.
pub fn flatten(args: Vec<Arg>) -> Vec<Arg> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Arg::Many(items) => out.extend(flatten(items)),
            other => out.push(other),
        }
    }
    out
}
