//! Turning overloaded positional arguments into request parameters.

use crate::args::{self, Arg, Arguments};
use crate::error::{ApiError, ApiResult};
use crate::merge::{self, LIST_KEYS, OWNER_KEYS, USER_KEYS};
use crate::transport::Params;
use async_trait::async_trait;
use tracing::debug;

/// Supplies the authenticated caller's screen name, the default owner for
/// list calls and the default user for membership listings.
#[async_trait]
pub trait CurrentUser: Send + Sync {
    async fn screen_name(&self) -> ApiResult<String>;
}

/// The positional layouts overloaded calls accept. Slots are filled right to
/// left, so leading ones are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `(user?)`. No default.
    User,
    /// `(user?)`, defaulting to the caller.
    UserOrSelf,
    /// `(owner?, list)`.
    List,
    /// `(owner?, list, user)`.
    ListUser,
    /// `(owner?, list, users)`; the members come back unmerged for batching.
    ListUsers,
}

/// The canonical form of an overloaded call.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCall {
    pub params: Params,
    /// Batch members, for [`CallShape::ListUsers`].
    pub members: Vec<Arg>,
}

/// Resolves arguments against a [`CallShape`], asking `current_user` only
/// when a default is actually needed.
pub struct ArgumentResolver<'a> {
    current_user: &'a dyn CurrentUser,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(current_user: &'a dyn CurrentUser) -> Self {
        Self { current_user }
    }

    pub async fn resolve(&self, shape: CallShape, args: Vec<Arg>) -> ApiResult<ResolvedCall> {
        let mut arguments = Arguments::new(args);
        let mut params = arguments.take_options();
        let mut members = Vec::new();

        match shape {
            CallShape::User => merge::merge_user(&mut params, arguments.pop())?,
            CallShape::UserOrSelf => {
                merge::merge_user(&mut params, arguments.pop())?;
                if !merge::has_any(&params, &USER_KEYS) {
                    let me = self.current_user.screen_name().await?;
                    merge::merge_user(&mut params, Some(Arg::Name(me)))?;
                }
            }
            CallShape::List | CallShape::ListUser | CallShape::ListUsers => {
                match shape {
                    CallShape::ListUser => merge::merge_user(&mut params, arguments.pop())?,
                    CallShape::ListUsers => {
                        members = arguments.pop().map(|arg| args::flatten(vec![arg])).unwrap_or_default();
                        if members.is_empty() {
                            return Err(ApiError::InvalidArguments("no members given".into()));
                        }
                    }
                    _ => {}
                }
                merge::merge_list(&mut params, arguments.pop())?;
                if !merge::has_any(&params, &LIST_KEYS) {
                    return Err(ApiError::InvalidArguments("no list given".into()));
                }
                merge::merge_owner(&mut params, arguments.pop())?;
                if !merge::has_any(&params, &OWNER_KEYS) {
                    let me = self.current_user.screen_name().await?;
                    merge::merge_owner(&mut params, Some(Arg::Name(me)))?;
                }
            }
        }

        if !arguments.is_empty() {
            debug!(extra = arguments.len(), ?shape, "ignoring surplus leading arguments");
        }
        Ok(ResolvedCall { params, members })
    }
}
