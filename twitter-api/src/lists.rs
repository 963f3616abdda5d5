//! List calls.
//!
//! Most calls take `(owner?, list, ...)` where the owner defaults to the
//! authenticated user. See [`CallShape`] for the accepted layouts.

use crate::args::Arg;
use crate::batch;
use crate::client::{Client, Pager};
use crate::error::ApiResult;
use crate::resolver::{CallShape, ResolvedCall};
use crate::transport::{Method, Params, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use twitter_model::cursor::Cursor;
use twitter_model::{List, Tweet, User};

pub type ListCursor<'a, T> = Cursor<List, Pager<'a, T>>;
pub type UserCursor<'a, T> = Cursor<User, Pager<'a, T>>;

impl<T: Transport> Client<T> {
    async fn resolve(&self, shape: CallShape, args: Vec<Arg>) -> ApiResult<ResolvedCall> {
        self.resolver().resolve(shape, args).await
    }

    async fn list_object(&self, method: Method, path: &str, shape: CallShape, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        let call = self.resolve(shape, args).await?;
        self.object(method, path, call.params).await
    }

    /// Whether a `(owner?, list, user)` relation exists. Not-found and
    /// forbidden responses read as `false`.
    async fn list_user(&self, path: &str, args: Vec<Arg>) -> ApiResult<bool> {
        let call = self.resolve(CallShape::ListUser, args).await?;
        match self.request(Method::Get, path, call.params).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found_or_forbidden() => {
                debug!(path, error = %err, "list relation absent");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    async fn list_with_users(&self, path: &str, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        let call = self.resolve(CallShape::ListUsers, args).await?;
        let chunk_size = self.config().max_users_per_request;
        batch::dispatch(&call.params, &call.members, chunk_size, |params| {
            self.object::<List>(Method::Post, path, params)
        })
        .await
    }

    /// Lists the user subscribes to, own lists included. Without a user,
    /// the authenticated user's.
    pub async fn lists(&self, args: Vec<Arg>) -> ApiResult<Vec<Arc<List>>> {
        let call = self.resolve(CallShape::User, args).await?;
        self.objects(Method::Get, "/1.1/lists/list.json", call.params).await
    }

    /// Tweets by the members of a list.
    pub async fn list_timeline(&self, args: Vec<Arg>) -> ApiResult<Vec<Arc<Tweet>>> {
        let call = self.resolve(CallShape::List, args).await?;
        self.objects(Method::Get, "/1.1/lists/statuses.json", call.params).await
    }

    pub async fn list_remove_member(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/members/destroy.json", CallShape::ListUser, args)
            .await
    }

    /// Lists the user has been added to.
    pub async fn memberships(&self, args: Vec<Arg>) -> ApiResult<ListCursor<'_, T>> {
        let call = self.resolve(CallShape::UserOrSelf, args).await?;
        self.cursor("lists", Method::Get, "/1.1/lists/memberships.json", call.params)
            .await
    }

    pub async fn list_subscribers(&self, args: Vec<Arg>) -> ApiResult<UserCursor<'_, T>> {
        let call = self.resolve(CallShape::List, args).await?;
        self.cursor("users", Method::Get, "/1.1/lists/subscribers.json", call.params)
            .await
    }

    pub async fn list_subscribe(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/subscribers/create.json", CallShape::List, args)
            .await
    }

    pub async fn list_subscriber(&self, args: Vec<Arg>) -> ApiResult<bool> {
        self.list_user("/1.1/lists/subscribers/show.json", args).await
    }

    pub async fn list_unsubscribe(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/subscribers/destroy.json", CallShape::List, args)
            .await
    }

    /// Adds members in chunks of `max_users_per_request`. The list returned
    /// is the one from the last chunk.
    pub async fn list_add_members(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_with_users("/1.1/lists/members/create_all.json", args).await
    }

    pub async fn list_member(&self, args: Vec<Arg>) -> ApiResult<bool> {
        self.list_user("/1.1/lists/members/show.json", args).await
    }

    pub async fn list_members(&self, args: Vec<Arg>) -> ApiResult<UserCursor<'_, T>> {
        let call = self.resolve(CallShape::List, args).await?;
        self.cursor("users", Method::Get, "/1.1/lists/members.json", call.params)
            .await
    }

    pub async fn list_add_member(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/members/create.json", CallShape::ListUser, args)
            .await
    }

    pub async fn list_destroy(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/destroy.json", CallShape::List, args)
            .await
    }

    pub async fn list_update(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Post, "/1.1/lists/update.json", CallShape::List, args)
            .await
    }

    /// Creates a list owned by the authenticated user.
    pub async fn list_create(&self, name: &str, mut options: Params) -> ApiResult<Arc<List>> {
        options.insert("name".to_string(), Value::from(name));
        self.object(Method::Post, "/1.1/lists/create.json", options).await
    }

    pub async fn list(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_object(Method::Get, "/1.1/lists/show.json", CallShape::List, args)
            .await
    }

    /// Lists the user subscribes to, own lists excluded.
    pub async fn subscriptions(&self, args: Vec<Arg>) -> ApiResult<ListCursor<'_, T>> {
        let call = self.resolve(CallShape::UserOrSelf, args).await?;
        self.cursor("lists", Method::Get, "/1.1/lists/subscriptions.json", call.params)
            .await
    }

    pub async fn list_remove_members(&self, args: Vec<Arg>) -> ApiResult<Arc<List>> {
        self.list_with_users("/1.1/lists/members/destroy_all.json", args).await
    }
}
