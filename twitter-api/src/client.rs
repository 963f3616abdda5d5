//! The API client: configuration, an entity [`Context`] and a [`Transport`].

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::resolver::{ArgumentResolver, CurrentUser};
use crate::transport::{Method, Params, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;
use twitter_model::cursor::{Cursor, CursorPage, PageFetcher, START};
use twitter_model::{Context, Entity, IdentityMap, User};
use twitter_types::{Attrs, Error};

pub struct Client<T> {
    transport: T,
    ctx: Context,
    config: ClientConfig,
    screen_name: OnceCell<String>,
}

impl<T: Transport> Client<T> {
    /// Builds a client whose entities go through a private identity map when
    /// `config.identity_map` is set, and are never cached otherwise.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let ctx = if config.identity_map {
            Context::new(Arc::new(IdentityMap::new()))
        } else {
            Context::uncached()
        };
        Self::with_context(transport, config, ctx)
    }

    /// Builds a client that shares an existing context, e.g.
    /// [`Context::global`].
    pub fn with_context(transport: T, config: ClientConfig, ctx: Context) -> Self {
        Self {
            transport,
            ctx,
            config,
            screen_name: OnceCell::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn resolver(&self) -> ArgumentResolver<'_> {
        ArgumentResolver::new(self)
    }

    /// Issues a raw request and returns the decoded body.
    pub async fn request(&self, method: Method, path: &str, params: Params) -> ApiResult<Value> {
        debug!(%method, path, "request");
        self.transport.perform_request(method, path, params).await
    }

    /// The authenticated user.
    pub async fn verify_credentials(&self) -> ApiResult<Arc<User>> {
        self.object(Method::Get, "/1.1/account/verify_credentials.json", Params::new())
            .await
    }

    /// Requests a single object.
    pub(crate) async fn object<E: Entity>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> ApiResult<Arc<E>> {
        let body = self.request(method, path, params).await?;
        let attrs = Attrs::from_value(body, E::KIND)?;
        Ok(self.ctx.fetch_or_construct(attrs)?)
    }

    /// Requests an array of objects. `null` elements are dropped.
    pub(crate) async fn objects<E: Entity>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> ApiResult<Vec<Arc<E>>> {
        let body = self.request(method, path, params).await?;
        let Value::Array(items) = body else {
            return Err(Error::missing(E::KIND).into());
        };
        let mut objects = Vec::with_capacity(items.len());
        for item in &items {
            if let Some(object) = self.ctx.fetch_or_construct_value(item)? {
                objects.push(object);
            }
        }
        Ok(objects)
    }

    /// Starts a cursor over a paginated collection.
    ///
    /// A `cursor` option picks the starting page; otherwise the first page is
    /// requested.
    pub(crate) async fn cursor<E: Entity>(
        &self,
        collection: &'static str,
        method: Method,
        path: &'static str,
        mut params: Params,
    ) -> ApiResult<Cursor<E, Pager<'_, T>>> {
        let start = params
            .remove("cursor")
            .and_then(|cursor| cursor.as_i64())
            .unwrap_or(START);
        let pager = Pager {
            client: self,
            collection,
            method,
            path,
            params,
        };
        Cursor::start_at(self.ctx.clone(), pager, start).await
    }
}

#[async_trait]
impl<T: Transport> CurrentUser for Client<T> {
    /// Fetched once through `verify_credentials`, then memoized.
    async fn screen_name(&self) -> ApiResult<String> {
        let name = self
            .screen_name
            .get_or_try_init(|| async {
                let user = self.verify_credentials().await?;
                user.screen_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::Model(Error::missing("screen_name")))
            })
            .await?;
        Ok(name.clone())
    }
}

/// Fetches successive pages of one collection endpoint.
pub struct Pager<'a, T> {
    client: &'a Client<T>,
    collection: &'static str,
    method: Method,
    path: &'static str,
    params: Params,
}

#[async_trait]
impl<T: Transport> PageFetcher for Pager<'_, T> {
    type Error = ApiError;

    async fn fetch_page(&mut self, cursor: i64) -> ApiResult<CursorPage> {
        let mut params = self.params.clone();
        params.insert("cursor".to_string(), Value::from(cursor));
        let body = self.client.request(self.method, self.path, params).await?;
        Ok(CursorPage::from_body(body, self.collection)?)
    }
}
