//! Cursor-paginated collections.
//!
//! The service pages large collections with opaque integer tokens: `-1`
//! requests the first page and a `next_cursor` of `0` marks the last one.
//! Fetching a page is the caller's business, injected as a [`PageFetcher`];
//! a [`Cursor`] only tracks tokens and turns each page's items into entities.

use crate::{Context, Entity};
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use twitter_types::{Attrs, Error};

/// Token requesting the first page.
pub const START: i64 = -1;

/// Token marking that no further pages exist.
pub const END: i64 = 0;

/// One raw page as returned by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorPage {
    pub items: Vec<Value>,
    pub next_cursor: i64,
    pub previous_cursor: i64,
}

impl CursorPage {
    /// Reads a page out of a response body that lists its items under
    /// `collection` (`"users"`, `"lists"`, ...).
    ///
    /// A missing `next_cursor` is read as [`END`].
    pub fn from_body(body: Value, collection: &str) -> twitter_types::Result<Self> {
        let mut attrs = Attrs::from_value(body, collection)?;
        let next_cursor = attrs.get_i64("next_cursor").unwrap_or(END);
        let previous_cursor = attrs.get_i64("previous_cursor").unwrap_or(END);
        let items = match attrs.take(collection) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        Ok(Self {
            items,
            next_cursor,
            previous_cursor,
        })
    }
}

/// Performs the request for one page.
#[async_trait]
pub trait PageFetcher: Send {
    type Error: From<Error> + Send;

    async fn fetch_page(&mut self, cursor: i64) -> Result<CursorPage, Self::Error>;
}

/// The current page of a paginated collection plus the means to fetch the
/// next one.
pub struct Cursor<T, F> {
    ctx: Context,
    fetcher: F,
    items: Vec<Arc<T>>,
    next_cursor: i64,
    previous_cursor: i64,
}

impl<T: Entity, F: PageFetcher> Cursor<T, F> {
    /// Fetches the first page.
    pub async fn start(ctx: Context, fetcher: F) -> Result<Self, F::Error> {
        Self::start_at(ctx, fetcher, START).await
    }

    /// Fetches the page at `cursor`, typically a token saved from an earlier
    /// cursor.
    pub async fn start_at(ctx: Context, mut fetcher: F, cursor: i64) -> Result<Self, F::Error> {
        let page = fetcher.fetch_page(cursor).await?;
        let items = build_items(&ctx, page.items)?;
        Ok(Self {
            ctx,
            fetcher,
            items,
            next_cursor: page.next_cursor,
            previous_cursor: page.previous_cursor,
        })
    }

    /// The current page's entities, in response order.
    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn next_cursor(&self) -> i64 {
        self.next_cursor
    }

    pub fn previous_cursor(&self) -> i64 {
        self.previous_cursor
    }

    pub fn is_first(&self) -> bool {
        self.previous_cursor == END
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor == END
    }

    /// Replaces the current page with the next one.
    ///
    /// Returns `false`, without fetching, once the last page is current.
    pub async fn next_page(&mut self) -> Result<bool, F::Error> {
        if self.is_last() {
            return Ok(false);
        }
        let page = self.fetcher.fetch_page(self.next_cursor).await?;
        self.items = build_items(&self.ctx, page.items)?;
        self.next_cursor = page.next_cursor;
        self.previous_cursor = page.previous_cursor;
        Ok(true)
    }

    /// Every item from the current page onward, fetching further pages only
    /// as the stream is polled past the end of the previous one.
    pub fn all(self) -> impl Stream<Item = Result<Arc<T>, F::Error>> {
        stream::try_unfold((self, false), |(mut cursor, advance)| async move {
            if advance && !cursor.next_page().await? {
                return Ok::<_, F::Error>(None);
            }
            let items = std::mem::take(&mut cursor.items);
            Ok(Some((items, (cursor, true))))
        })
        .map_ok(|items| stream::iter(items).map(Ok::<_, F::Error>))
        .try_flatten()
    }
}

fn build_items<T: Entity>(ctx: &Context, values: Vec<Value>) -> twitter_types::Result<Vec<Arc<T>>> {
    let mut items = Vec::with_capacity(values.len());
    for value in &values {
        if let Some(item) = ctx.fetch_or_construct_value(value)? {
            items.push(item);
        }
    }
    Ok(items)
}

impl<T, F> fmt::Debug for Cursor<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("items", &self.items.len())
            .field("next_cursor", &self.next_cursor)
            .field("previous_cursor", &self.previous_cursor)
            .finish()
    }
}
