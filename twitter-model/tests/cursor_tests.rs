use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use twitter_model::cursor::{END, START};
use twitter_model::{Context, Cursor, CursorPage, Error, Identified, PageFetcher, User};
use twitter_types::Id;

/// Serves canned pages and records every token it is asked for.
struct Scripted {
    pages: VecDeque<CursorPage>,
    requested: Arc<std::sync::Mutex<Vec<i64>>>,
    calls: Arc<AtomicUsize>,
}

impl Scripted {
    fn new(pages: Vec<CursorPage>) -> Self {
        Self {
            pages: pages.into(),
            requested: Arc::default(),
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl PageFetcher for Scripted {
    type Error = Error;

    async fn fetch_page(&mut self, cursor: i64) -> Result<CursorPage, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(cursor);
        self.pages
            .pop_front()
            .ok_or_else(|| Error::missing("page"))
    }
}

fn page(ids: &[u64], next: i64, previous: i64) -> CursorPage {
    CursorPage {
        items: ids.iter().map(|id| json!({"id": id})).collect(),
        next_cursor: next,
        previous_cursor: previous,
    }
}

fn three_pages() -> Scripted {
    Scripted::new(vec![
        page(&[1, 2], 111, END),
        page(&[3, 4], 222, -111),
        page(&[5], END, -222),
    ])
}

fn ids(users: &[Arc<User>]) -> Vec<Id> {
    users.iter().map(|u| u.id().clone()).collect()
}

// ── Page bodies ──────────────────────────────────────────────────

#[test]
fn from_body_reads_items_and_tokens() {
    let body = json!({
        "users": [{"id": 1}, {"id": 2}],
        "next_cursor": 1_305_102_810_874_389_703i64,
        "previous_cursor": 0
    });
    let page = CursorPage::from_body(body, "users").unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.next_cursor, 1_305_102_810_874_389_703);
    assert_eq!(page.previous_cursor, 0);
}

#[test]
fn from_body_without_next_cursor_is_last_page() {
    let page = CursorPage::from_body(json!({"lists": []}), "lists").unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.next_cursor, END);
}

#[test]
fn from_body_rejects_non_objects() {
    let err = CursorPage::from_body(json!([1, 2]), "users").unwrap_err();
    assert!(matches!(err, Error::Construction { ref key } if key == "users"));
}

// ── Paging ───────────────────────────────────────────────────────

#[tokio::test]
async fn start_fetches_the_first_page() {
    let fetcher = three_pages();
    let requested = fetcher.requested.clone();
    let cursor: Cursor<User, _> = Cursor::start(Context::uncached(), fetcher).await.unwrap();

    assert_eq!(ids(cursor.items()), vec![Id::Num(1), Id::Num(2)]);
    assert_eq!(cursor.next_cursor(), 111);
    assert!(cursor.is_first());
    assert!(!cursor.is_last());
    assert_eq!(*requested.lock().unwrap(), vec![START]);
}

#[tokio::test]
async fn start_at_uses_the_given_token() {
    let fetcher = Scripted::new(vec![page(&[9], END, -5)]);
    let requested = fetcher.requested.clone();
    let cursor: Cursor<User, _> = Cursor::start_at(Context::uncached(), fetcher, 5)
        .await
        .unwrap();
    assert_eq!(*requested.lock().unwrap(), vec![5]);
    assert!(cursor.is_last());
    assert!(!cursor.is_first());
}

#[tokio::test]
async fn next_page_walks_until_exhausted() {
    let fetcher = three_pages();
    let calls = fetcher.calls.clone();
    let mut cursor: Cursor<User, _> = Cursor::start(Context::uncached(), fetcher).await.unwrap();

    assert!(cursor.next_page().await.unwrap());
    assert_eq!(ids(cursor.items()), vec![Id::Num(3), Id::Num(4)]);
    assert_eq!(cursor.previous_cursor(), -111);

    assert!(cursor.next_page().await.unwrap());
    assert!(cursor.is_last());

    assert!(!cursor.next_page().await.unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn all_yields_every_page_in_order_then_stops() {
    let fetcher = three_pages();
    let calls = fetcher.calls.clone();
    let requested = fetcher.requested.clone();
    let cursor: Cursor<User, _> = Cursor::start(Context::uncached(), fetcher).await.unwrap();

    let users: Vec<Arc<User>> = cursor.all().try_collect().await.unwrap();

    assert_eq!(
        ids(&users),
        vec![Id::Num(1), Id::Num(2), Id::Num(3), Id::Num(4), Id::Num(5)]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(*requested.lock().unwrap(), vec![START, 111, 222]);
}

#[tokio::test]
async fn all_on_a_single_page_never_fetches_again() {
    let fetcher = Scripted::new(vec![page(&[1], END, END)]);
    let calls = fetcher.calls.clone();
    let cursor: Cursor<User, _> = Cursor::start(Context::uncached(), fetcher).await.unwrap();

    let users: Vec<Arc<User>> = cursor.all().try_collect().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_errors_surface_through_the_stream() {
    let fetcher = Scripted::new(vec![page(&[1], 7, END)]);
    let cursor: Cursor<User, _> = Cursor::start(Context::uncached(), fetcher).await.unwrap();
    let result: Result<Vec<Arc<User>>, Error> = cursor.all().try_collect().await;
    assert!(matches!(result, Err(Error::Construction { ref key }) if key == "page"));
}

#[tokio::test]
async fn malformed_items_fail_the_page() {
    let fetcher = Scripted::new(vec![CursorPage {
        items: vec![json!({"name": "no id"})],
        next_cursor: END,
        previous_cursor: END,
    }]);
    let err = Cursor::<User, _>::start(Context::uncached(), fetcher)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Construction { ref key } if key == "id"));
}
