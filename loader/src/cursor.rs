use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::state::{FetchState, FetchStatus};

/// One page of a cursor-paginated fetch. `next_cursor = None` signals
/// exhaustion.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T, C> {
    pub items: Vec<T>,
    pub next_cursor: Option<C>,
}

/// Caller-supplied fetch closure. Invoked with `None` for the first page
/// and with the last page's cursor afterwards.
pub type CursorFetcher<T, C> =
    Rc<dyn Fn(Option<C>) -> LocalBoxFuture<'static, Result<CursorPage<T, C>, FetchError>>>;

type DedupeKey<T> = Rc<dyn Fn(&T) -> u64>;

struct Inner<T, C> {
    fetch: FetchState<()>,
    items: Vec<T>,
    next_cursor: Option<C>,
    has_more: bool,
    /// Keys already absorbed, tracked only when de-duplication is enabled.
    seen: HashSet<u64>,
    /// Bumped by `refresh()` and `dispose()`; results tagged with an older
    /// generation are discarded on arrival.
    generation: u64,
    disposed: bool,
    on_change: Option<Rc<dyn Fn()>>,
}

/// Accumulating list loader for cursor pagination.
///
/// Owns the growing item list, the resume cursor, and the has-more flag.
/// `load_more()` appends, `refresh()` replaces. A single instance is owned
/// by one view; cloning yields another handle to the same state, which is
/// how the async completions find their way back.
///
/// All methods take `&self`; state lives behind `Rc<RefCell<_>>` because
/// the loader runs on a single-threaded executor and is mutated from both
/// user events and fetch completions.
pub struct CursorLoader<T, C> {
    inner: Rc<RefCell<Inner<T, C>>>,
    fetcher: CursorFetcher<T, C>,
    dedupe_key: Option<DedupeKey<T>>,
}

impl<T, C> Clone for CursorLoader<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            fetcher: Rc::clone(&self.fetcher),
            dedupe_key: self.dedupe_key.clone(),
        }
    }
}

/// Builder for [`CursorLoader`]. A fetch function is mandatory; building
/// without one panics immediately rather than producing a loader that
/// silently no-ops.
pub struct CursorLoaderBuilder<T, C> {
    fetcher: Option<CursorFetcher<T, C>>,
    dedupe_key: Option<DedupeKey<T>>,
}

impl<T, C> CursorLoaderBuilder<T, C> {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            dedupe_key: None,
        }
    }

    pub fn fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: Fn(Option<C>) -> LocalBoxFuture<'static, Result<CursorPage<T, C>, FetchError>>
            + 'static,
    {
        self.fetcher = Some(Rc::new(fetcher));
        self
    }

    /// Drop items whose key was already absorbed in this session. Off by
    /// default: the server is normally the source of uniqueness.
    pub fn dedupe_by<K>(mut self, key: K) -> Self
    where
        K: Fn(&T) -> u64 + 'static,
    {
        self.dedupe_key = Some(Rc::new(key));
        self
    }

    /// # Panics
    ///
    /// Panics when no fetch function was configured.
    pub fn build(self) -> CursorLoader<T, C> {
        let fetcher = self
            .fetcher
            .expect("CursorLoader built without a fetch function");
        CursorLoader {
            inner: Rc::new(RefCell::new(Inner {
                fetch: FetchState::new(),
                items: Vec::new(),
                next_cursor: None,
                has_more: true,
                seen: HashSet::new(),
                generation: 0,
                disposed: false,
                on_change: None,
            })),
            fetcher,
            dedupe_key: self.dedupe_key,
        }
    }
}

impl<T, C> Default for CursorLoaderBuilder<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, C: Clone + 'static> CursorLoader<T, C> {
    pub fn builder() -> CursorLoaderBuilder<T, C> {
        CursorLoaderBuilder::new()
    }

    pub fn new(fetcher: CursorFetcher<T, C>) -> Self {
        CursorLoaderBuilder {
            fetcher: Some(fetcher),
            dedupe_key: None,
        }
        .build()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().fetch.is_loading()
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.borrow().fetch.status()
    }

    pub fn has_more(&self) -> bool {
        self.inner.borrow().has_more
    }

    pub fn next_cursor(&self) -> Option<C> {
        self.inner.borrow().next_cursor.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.borrow().fetch.error().map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Registers a callback invoked after every observable state change.
    /// The frontend hooks use this to mirror the loader into render state.
    pub fn set_on_change(&self, listener: Rc<dyn Fn()>) {
        self.inner.borrow_mut().on_change = Some(listener);
    }

    /// Fetches the next page and appends it.
    ///
    /// No-op when exhausted, disposed, or while another fetch is in
    /// flight, so rapid repeat calls collapse to a single request. A
    /// failed fetch records the error and leaves items and cursor exactly
    /// as they were.
    pub async fn load_more(&self) {
        let (generation, cursor) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || !inner.has_more || inner.fetch.is_loading() {
                return;
            }
            inner.fetch.begin();
            (inner.generation, inner.next_cursor.clone())
        };
        self.notify();
        debug!(generation, "cursor loader: dispatching load_more");
        let result = (*self.fetcher)(cursor).await;
        self.settle(generation, result, false);
    }

    /// Discards all accumulated state and re-fetches the first page,
    /// replacing the list with exactly that page's items.
    ///
    /// Runs unconditionally: a refresh started while another fetch is in
    /// flight supersedes it, and the stale completion is dropped when it
    /// arrives.
    pub async fn refresh(&self) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.generation += 1;
            inner.items.clear();
            inner.seen.clear();
            inner.next_cursor = None;
            inner.has_more = true;
            inner.fetch.begin();
            inner.generation
        };
        self.notify();
        debug!(generation, "cursor loader: dispatching refresh");
        let result = (*self.fetcher)(None).await;
        self.settle(generation, result, true);
    }

    /// Invalidates any in-flight fetch and makes every later operation a
    /// no-op. Called from view teardown so late completions never touch
    /// dead state.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.generation += 1;
        inner.on_change = None;
    }

    fn settle(
        &self,
        generation: u64,
        result: Result<CursorPage<T, C>, FetchError>,
        replacing: bool,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.generation != generation {
                warn!(
                    generation,
                    current = inner.generation,
                    "cursor loader: discarding stale fetch result"
                );
                return;
            }
            match result {
                Ok(page) => {
                    inner.next_cursor = page.next_cursor;
                    inner.has_more = inner.next_cursor.is_some();
                    if replacing {
                        inner.items.clear();
                        inner.seen.clear();
                    }
                    match &self.dedupe_key {
                        None => inner.items.extend(page.items),
                        Some(key) => {
                            for item in page.items {
                                if inner.seen.insert((**key)(&item)) {
                                    inner.items.push(item);
                                }
                            }
                        }
                    }
                    inner.fetch.succeed(());
                }
                Err(err) => {
                    inner.fetch.fail(err.to_string());
                }
            }
        }
        self.notify();
    }

    fn notify(&self) {
        let listener = self.inner.borrow().on_change.clone();
        if let Some(listener) = listener {
            (*listener)();
        }
    }
}

impl<T: Clone + 'static, C: Clone + 'static> CursorLoader<T, C> {
    /// Current accumulated items, in display order.
    pub fn items(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    /// One coherent copy of everything the rendering layer needs.
    pub fn snapshot(&self) -> CursorSnapshot<T> {
        let inner = self.inner.borrow();
        CursorSnapshot {
            items: inner.items.clone(),
            is_loading: inner.fetch.is_loading(),
            has_more: inner.has_more,
            error: inner.fetch.error().map(str::to_string),
        }
    }
}

/// Render-ready view of a [`CursorLoader`].
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSnapshot<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
}
