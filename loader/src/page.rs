use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::state::{FetchState, FetchStatus};

/// One page of an offset-paginated fetch, with the server-reported total.
#[derive(Debug, Clone, PartialEq)]
pub struct CountedPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

/// Caller-supplied fetch closure, keyed by a 1-indexed page number.
pub type PageFetcher<T> =
    Rc<dyn Fn(u32) -> LocalBoxFuture<'static, Result<CountedPage<T>, FetchError>>>;

struct Inner<T> {
    fetch: FetchState<()>,
    items: Vec<T>,
    current_page: u32,
    page_size: u32,
    total_count: u64,
    generation: u64,
    disposed: bool,
    on_change: Option<Rc<dyn Fn()>>,
}

/// Classic "page 3 of 10" loader. Holds only the current page; navigating
/// discards the previous page rather than merging. The server's
/// `total_count` is the source of truth for the page count and is
/// re-adopted from every response.
///
/// Unlike [`crate::CursorLoader`], navigations are not serialized: a rapid
/// prev/prev double-click dispatches two fetches and the generation
/// counter lets the latest one win.
pub struct PageLoader<T> {
    inner: Rc<RefCell<Inner<T>>>,
    fetcher: PageFetcher<T>,
}

impl<T> Clone for PageLoader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<T: 'static> PageLoader<T> {
    /// # Panics
    ///
    /// Panics when `page_size` is zero.
    pub fn new(fetcher: PageFetcher<T>, page_size: u32) -> Self {
        assert!(page_size > 0, "PageLoader requires a non-zero page size");
        Self {
            inner: Rc::new(RefCell::new(Inner {
                fetch: FetchState::new(),
                items: Vec::new(),
                current_page: 1,
                page_size,
                total_count: 0,
                generation: 0,
                disposed: false,
                on_change: None,
            })),
            fetcher,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().fetch.is_loading()
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.borrow().fetch.status()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.borrow().fetch.error().map(str::to_string)
    }

    pub fn current_page(&self) -> u32 {
        self.inner.borrow().current_page
    }

    pub fn page_size(&self) -> u32 {
        self.inner.borrow().page_size
    }

    pub fn total_count(&self) -> u64 {
        self.inner.borrow().total_count
    }

    /// `ceil(total_count / page_size)`; zero before anything is known.
    pub fn total_pages(&self) -> u32 {
        let inner = self.inner.borrow();
        total_pages(inner.total_count, inner.page_size)
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn set_on_change(&self, listener: Rc<dyn Fn()>) {
        self.inner.borrow_mut().on_change = Some(listener);
    }

    /// Fetches `page` (clamped into the known range) and replaces the
    /// current items with the response.
    pub async fn load_page(&self, page: u32) {
        let (generation, page) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            let page = clamp_page(page, total_pages(inner.total_count, inner.page_size));
            inner.current_page = page;
            inner.generation += 1;
            inner.fetch.begin();
            (inner.generation, page)
        };
        self.notify();
        debug!(generation, page, "page loader: dispatching fetch");
        let result = (*self.fetcher)(page).await;
        self.settle(generation, result);
    }

    /// Re-fetches the page currently shown.
    pub async fn refresh(&self) {
        let page = {
            let inner = self.inner.borrow();
            if inner.disposed {
                return;
            }
            inner.current_page
        };
        self.load_page(page).await;
    }

    /// Clamp-guarded decrement; no-op on page 1.
    pub async fn go_to_prev_page(&self) {
        let prev = {
            let inner = self.inner.borrow();
            if inner.disposed || inner.current_page <= 1 {
                return;
            }
            inner.current_page - 1
        };
        self.load_page(prev).await;
    }

    /// Clamp-guarded increment; no-op on the last known page (and before
    /// the first response, when no page count is known yet).
    pub async fn go_to_next_page(&self) {
        let next = {
            let inner = self.inner.borrow();
            let total = total_pages(inner.total_count, inner.page_size);
            if inner.disposed || total == 0 || inner.current_page >= total {
                return;
            }
            inner.current_page + 1
        };
        self.load_page(next).await;
    }

    /// Invalidates any in-flight fetch and makes later operations no-ops.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.generation += 1;
        inner.on_change = None;
    }

    fn settle(&self, generation: u64, result: Result<CountedPage<T>, FetchError>) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.generation != generation {
                warn!(
                    generation,
                    current = inner.generation,
                    "page loader: discarding stale fetch result"
                );
                return;
            }
            match result {
                Ok(page) => {
                    inner.items = page.items;
                    inner.total_count = page.total_count;
                    // The fresh count may shrink the range under us.
                    let total = total_pages(inner.total_count, inner.page_size);
                    if total > 0 && inner.current_page > total {
                        inner.current_page = total;
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

impl<T: Clone + 'static> PageLoader<T> {
    /// Items of the page currently shown.
    pub fn items(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    pub fn snapshot(&self) -> PageSnapshot<T> {
        let inner = self.inner.borrow();
        PageSnapshot {
            items: inner.items.clone(),
            is_loading: inner.fetch.is_loading(),
            current_page: inner.current_page,
            total_pages: total_pages(inner.total_count, inner.page_size),
            total_count: inner.total_count,
            error: inner.fetch.error().map(str::to_string),
        }
    }
}

/// Render-ready view of a [`PageLoader`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub error: Option<String>,
}

fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if total_count == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size)) as u32
}

/// Lower bound 1 always; upper bound only once a page count is known.
fn clamp_page(page: u32, total_pages: u32) -> u32 {
    let page = page.max(1);
    if total_pages > 0 {
        page.min(total_pages)
    } else {
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::cell::Cell;

    /// Fetcher simulating `total` items of `0..total` split into pages.
    fn numbered(total: u64, page_size: u32) -> (PageFetcher<u64>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let fetcher: PageFetcher<u64> = Rc::new(move |page| {
            counter.set(counter.get() + 1);
            let start = u64::from(page - 1) * u64::from(page_size);
            let end = (start + u64::from(page_size)).min(total);
            let items: Vec<u64> = (start..end).collect();
            async move {
                Ok(CountedPage {
                    items,
                    total_count: total,
                })
            }
            .boxed_local()
        });
        (fetcher, calls)
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(23, 5), 5);
        assert_eq!(total_pages(25, 5), 5);
        assert_eq!(total_pages(26, 5), 6);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    #[should_panic(expected = "non-zero page size")]
    fn zero_page_size_panics() {
        let (fetcher, _) = numbered(10, 5);
        let _ = PageLoader::new(fetcher, 0);
    }

    #[tokio::test]
    async fn first_page_loads_and_reports_totals() {
        let (fetcher, _) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(1).await;

        assert_eq!(loader.items(), vec![0, 1, 2, 3, 4]);
        assert_eq!(loader.current_page(), 1);
        assert_eq!(loader.total_pages(), 5);
        assert_eq!(loader.total_count(), 23);
    }

    #[tokio::test]
    async fn navigation_replaces_items() {
        let (fetcher, _) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(1).await;
        loader.go_to_next_page().await;

        assert_eq!(loader.current_page(), 2);
        assert_eq!(loader.items(), vec![5, 6, 7, 8, 9]);

        loader.go_to_prev_page().await;
        assert_eq!(loader.current_page(), 1);
        assert_eq!(loader.items(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn prev_is_clamped_at_page_one() {
        let (fetcher, calls) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(1).await;
        let before = calls.get();
        loader.go_to_prev_page().await;

        assert_eq!(loader.current_page(), 1);
        assert_eq!(calls.get(), before);
    }

    #[tokio::test]
    async fn next_is_clamped_at_last_page() {
        let (fetcher, calls) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(5).await;
        assert_eq!(loader.current_page(), 5);
        assert_eq!(loader.items(), vec![20, 21, 22]);

        let before = calls.get();
        loader.go_to_next_page().await;
        assert_eq!(loader.current_page(), 5);
        assert_eq!(calls.get(), before);
    }

    #[tokio::test]
    async fn out_of_range_request_is_clamped() {
        let (fetcher, _) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(1).await;
        loader.load_page(6).await;

        assert_eq!(loader.current_page(), 5);
        assert_eq!(loader.items(), vec![20, 21, 22]);
    }

    #[tokio::test]
    async fn next_before_first_response_is_a_no_op() {
        let (fetcher, calls) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.go_to_next_page().await;
        assert_eq!(calls.get(), 0);
        assert_eq!(loader.current_page(), 1);
    }

    #[tokio::test]
    async fn shrinking_total_pulls_current_page_back() {
        let total = Rc::new(Cell::new(23u64));
        let fetcher: PageFetcher<u64> = Rc::new({
            let total = Rc::clone(&total);
            move |page| {
                let total = total.get();
                let start = u64::from(page - 1) * 5;
                let end = (start + 5).min(total);
                let items: Vec<u64> = (start..end).collect();
                async move {
                    Ok(CountedPage {
                        items,
                        total_count: total,
                    })
                }
                .boxed_local()
            }
        });
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(5).await;
        assert_eq!(loader.current_page(), 5);

        // Items were deleted on the server; the refreshed count is lower.
        total.set(8);
        loader.refresh().await;
        assert_eq!(loader.total_pages(), 2);
        assert_eq!(loader.current_page(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_page() {
        let fail_next = Rc::new(Cell::new(false));
        let fetcher: PageFetcher<u64> = Rc::new({
            let fail_next = Rc::clone(&fail_next);
            move |page| {
                let fail = fail_next.get();
                async move {
                    if fail {
                        Err(FetchError::transient("gateway timeout"))
                    } else {
                        Ok(CountedPage {
                            items: vec![u64::from(page)],
                            total_count: 30,
                        })
                    }
                }
                .boxed_local()
            }
        });
        let loader = PageLoader::new(fetcher, 10);

        loader.load_page(1).await;
        assert_eq!(loader.items(), vec![1]);

        fail_next.set(true);
        loader.go_to_next_page().await;
        assert_eq!(loader.error().as_deref(), Some("gateway timeout"));
        assert_eq!(loader.items(), vec![1]);

        // Retrying the same page succeeds and clears the error.
        fail_next.set(false);
        loader.refresh().await;
        assert!(loader.error().is_none());
        assert_eq!(loader.items(), vec![2]);
    }

    #[tokio::test]
    async fn disposed_loader_is_inert() {
        let (fetcher, calls) = numbered(23, 5);
        let loader = PageLoader::new(fetcher, 5);

        loader.load_page(1).await;
        loader.dispose();

        loader.go_to_next_page().await;
        loader.refresh().await;
        assert_eq!(calls.get(), 1);
        assert!(loader.is_disposed());
    }
}
