use std::cell::Cell;

use crate::cursor::CursorLoader;

/// The infinite-scroll rule: fetch the next page exactly when the sentinel
/// is visible, more data exists, and nothing is already in flight.
///
/// Re-evaluated whenever any input changes; no extra debounce is needed
/// because `load_more()` is a no-op while a fetch is in flight, which
/// absorbs visibility flicker.
pub fn should_load_more(visible: bool, has_more: bool, in_flight: bool) -> bool {
    visible && has_more && !in_flight
}

/// Bridges a sentinel element's visibility signal to a [`CursorLoader`],
/// for callers driving the loader outside a UI framework (the Yew hooks
/// apply [`should_load_more`] in an effect instead).
#[derive(Debug, Default)]
pub struct ViewportTrigger {
    visible: Cell<bool>,
}

impl ViewportTrigger {
    pub fn new() -> Self {
        Self {
            visible: Cell::new(false),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn visible(&self) -> bool {
        self.visible.get()
    }

    /// Applies the rule to the loader's current state and, when it fires,
    /// awaits the resulting `load_more()`. Returns whether a fetch was
    /// requested.
    pub async fn drive<T, C>(&self, loader: &CursorLoader<T, C>) -> bool
    where
        T: 'static,
        C: Clone + 'static,
    {
        if !should_load_more(self.visible.get(), loader.has_more(), loader.is_loading()) {
            return false;
        }
        loader.load_more().await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{CursorFetcher, CursorPage};
    use futures::FutureExt;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn fires_only_when_all_three_conditions_hold() {
        assert!(should_load_more(true, true, false));
        assert!(!should_load_more(false, true, false));
        assert!(!should_load_more(true, false, false));
        assert!(!should_load_more(true, true, true));
        assert!(!should_load_more(false, false, true));
    }

    fn counting_fetcher() -> (CursorFetcher<u32, u64>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let fetcher: CursorFetcher<u32, u64> = Rc::new(move |cursor| {
            counter.set(counter.get() + 1);
            let next = match cursor {
                None => Some(1),
                Some(_) => None,
            };
            async move {
                Ok(CursorPage {
                    items: vec![0],
                    next_cursor: next,
                })
            }
            .boxed_local()
        });
        (fetcher, calls)
    }

    #[tokio::test]
    async fn drive_is_inert_while_hidden() {
        let (fetcher, calls) = counting_fetcher();
        let loader = CursorLoader::new(fetcher);
        let trigger = ViewportTrigger::new();

        assert!(!trigger.drive(&loader).await);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn drive_fetches_until_exhaustion() {
        let (fetcher, calls) = counting_fetcher();
        let loader = CursorLoader::new(fetcher);
        let trigger = ViewportTrigger::new();
        trigger.set_visible(true);

        assert!(trigger.drive(&loader).await);
        assert!(trigger.drive(&loader).await);
        // Exhausted now: the sentinel may stay visible but nothing fires.
        assert!(!trigger.drive(&loader).await);
        assert_eq!(calls.get(), 2);
        assert_eq!(loader.items(), vec![0, 0]);
    }
}
