use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use taskify_loader::{CountedPage, DepTracker, FetchError, PageLoader, PageSnapshot};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

type StoredFetcher<T> =
    Box<dyn Fn(u32) -> LocalBoxFuture<'static, Result<CountedPage<T>, FetchError>>>;

#[derive(Clone, PartialEq)]
pub struct UsePageListActions {
    pub go_to_prev_page: Callback<()>,
    pub go_to_next_page: Callback<()>,
    pub refresh: Callback<()>,
}

pub struct UsePageListResult<T> {
    pub state: PageSnapshot<T>,
    pub actions: UsePageListActions,
}

/// "Page N of M" list state backed by a [`PageLoader`].
///
/// Navigating replaces the visible page; nothing accumulates. Mount loads
/// page 1 (when `auto_load` is set); a later change of the `deps` key
/// snaps back to page 1 and re-fetches, as two separate triggers.
#[hook]
pub fn use_page_list<T, F, D>(
    fetcher: F,
    page_size: u32,
    deps: D,
    auto_load: bool,
) -> UsePageListResult<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn(u32) -> LocalBoxFuture<'static, Result<CountedPage<T>, FetchError>> + 'static,
    D: Clone + PartialEq + 'static,
{
    // Refreshed every render so the loader always calls the closure that
    // captured the current props.
    let fetcher_cell: Rc<RefCell<Option<StoredFetcher<T>>>> = use_mut_ref(|| None);
    *fetcher_cell.borrow_mut() = Some(Box::new(fetcher));

    let loader = use_memo((), {
        let fetcher_cell = fetcher_cell.clone();
        move |_| {
            let delegating: Rc<
                dyn Fn(u32) -> LocalBoxFuture<'static, Result<CountedPage<T>, FetchError>>,
            > = Rc::new(move |page| {
                let fetcher = fetcher_cell.borrow();
                let fetcher = fetcher
                    .as_ref()
                    .expect("fetcher is installed before the loader can run");
                fetcher(page)
            });
            PageLoader::new(delegating, page_size)
        }
    });

    let snapshot = use_state(|| loader.snapshot());

    {
        let loader = loader.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let handle = (*loader).clone();
            handle.set_on_change(Rc::new({
                let handle = handle.clone();
                move || snapshot.set(handle.snapshot())
            }));
            move || {
                Logger::debug_with_component("page-list-hook", "disposing page loader");
                handle.dispose();
            }
        });
    }

    let go_to_prev_page = {
        let loader = loader.clone();
        use_callback((), move |_, _| {
            let loader = (*loader).clone();
            spawn_local(async move { loader.go_to_prev_page().await });
        })
    };

    let go_to_next_page = {
        let loader = loader.clone();
        use_callback((), move |_, _| {
            let loader = (*loader).clone();
            spawn_local(async move { loader.go_to_next_page().await });
        })
    };

    let refresh = {
        let loader = loader.clone();
        use_callback((), move |_, _| {
            let loader = (*loader).clone();
            spawn_local(async move { loader.refresh().await });
        })
    };

    // Trigger 1: initial load on mount.
    {
        let loader = loader.clone();
        use_effect_with((), move |_| {
            if auto_load {
                let loader = (*loader).clone();
                spawn_local(async move { loader.load_page(1).await });
            }
            || ()
        });
    }

    // Trigger 2: dependency change resets to page 1.
    {
        let loader = loader.clone();
        let tracker = use_mut_ref(DepTracker::<D>::new);
        use_effect_with(deps, move |deps: &D| {
            if tracker.borrow_mut().observe(deps.clone()) {
                Logger::debug_with_component("page-list-hook", "dependency changed, reloading");
                let loader = (*loader).clone();
                spawn_local(async move { loader.load_page(1).await });
            }
            || ()
        });
    }

    UsePageListResult {
        state: (*snapshot).clone(),
        actions: UsePageListActions {
            go_to_prev_page,
            go_to_next_page,
            refresh,
        },
    }
}
