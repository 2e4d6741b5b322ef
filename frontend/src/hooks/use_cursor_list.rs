use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use taskify_loader::{
    should_load_more, CursorLoader, CursorPage, CursorSnapshot, DepTracker, FetchError,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_visible::use_visible;
use crate::services::logging::Logger;

/// Page size every cursor-paginated list in the app requests.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

type StoredFetcher<T, C> =
    Box<dyn Fn(Option<C>) -> LocalBoxFuture<'static, Result<CursorPage<T, C>, FetchError>>>;

#[derive(Clone, PartialEq)]
pub struct UseCursorListActions {
    pub load_more: Callback<()>,
    pub refresh: Callback<()>,
}

pub struct UseCursorListResult<T> {
    pub state: CursorSnapshot<T>,
    pub actions: UseCursorListActions,
    /// Attach to the element marking the end of the list; its visibility
    /// drives automatic load-more.
    pub sentinel: NodeRef,
}

/// Infinite-scroll list state backed by a [`CursorLoader`].
///
/// The loader lives for the component's lifetime; `deps` is the typed
/// refresh key (parent id, search term, or a tuple). Mount and
/// dependency-change are deliberately two separate triggers: the mount
/// effect fires the initial load once (when `auto_load` is set), and the
/// deps effect refreshes only on a later key change, never on first
/// render.
#[hook]
pub fn use_cursor_list<T, C, F, D>(fetcher: F, deps: D, auto_load: bool) -> UseCursorListResult<T>
where
    T: Clone + PartialEq + 'static,
    C: Clone + 'static,
    F: Fn(Option<C>) -> LocalBoxFuture<'static, Result<CursorPage<T, C>, FetchError>> + 'static,
    D: Clone + PartialEq + 'static,
{
    // The closure passed on this render captures the freshest props, so it
    // replaces the stored one every time; the loader delegates through the
    // cell and never goes stale.
    let fetcher_cell: Rc<RefCell<Option<StoredFetcher<T, C>>>> = use_mut_ref(|| None);
    *fetcher_cell.borrow_mut() = Some(Box::new(fetcher));

    let loader = use_memo((), {
        let fetcher_cell = fetcher_cell.clone();
        move |_| {
            CursorLoader::builder()
                .fetcher(move |cursor| {
                    let fetcher = fetcher_cell.borrow();
                    let fetcher = fetcher
                        .as_ref()
                        .expect("fetcher is installed before the loader can run");
                    fetcher(cursor)
                })
                .build()
        }
    });

    let snapshot = use_state(|| loader.snapshot());

    // Mirror loader changes into render state; dispose on unmount so a
    // late completion never touches a dead component.
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
                Logger::debug_with_component("cursor-list-hook", "disposing list loader");
                handle.dispose();
            }
        });
    }

    let load_more = {
        let loader = loader.clone();
        use_callback((), move |_, _| {
            let loader = (*loader).clone();
            spawn_local(async move { loader.load_more().await });
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
                spawn_local(async move { loader.refresh().await });
            }
            || ()
        });
    }

    // Trigger 2: full refresh when the dependency key changes.
    {
        let loader = loader.clone();
        let tracker = use_mut_ref(DepTracker::<D>::new);
        use_effect_with(deps, move |deps: &D| {
            if tracker.borrow_mut().observe(deps.clone()) {
                Logger::debug_with_component("cursor-list-hook", "dependency changed, refreshing");
                let loader = (*loader).clone();
                spawn_local(async move { loader.refresh().await });
            }
            || ()
        });
    }

    // Viewport trigger bridge: re-evaluated whenever visibility, has-more,
    // or in-flight changes.
    let sentinel = use_node_ref();
    let visible = use_visible(sentinel.clone());
    {
        let loader = loader.clone();
        use_effect_with(
            (visible, snapshot.has_more, snapshot.is_loading),
            move |(visible, has_more, is_loading)| {
                if should_load_more(*visible, *has_more, *is_loading) {
                    let loader = (*loader).clone();
                    spawn_local(async move { loader.load_more().await });
                }
                || ()
            },
        );
    }

    UseCursorListResult {
        state: (*snapshot).clone(),
        actions: UseCursorListActions { load_more, refresh },
        sentinel,
    }
}
