use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};
use yew::prelude::*;

/// Observes whether the element behind `node` is inside the viewport.
///
/// Attaches an IntersectionObserver once the node resolves and tears it
/// down when the component unmounts. Until the first intersection event
/// arrives the element is reported as not visible.
#[hook]
pub fn use_visible(node: NodeRef) -> bool {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with(node, move |node| {
            let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});

            if let Some(element) = node.cast::<Element>() {
                let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                    move |entries: js_sys::Array, _observer: IntersectionObserver| {
                        if let Some(entry) = entries.iter().last() {
                            let entry: IntersectionObserverEntry = entry.unchecked_into();
                            visible.set(entry.is_intersecting());
                        }
                    },
                );

                match IntersectionObserver::new(on_intersect.as_ref().unchecked_ref()) {
                    Ok(observer) => {
                        observer.observe(&element);
                        cleanup = Box::new(move || {
                            observer.disconnect();
                            // The closure must outlive the observer.
                            drop(on_intersect);
                        });
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to create IntersectionObserver:", e);
                    }
                }
            }

            move || cleanup()
        });
    }

    *visible
}
