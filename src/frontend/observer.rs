use crate::viewport::{ObserverOptions, OnceSubscription, Visibility};
use js_sys::{Array, Reflect};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub fn supported() -> bool {
    window()
        .and_then(|w| Reflect::has(w.as_ref(), &JsValue::from_str("IntersectionObserver")).ok())
        .unwrap_or(false)
}

fn visibility_batch(batch: Array) -> Vec<(Element, Visibility)> {
    batch
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| {
            let visibility = Visibility {
                intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            };
            (entry.target(), visibility)
        })
        .collect()
}

fn build(callback: &EntriesCallback, options: &ObserverOptions) -> Option<IntersectionObserver> {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin.to_css());
    init.set_threshold(&JsValue::from_f64(options.threshold));

    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()
}

/// Reports every entry for `targets` for the lifetime of the page.
pub fn observe<F>(targets: &[Element], options: &ObserverOptions, mut on_entry: F) -> bool
where
    F: FnMut(&Element, Visibility) + 'static,
{
    if targets.is_empty() {
        return false;
    }

    let callback = EntriesCallback::new(move |batch: Array, _observer: IntersectionObserver| {
        for (target, visibility) in visibility_batch(batch) {
            on_entry(&target, visibility);
        }
    });

    let Some(observer) = build(&callback, options) else {
        return false;
    };
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    true
}

/// Calls `on_enter` once per target when it enters, then stops watching it.
/// The observer disconnects itself after the last target fires.
pub fn observe_once<F>(targets: Vec<Element>, options: &ObserverOptions, mut on_enter: F) -> bool
where
    F: FnMut(&Element) + 'static,
{
    if targets.is_empty() {
        return false;
    }

    let subscription = Rc::new(RefCell::new(OnceSubscription::new(
        targets.clone(),
        options.threshold,
    )));

    let callback = EntriesCallback::new(move |batch: Array, observer: IntersectionObserver| {
        let fired = subscription.borrow_mut().deliver(visibility_batch(batch));
        for target in fired {
            observer.unobserve(&target);
            on_enter(&target);
        }

        if subscription.borrow().is_empty() {
            observer.disconnect();
        }
    });

    let Some(observer) = build(&callback, options) else {
        return false;
    };
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    true
}
