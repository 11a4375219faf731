use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::{
    error::SetupError,
    visibility::{Subscription, Visibility, VisibilityTracker},
};

/// Observes `targets`, reporting at `threshold`, and calls `on_change` for
/// every enter/exit edge. One-shot targets are unobserved after entering.
pub(crate) fn watch(
    targets: &[Element],
    threshold: f64,
    subscription: Subscription,
    mut on_change: impl FnMut(&Element, Visibility) + 'static,
) -> Result<IntersectionObserver, SetupError> {
    let mut trackers: Vec<(Element, VisibilityTracker)> = targets
        .iter()
        .map(|target| (target.clone(), VisibilityTracker::new(subscription)))
        .collect();

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some((_, tracker)) = trackers.iter_mut().find(|(known, _)| *known == target)
                else {
                    continue;
                };
                let Some(change) = tracker.observe(entry.is_intersecting()) else {
                    continue;
                };

                if tracker.is_finished() {
                    observer.unobserve(&target);
                }
                on_change(&target, change);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}
