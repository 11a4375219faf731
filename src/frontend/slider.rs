use std::{cell::RefCell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};

use super::{set_class, Page};
use crate::{
    error::SetupError,
    slider::{SliderDrag, GRABBING_CLASS, RESIZE_DEBOUNCE_MS},
    styles::slider_css,
    timing::Debounce,
};

fn offset_x(container: &HtmlElement, page_x: i32) -> f64 {
    f64::from(page_x - container.offset_left())
}

fn first_touch_x(event: &TouchEvent) -> Option<f64> {
    event.touches().item(0).map(|touch| f64::from(touch.page_x()))
}

fn scroll_to(container: &HtmlElement, scroll_left: f64) {
    container.set_scroll_left(scroll_left.round() as i32);
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let container = page
        .query(".review-cards")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SetupError::MissingElement(".review-cards"))?;
    page.inject_style(&slider_css(page.config.narrow_breakpoint_px))?;

    let drag = Rc::new(RefCell::new(SliderDrag::default()));

    {
        let drag = drag.clone();
        let media = page.media.clone();
        let target = container.clone();
        EventListener::new(&container, "mousedown", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let x = offset_x(&target, event.page_x());
            let scroll = f64::from(target.scroll_left());
            if drag
                .borrow_mut()
                .pointer_down(x, scroll, media.snapshot().drag_slider())
            {
                set_class(&target, GRABBING_CLASS, true);
            }
        })
        .forget();
    }

    for release in ["mouseleave", "mouseup"] {
        let drag = drag.clone();
        let target = container.clone();
        EventListener::new(&container, release, move |_| {
            if drag.borrow_mut().pointer_release() {
                set_class(&target, GRABBING_CLASS, false);
            }
        })
        .forget();
    }

    {
        let drag = drag.clone();
        let target = container.clone();
        EventListener::new_with_options(
            &container,
            "mousemove",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let next = drag.borrow().pointer_move(offset_x(&target, mouse.page_x()));
                if let Some(scroll_left) = next {
                    event.prevent_default();
                    scroll_to(&target, scroll_left);
                }
            },
        )
        .forget();
    }

    {
        let drag = drag.clone();
        let target = container.clone();
        EventListener::new(&container, "touchstart", move |event| {
            let Some(x) = event.dyn_ref::<TouchEvent>().and_then(first_touch_x) else {
                return;
            };
            drag.borrow_mut()
                .touch_start(x, f64::from(target.scroll_left()));
        })
        .forget();
    }

    {
        let drag = drag.clone();
        let target = container.clone();
        EventListener::new(&container, "touchmove", move |event| {
            let Some(x) = event.dyn_ref::<TouchEvent>().and_then(first_touch_x) else {
                return;
            };
            let next = drag.borrow().touch_move(x);
            if let Some(scroll_left) = next {
                scroll_to(&target, scroll_left);
            }
        })
        .forget();
    }

    {
        let drag = drag.clone();
        EventListener::new(&container, "touchend", move |_| drag.borrow_mut().touch_end()).forget();
    }

    let pending: Rc<RefCell<Debounce<Timeout>>> = Rc::default();
    let media = page.media.clone();
    EventListener::new(&page.window, "resize", move |_| {
        let drag = drag.clone();
        let media = media.clone();
        let target = container.clone();
        let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
            let reset = drag
                .borrow_mut()
                .viewport_resized(media.snapshot().narrow_viewport);
            if let Some(reset) = reset {
                scroll_to(&target, reset.scroll_left);
                set_class(&target, GRABBING_CLASS, false);
            }
        });
        pending.borrow_mut().schedule(timeout);
    })
    .forget();

    Ok(())
}
