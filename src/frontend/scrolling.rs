//! Scroll-offset effects and in-page anchor scrolling.

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::{set_class, set_style, Page};
use crate::{
    error::SetupError,
    scroll::{
        anchor_scroll_top, anchor_target, header_scrolled, indicator_hidden, page_top_visible,
        progress_width, AnchorTarget, HeaderAutoHide, HEADER_THROTTLE_MS, INDICATOR_THROTTLE_MS,
        PAGE_TOP_THROTTLE_MS, PROGRESS_THROTTLE_MS,
    },
    styles::SCROLL_INDICATOR_CSS,
    timing::Throttle,
};

const HEADER: &str = ".site-header";

fn on_scroll(page: &Page, wait_ms: u32, mut handler: impl FnMut(f64) + 'static) {
    let mut throttle = Throttle::new(wait_ms);
    let context = page.clone();
    EventListener::new(&page.window, "scroll", move |_| {
        if throttle.ready(context.now()) {
            handler(context.scroll_y());
        }
    })
    .forget();
}

fn smooth_scroll_to(page: &Page, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    page.window.scroll_to_with_scroll_to_options(&options);
}

fn header_height(page: &Page) -> f64 {
    page.document
        .query_selector(HEADER)
        .ok()
        .flatten()
        .and_then(|header| header.dyn_into::<HtmlElement>().ok())
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0)
}

pub(super) fn install_anchor_scroll(page: &Page) -> Result<(), SetupError> {
    let context = page.clone();
    EventListener::new_with_options(
        &page.document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(anchor) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest(r##"a[href^="#"]"##).ok().flatten())
            else {
                return;
            };
            let href = anchor.get_attribute("href").unwrap_or_default();

            match anchor_target(&href) {
                Some(AnchorTarget::Top) => {
                    event.prevent_default();
                    smooth_scroll_to(&context, 0.0);
                }
                Some(AnchorTarget::Selector(selector)) => {
                    let Ok(Some(target)) = context.document.query_selector(&selector) else {
                        return;
                    };
                    event.prevent_default();
                    let top = anchor_scroll_top(
                        target.get_bounding_client_rect().top(),
                        context.scroll_y(),
                        header_height(&context),
                    );
                    smooth_scroll_to(&context, top);
                }
                None => {}
            }
        },
    )
    .forget();
    Ok(())
}

pub(super) fn install_page_top(page: &Page) -> Result<(), SetupError> {
    let buttons: Vec<Element> = ["pageTop", "pageTopSp"]
        .into_iter()
        .filter_map(|id| page.document.get_element_by_id(id))
        .collect();
    if buttons.is_empty() {
        return Err(SetupError::MissingElement("#pageTop"));
    }

    let update = move |scroll_y: f64| {
        for button in &buttons {
            set_class(button, "is-visible", page_top_visible(scroll_y));
        }
    };
    update(page.scroll_y());
    on_scroll(page, PAGE_TOP_THROTTLE_MS, update);
    Ok(())
}

pub(super) fn install_sticky_header(page: &Page) -> Result<(), SetupError> {
    let header = page.query(HEADER)?;

    let update = move |scroll_y: f64| set_class(&header, "is-scrolled", header_scrolled(scroll_y));
    update(page.scroll_y());
    on_scroll(page, HEADER_THROTTLE_MS, update);
    Ok(())
}

/// Narrow layouts only; the decision is made once at load.
pub(super) fn install_auto_hide_header(page: &Page) -> Result<(), SetupError> {
    let header = page.query(HEADER)?;
    if !page.env().narrow_viewport {
        return Ok(());
    }

    let mut auto_hide = HeaderAutoHide::default();
    on_scroll(page, HEADER_THROTTLE_MS, move |scroll_y| {
        set_class(&header, "is-hidden", auto_hide.update(scroll_y));
    });
    Ok(())
}

pub(super) fn install_progress(page: &Page) -> Result<(), SetupError> {
    let bar = page.query(".scroll-progress")?;

    let context = page.clone();
    on_scroll(page, PROGRESS_THROTTLE_MS, move |scroll_y| {
        let document_height = context
            .document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        let viewport_height = context
            .window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0);
        set_style(
            &bar,
            "width",
            &progress_width(scroll_y, document_height, viewport_height),
        );
    });
    Ok(())
}

pub(super) fn install_indicator(page: &Page) -> Result<(), SetupError> {
    let indicator = page.query(".scroll-indicator")?;
    page.inject_style(SCROLL_INDICATOR_CSS)?;

    let update =
        move |scroll_y: f64| set_class(&indicator, "is-hidden", indicator_hidden(scroll_y));
    update(page.scroll_y());
    on_scroll(page, INDICATOR_THROTTLE_MS, update);
    Ok(())
}
