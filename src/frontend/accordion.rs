use std::{cell::Cell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDetailsElement, Node};

use super::{set_style, Media, Page};
use crate::{
    accordion::{
        initial_wrapper_style, wrapper_transition, Accordion, ClickPlan, Settled, WrapperStyle,
        SETTLE_FALLBACK_MS, WRAPPER_CLASS,
    },
    error::SetupError,
    scheduler::FrameScheduler,
};

fn apply(wrapper: &Element, style: &WrapperStyle) {
    set_style(wrapper, "max-height", &style.max_height);
    set_style(wrapper, "opacity", style.opacity);
}

#[derive(Clone)]
struct FaqItem {
    details: HtmlDetailsElement,
    summary: Element,
    wrapper: Element,
    state: Rc<Cell<Accordion>>,
    frames: Rc<dyn FrameScheduler>,
    media: Media,
}

impl FaqItem {
    fn sync_aria(&self) {
        let _ = self
            .summary
            .set_attribute("aria-expanded", self.state.get().aria_expanded());
    }

    fn click(&self) {
        let mut accordion = self.state.get();
        let plan = accordion.click(self.media.snapshot().reduced_motion);
        self.state.set(accordion);

        match plan {
            ClickPlan::Ignored => {}
            ClickPlan::OpenNow => {
                self.details.set_open(true);
                self.sync_aria();
                apply(&self.wrapper, &WrapperStyle::expanded());
            }
            ClickPlan::CloseNow => {
                self.sync_aria();
                apply(&self.wrapper, &WrapperStyle::collapsed());
                self.details.set_open(false);
            }
            ClickPlan::AnimateOpen => {
                self.details.set_open(true);
                self.sync_aria();
                let height = self.wrapper.scroll_height();
                apply(&self.wrapper, &WrapperStyle::collapsed());
                self.animate_to(WrapperStyle::at_height(height, "1"));
            }
            ClickPlan::AnimateClose => {
                self.sync_aria();
                let height = self.wrapper.scroll_height();
                apply(&self.wrapper, &WrapperStyle::at_height(height, "1"));
                self.animate_to(WrapperStyle::collapsed());
            }
        }
    }

    /// Applies `target` two frames from now so the starting styles are laid
    /// out first, then arms the settle and its fallback.
    fn animate_to(&self, target: WrapperStyle) {
        let item = self.clone();
        self.frames.on_frame(Box::new(move |_| {
            let frames = item.frames.clone();
            frames.on_frame(Box::new(move |_| {
                apply(&item.wrapper, &target);
                let mut accordion = item.state.get();
                let epoch = accordion.arm();
                item.state.set(accordion);
                Timeout::new(SETTLE_FALLBACK_MS, move || item.settle(epoch)).forget();
            }));
        }));
    }

    fn settle(&self, epoch: u64) {
        let mut accordion = self.state.get();
        let settled = accordion.settle(epoch);
        self.state.set(accordion);

        match settled {
            Some(Settled::Opened(style)) => apply(&self.wrapper, &style),
            Some(Settled::Closed) => self.details.set_open(false),
            None => {}
        }
    }
}

/// Moves everything after `summary` into a fresh wrapper. `None` when the
/// item was already wrapped.
fn wrap_contents(
    page: &Page,
    details: &Element,
    summary: &Element,
) -> Result<Option<Element>, SetupError> {
    let mut contents: Vec<Node> = Vec::new();
    let mut sibling = summary.next_sibling();
    while let Some(node) = sibling {
        sibling = node.next_sibling();
        contents.push(node);
    }

    if let [only] = contents.as_slice() {
        let wrapped = only
            .dyn_ref::<Element>()
            .map(|element| element.class_list().contains(WRAPPER_CLASS))
            .unwrap_or(false);
        if wrapped {
            return Ok(None);
        }
    }

    let wrapper = page.document.create_element("div")?;
    wrapper.set_class_name(WRAPPER_CLASS);
    for node in &contents {
        wrapper.append_child(node)?;
    }
    details.append_child(&wrapper)?;
    Ok(Some(wrapper))
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let items = page.query_all(".faq-item")?;

    for element in items {
        let Ok(details) = element.clone().dyn_into::<HtmlDetailsElement>() else {
            continue;
        };
        let Some(summary) = details.query_selector("summary")? else {
            continue;
        };

        let open = details.open();
        let _ = summary.set_attribute("aria-expanded", if open { "true" } else { "false" });

        let Some(wrapper) = wrap_contents(page, &element, &summary)? else {
            continue;
        };
        set_style(&wrapper, "overflow", "hidden");
        set_style(
            &wrapper,
            "transition",
            wrapper_transition(page.env().reduced_motion),
        );
        apply(&wrapper, &initial_wrapper_style(open));

        let item = FaqItem {
            details,
            summary: summary.clone(),
            wrapper: wrapper.clone(),
            state: Rc::new(Cell::new(Accordion::new(open))),
            frames: page.frames.clone(),
            media: page.media.clone(),
        };

        let on_click = item.clone();
        EventListener::new_with_options(
            &summary,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                on_click.click();
            },
        )
        .forget();

        let target = wrapper.clone();
        EventListener::new(&wrapper, "transitionend", move |event| {
            let own = event
                .target()
                .and_then(|origin| origin.dyn_into::<Element>().ok())
                .map(|origin| origin == target)
                .unwrap_or(false);
            if own {
                item.settle(item.state.get().epoch());
            }
        })
        .forget();
    }

    Ok(())
}
