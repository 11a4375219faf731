use std::{cell::Cell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Node};

use super::{elements, focus, set_class, Page};
use crate::{
    error::SetupError,
    menu::{FocusRequest, Menu, MenuInput, MenuOutcome, MenuState},
};

const FOCUSABLE: &str = r#"a[href], button, [tabindex]:not([tabindex="-1"])"#;

#[derive(Clone)]
struct MenuDom {
    document: Document,
    toggle: Element,
    panel: Element,
    menu: Rc<Cell<Menu>>,
}

impl MenuDom {
    fn state(&self) -> MenuState {
        self.menu.get().state()
    }

    fn apply(&self, input: MenuInput) -> MenuOutcome {
        let mut menu = self.menu.get();
        let outcome = menu.handle(input);
        self.menu.set(menu);

        if outcome.changed {
            self.render(outcome.state);
        }
        if let Some(request) = outcome.focus {
            self.focus(request);
        }
        outcome
    }

    fn render(&self, state: MenuState) {
        set_class(&self.toggle, "active", state.is_open());
        set_class(&self.panel, "is-open", state.is_open());
        let _ = self
            .toggle
            .set_attribute("aria-expanded", state.aria_expanded());
        let _ = self.panel.set_attribute("aria-hidden", state.aria_hidden());
    }

    fn ring(&self) -> Vec<Element> {
        let mut ring = vec![self.toggle.clone()];
        if let Ok(list) = self.panel.query_selector_all(FOCUSABLE) {
            ring.extend(elements(&list));
        }
        ring
    }

    fn focus(&self, request: FocusRequest) {
        match request {
            FocusRequest::Toggle => focus(&self.toggle),
            FocusRequest::FirstLink => {
                if let Ok(Some(link)) = self.panel.query_selector("a") {
                    focus(&link);
                }
            }
            FocusRequest::Ring(index) => {
                if let Some(target) = self.ring().get(index) {
                    focus(target);
                }
            }
        }
    }

    fn tab(&self, shift: bool) -> MenuInput {
        let ring = self.ring();
        let active = self.document.active_element();
        let focused = active.and_then(|active| ring.iter().position(|el| *el == active));
        MenuInput::Tab {
            shift,
            focused,
            ring_len: ring.len(),
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.toggle.contains(target) || self.panel.contains(target)
    }
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let dom = MenuDom {
        document: page.document.clone(),
        toggle: page.query(".drop_btn")?,
        panel: page.query(".drop_menu")?,
        menu: Rc::new(Cell::new(Menu::default())),
    };

    let on_toggle = dom.clone();
    EventListener::new(&dom.toggle, "click", move |_| {
        on_toggle.apply(MenuInput::ToggleClicked);
    })
    .forget();

    for link in elements(&dom.panel.query_selector_all("a")?) {
        let on_link = dom.clone();
        EventListener::new(&link, "click", move |_| {
            on_link.apply(MenuInput::LinkClicked);
        })
        .forget();
    }

    let on_key = dom.clone();
    EventListener::new_with_options(
        &page.document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if !on_key.state().is_open() {
                return;
            }
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let input = match event.key().as_str() {
                "Escape" => MenuInput::Escape,
                "Tab" => on_key.tab(event.shift_key()),
                _ => return,
            };
            if on_key.apply(input).prevent_default {
                event.prevent_default();
            }
        },
    )
    .forget();

    let on_outside = dom.clone();
    EventListener::new(&page.document, "click", move |event| {
        if !on_outside.state().is_open() {
            return;
        }
        let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
        if !on_outside.contains(target.as_ref()) {
            on_outside.apply(MenuInput::OutsideClicked);
        }
    })
    .forget();

    Ok(())
}
