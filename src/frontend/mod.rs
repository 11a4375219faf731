//! Browser bindings. Finds the page elements, feeds DOM events into the
//! state machines and writes their output back.

mod accordion;
mod cards;
mod contact;
mod menu;
mod observe;
mod reveal;
mod scrolling;
mod slider;
mod sparkles;

use std::rc::Rc;

use js_sys::Reflect;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CssStyleDeclaration, Document, Element, HtmlElement, MediaQueryList, NodeList, Window};

use crate::{
    config::EffectsConfig,
    environment::{Environment, REDUCED_MOTION_QUERY},
    error::SetupError,
    logging::Logger,
    scheduler::FrameScheduler,
};

struct AnimationFrames {
    window: Window,
}

impl FrameScheduler for AnimationFrames {
    fn on_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        let _ = self.window.request_animation_frame(closure.unchecked_ref());
    }
}

#[derive(Clone)]
pub(crate) struct Media {
    reduced_motion: Option<MediaQueryList>,
    narrow_viewport: Option<MediaQueryList>,
    touch: bool,
}

impl Media {
    fn new(window: &Window, config: &EffectsConfig) -> Self {
        let query = |media: &str| window.match_media(media).ok().flatten();
        let touch = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
            || window.navigator().max_touch_points() > 0;

        Self {
            reduced_motion: query(REDUCED_MOTION_QUERY),
            narrow_viewport: query(&config.narrow_viewport_query()),
            touch,
        }
    }

    pub(crate) fn snapshot(&self) -> Environment {
        Environment {
            reduced_motion: matches(&self.reduced_motion),
            narrow_viewport: matches(&self.narrow_viewport),
            touch: self.touch,
        }
    }
}

fn matches(query: &Option<MediaQueryList>) -> bool {
    query.as_ref().map(|mq| mq.matches()).unwrap_or(false)
}

/// Everything a feature needs from the page. Cheap to clone into closures.
#[derive(Clone)]
pub(crate) struct Page {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) config: EffectsConfig,
    pub(crate) logger: Logger,
    pub(crate) media: Media,
    pub(crate) frames: Rc<dyn FrameScheduler>,
}

impl Page {
    fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        let body = document.body();
        let config = EffectsConfig::from_lookup(|name| body.as_ref()?.get_attribute(name));
        let media = Media::new(&window, &config);
        let frames: Rc<dyn FrameScheduler> = Rc::new(AnimationFrames {
            window: window.clone(),
        });

        Some(Self {
            logger: Logger::new(config.log_level),
            window,
            document,
            config,
            media,
            frames,
        })
    }

    pub(crate) fn env(&self) -> Environment {
        self.media.snapshot()
    }

    pub(crate) fn now(&self) -> f64 {
        now(&self.window)
    }

    pub(crate) fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    pub(crate) fn query(&self, selector: &'static str) -> Result<Element, SetupError> {
        self.document
            .query_selector(selector)?
            .ok_or(SetupError::MissingElement(selector))
    }

    /// All matches; an empty match is an error so the feature is skipped.
    pub(crate) fn query_all(&self, selector: &'static str) -> Result<Vec<Element>, SetupError> {
        let found = elements(&self.document.query_selector_all(selector)?);
        if found.is_empty() {
            return Err(SetupError::MissingElement(selector));
        }
        Ok(found)
    }

    pub(crate) fn inject_style(&self, css: &str) -> Result<(), SetupError> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        let head = self
            .document
            .head()
            .ok_or(SetupError::MissingElement("head"))?;
        head.append_child(&style)?;
        Ok(())
    }
}

pub(crate) fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub(crate) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

pub(crate) fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(style) = style_of(element) {
        let _ = style.set_property(property, value);
    }
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub(crate) fn focus(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.focus();
    }
}

type Install = fn(&Page) -> Result<(), SetupError>;

const FEATURES: [(&str, Install); 16] = [
    ("menu", menu::install),
    ("anchor_scroll", scrolling::install_anchor_scroll),
    ("page_top", scrolling::install_page_top),
    ("sticky_header", scrolling::install_sticky_header),
    ("auto_hide_header", scrolling::install_auto_hide_header),
    ("scroll_progress", scrolling::install_progress),
    ("fade_in", reveal::install_fade_in),
    ("count_up", reveal::install_count_up),
    ("faq_accordion", accordion::install),
    ("contact_form", contact::install),
    ("review_slider", slider::install),
    ("price_cards", cards::install),
    ("sparkles", sparkles::install),
    ("typewriter", reveal::install_typewriter),
    ("spin", reveal::install_spin),
    ("scroll_indicator", scrolling::install_indicator),
];

/// Installs every page feature. A feature whose markup is missing is
/// skipped without touching the others.
pub fn run() {
    let Some(page) = window().and_then(Page::new) else {
        return;
    };

    let env = page.env();
    page.logger.info(
        "effects_started",
        json!({
            "reducedMotion": env.reduced_motion,
            "narrowViewport": env.narrow_viewport,
            "touch": env.touch,
        }),
    );

    for (feature, install) in FEATURES {
        match install(&page) {
            Ok(()) => page.logger.debug("feature_ready", json!({ "feature": feature })),
            Err(error) => page.logger.debug(
                "feature_skipped",
                json!({
                    "feature": feature,
                    "reason": error.kind(),
                    "detail": error.to_string(),
                }),
            ),
        }
    }
}
