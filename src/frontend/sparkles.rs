use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use web_sys::{Document, Element};

use super::{observe::watch, set_style, Page};
use crate::{
    error::SetupError,
    sparkle::{SparklePool, SparkleSpawner, SpawnerCommand, BATCH_STAGGER_MS},
    styles::SPARKLE_CSS,
    visibility::{Subscription, Visibility, SPARKLE_THRESHOLD},
};

/// Releases a sparkle whose `animationend` never arrived.
const LOST_SPARKLE_GRACE_MS: f64 = 200.0;

#[derive(Clone)]
struct Hero {
    document: Document,
    element: Element,
    pool: Rc<RefCell<SparklePool>>,
}

impl Hero {
    fn burst(&self) {
        let count = self.pool.borrow_mut().batch_size();
        for index in 0..count {
            let hero = self.clone();
            let delay = u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(BATCH_STAGGER_MS);
            Timeout::new(delay, move || hero.spawn()).forget();
        }
    }

    fn spawn(&self) {
        let Some(look) = self.pool.borrow_mut().try_spawn() else {
            return;
        };

        let sparkle = match self.create(&look.class_name(), &look.style()) {
            Ok(sparkle) => sparkle,
            Err(_) => {
                self.pool.borrow_mut().release();
                return;
            }
        };

        let released = Rc::new(Cell::new(false));
        let finish = {
            let pool = self.pool.clone();
            let sparkle = sparkle.clone();
            move || {
                if released.replace(true) {
                    return;
                }
                sparkle.remove();
                pool.borrow_mut().release();
            }
        };

        let on_end = finish.clone();
        EventListener::once(&sparkle, "animationend", move |_| on_end()).forget();

        let grace_ms = look.duration_s * 1_000.0 + LOST_SPARKLE_GRACE_MS;
        Timeout::new(grace_ms as u32, finish).forget();
    }

    fn create(&self, class_name: &str, style: &str) -> Result<Element, SetupError> {
        let sparkle = self.document.create_element("span")?;
        sparkle.set_class_name(class_name);
        sparkle.set_attribute("aria-hidden", "true")?;
        sparkle.set_attribute("style", style)?;
        self.element.append_child(&sparkle)?;
        Ok(sparkle)
    }
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let element = page.query(".hero")?;
    if !page.env().decorative_motion() {
        return Err(SetupError::ReducedMotion);
    }
    page.inject_style(SPARKLE_CSS)?;

    let position = page
        .window
        .get_computed_style(&element)?
        .map(|style| style.get_property_value("position"))
        .transpose()?;
    if position.as_deref() == Some("static") {
        set_style(&element, "position", "relative");
    }
    set_style(&element, "overflow", "hidden");

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let hero = Hero {
        document: page.document.clone(),
        element: element.clone(),
        pool: Rc::new(RefCell::new(SparklePool::new(page.config.sparkle_max, seed))),
    };

    let interval_ms = u32::try_from(page.config.sparkle_interval_ms).unwrap_or(u32::MAX);
    let mut spawner = SparkleSpawner::default();
    let mut ticker: Option<Interval> = None;

    watch(&[element], SPARKLE_THRESHOLD, Subscription::Repeating, move |_, visibility| {
        match spawner.on_visibility(visibility == Visibility::Entered) {
            Some(SpawnerCommand::Start) => {
                hero.burst();
                let hero = hero.clone();
                ticker = Some(Interval::new(interval_ms, move || hero.burst()));
            }
            Some(SpawnerCommand::Stop) => ticker = None,
            None => {}
        }
    })?;
    Ok(())
}
