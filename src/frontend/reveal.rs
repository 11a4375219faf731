//! Effects that start when an element scrolls into view: fade-in, stat
//! count-up, typewriter tags and spinning decorations.

use gloo_timers::callback::Timeout;
use serde_json::json;
use web_sys::Element;

use super::{now, observe::watch, set_class, Page};
use crate::{
    count_up::{parse_stat_value, CountUp, CountUpAnimation},
    error::SetupError,
    scheduler::FrameScheduler,
    styles::{SPIN_CSS, TYPEWRITER_CSS},
    typewriter::{
        TypewriterPlan, CHAR_CLASS, CURSOR_CLASS, DONE_CLASS, REVEALED_CLASS, TYPEWRITER_CLASS,
    },
    visibility::{
        Subscription, Visibility, COUNT_UP_PAUSE_THRESHOLD, COUNT_UP_START_THRESHOLD,
        REVEAL_THRESHOLD, SPIN_THRESHOLD, TYPEWRITER_THRESHOLD,
    },
};

const VISIBLE_CLASS: &str = "is-visible";
const SPINNING_CLASS: &str = "deco-pokeball--spinning";

pub(super) fn install_fade_in(page: &Page) -> Result<(), SetupError> {
    let targets = page.query_all(".fade-in")?;

    if page.env().reduced_motion {
        for target in &targets {
            set_class(target, VISIBLE_CLASS, true);
        }
        return Ok(());
    }

    watch(&targets, REVEAL_THRESHOLD, Subscription::OneShot, |target, _| {
        set_class(target, VISIBLE_CLASS, true);
    })?;
    Ok(())
}

pub(super) fn install_count_up(page: &Page) -> Result<(), SetupError> {
    let stats = page.query_all(".stat-num")?;

    if page.env().reduced_motion {
        for stat in &stats {
            start_count_up(page, stat)?;
        }
        return Ok(());
    }

    let page = page.clone();
    watch(&stats, COUNT_UP_START_THRESHOLD, Subscription::OneShot, move |stat, _| {
        if let Err(error) = start_count_up(&page, stat) {
            page.logger.warn(
                "count_up_skipped",
                json!({ "reason": error.kind(), "detail": error.to_string() }),
            );
        }
    })?;
    Ok(())
}

fn start_count_up(page: &Page, stat: &Element) -> Result<(), SetupError> {
    let text = stat.text_content().unwrap_or_default();
    let Some(value) = parse_stat_value(&text) else {
        page.logger.debug("count_up_skipped", json!({ "text": text }));
        return Ok(());
    };

    let duration_ms = page.config.count_up_duration_ms as f64;
    let count_up = CountUp::new(value, duration_ms);
    if page.env().reduced_motion {
        stat.set_text_content(Some(&count_up.final_text()));
        return Ok(());
    }
    stat.set_text_content(Some(&count_up.initial_text()));

    let target = stat.clone();
    let animation = CountUpAnimation::start(count_up, page.frames.clone(), page.now(), move |text| {
        target.set_text_content(Some(text));
    });

    let window = page.window.clone();
    let running = animation.clone();
    let pause_observer = watch(
        &[stat.clone()],
        COUNT_UP_PAUSE_THRESHOLD,
        Subscription::Repeating,
        move |_, visibility| running.on_visibility(visibility, now(&window)),
    )?;
    animation.set_on_finish(move || pause_observer.disconnect());
    Ok(())
}

pub(super) fn install_typewriter(page: &Page) -> Result<(), SetupError> {
    let tags = page.query_all(".section-tag")?;
    if !page.env().decorative_motion() {
        return Err(SetupError::ReducedMotion);
    }
    page.inject_style(TYPEWRITER_CSS)?;

    for tag in tags {
        let text = tag.text_content().unwrap_or_default();
        let plan = TypewriterPlan::new(&text);

        tag.set_text_content(None);
        tag.set_attribute("aria-label", &text)?;
        set_class(&tag, TYPEWRITER_CLASS, true);

        let mut chars = Vec::with_capacity(plan.len());
        for ch in plan.chars() {
            let span = page.document.create_element("span")?;
            span.set_class_name(CHAR_CLASS);
            span.set_attribute("aria-hidden", "true")?;
            span.set_text_content(Some(&ch.to_string()));
            tag.append_child(&span)?;
            chars.push(span);
        }

        let cursor = page.document.create_element("span")?;
        cursor.set_class_name(CURSOR_CLASS);
        cursor.set_attribute("aria-hidden", "true")?;
        tag.append_child(&cursor)?;

        let frames = page.frames.clone();
        watch(&[tag], TYPEWRITER_THRESHOLD, Subscription::OneShot, move |_, _| {
            for (index, span) in chars.iter().enumerate() {
                let span = span.clone();
                let frames = frames.clone();
                Timeout::new(TypewriterPlan::reveal_delay_ms(index), move || {
                    frames.on_frame(Box::new(move |_| set_class(&span, REVEALED_CLASS, true)));
                })
                .forget();
            }

            let cursor = cursor.clone();
            Timeout::new(plan.cursor_done_delay_ms(), move || {
                set_class(&cursor, DONE_CLASS, true);
            })
            .forget();
        })?;
    }
    Ok(())
}

pub(super) fn install_spin(page: &Page) -> Result<(), SetupError> {
    let balls = page.query_all(".deco-pokeball")?;
    if !page.env().decorative_motion() {
        return Err(SetupError::ReducedMotion);
    }
    page.inject_style(SPIN_CSS)?;

    watch(&balls, SPIN_THRESHOLD, Subscription::Repeating, |ball, visibility| {
        set_class(ball, SPINNING_CLASS, visibility == Visibility::Entered);
    })?;
    Ok(())
}
