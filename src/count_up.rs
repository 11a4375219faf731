//! Count-up animation for `.stat-num` figures.
//!
//! A [`CountUp`] accumulates frame time only while its element is visible
//! and renders `round(ease_out_cubic(progress) × target)`. A
//! [`CountUpAnimation`] drives one through a [`FrameScheduler`] and keeps at
//! most one frame request alive.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::LazyLock,
};

use regex::Regex;

use crate::{scheduler::FrameScheduler, visibility::Visibility};

static STAT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9,]+)(.*)$").expect("stat pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatValue {
    pub value: u64,
    pub suffix: String,
    pub grouped: bool,
}

impl StatValue {
    pub fn render(&self, value: u64) -> String {
        format!("{}{}", format_number(value, self.grouped), self.suffix)
    }
}

/// Leading digits (commas allowed) followed by any suffix. Returns `None`
/// for text that has no digits or does not fit in a `u64`.
pub fn parse_stat_value(text: &str) -> Option<StatValue> {
    let captures = STAT_TEXT.captures(text.trim())?;
    let digits = captures.get(1)?.as_str();
    let suffix = captures.get(2).map_or("", |m| m.as_str());

    let value = digits.replace(',', "").parse::<u64>().ok()?;

    Some(StatValue {
        value,
        suffix: suffix.to_string(),
        grouped: digits.contains(','),
    })
}

pub fn format_number(value: u64, grouped: bool) -> String {
    let digits = value.to_string();
    if !grouped {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug)]
pub struct CountUp {
    stat: StatValue,
    duration_ms: f64,
    elapsed_ms: f64,
    last_frame_ms: Option<f64>,
    paused: bool,
    done: bool,
}

impl CountUp {
    pub fn new(stat: StatValue, duration_ms: f64) -> Self {
        Self {
            stat,
            duration_ms,
            elapsed_ms: 0.0,
            last_frame_ms: None,
            paused: false,
            done: false,
        }
    }

    pub fn initial_text(&self) -> String {
        self.stat.render(0)
    }

    pub fn final_text(&self) -> String {
        self.stat.render(self.stat.value)
    }

    pub fn start(&mut self, now: f64) {
        self.last_frame_ms = Some(now);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Time between `pause` and `resume` is never counted: the next frame
    /// measures from `now`.
    pub fn resume(&mut self, now: f64) {
        self.paused = false;
        self.last_frame_ms = Some(now);
    }

    /// Advances to the frame at `now` and returns the text to render, or
    /// `None` while paused or after completion.
    pub fn tick(&mut self, now: f64) -> Option<String> {
        if self.paused || self.done {
            return None;
        }

        if let Some(last) = self.last_frame_ms {
            self.elapsed_ms += (now - last).max(0.0);
        }
        self.last_frame_ms = Some(now);

        let progress = self.progress();
        if progress >= 1.0 {
            self.done = true;
            return Some(self.final_text());
        }

        Some(self.stat.render(self.value_at(progress)))
    }

    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    pub fn value_at(&self, progress: f64) -> u64 {
        let eased = ease_out_cubic(progress.clamp(0.0, 1.0));
        (eased * self.stat.value as f64).round() as u64
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

pub struct CountUpAnimation {
    state: RefCell<CountUp>,
    frame_pending: Cell<bool>,
    scheduler: Rc<dyn FrameScheduler>,
    render: Box<dyn Fn(&str)>,
    on_finish: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl CountUpAnimation {
    pub fn start(
        count_up: CountUp,
        scheduler: Rc<dyn FrameScheduler>,
        now: f64,
        render: impl Fn(&str) + 'static,
    ) -> Rc<Self> {
        let animation = Rc::new(Self {
            state: RefCell::new(count_up),
            frame_pending: Cell::new(false),
            scheduler,
            render: Box::new(render),
            on_finish: RefCell::new(None),
        });
        animation.state.borrow_mut().start(now);
        animation.request_frame();
        animation
    }

    pub fn set_on_finish(&self, on_finish: impl FnOnce() + 'static) {
        *self.on_finish.borrow_mut() = Some(Box::new(on_finish));
    }

    pub fn on_visibility(self: &Rc<Self>, visibility: Visibility, now: f64) {
        match visibility {
            Visibility::Entered => {
                self.state.borrow_mut().resume(now);
                self.request_frame();
            }
            Visibility::Exited => self.state.borrow_mut().pause(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.borrow().is_done()
    }

    fn request_frame(self: &Rc<Self>) {
        if self.frame_pending.get() || self.state.borrow().is_done() {
            return;
        }
        self.frame_pending.set(true);

        let animation = Rc::clone(self);
        self.scheduler
            .on_frame(Box::new(move |timestamp| animation.frame(timestamp)));
    }

    fn frame(self: &Rc<Self>, timestamp: f64) {
        self.frame_pending.set(false);

        let Some(text) = self.state.borrow_mut().tick(timestamp) else {
            return;
        };
        (self.render)(&text);

        if self.state.borrow().is_done() {
            if let Some(on_finish) = self.on_finish.borrow_mut().take() {
                on_finish();
            }
        } else {
            self.request_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use proptest::prelude::*;

    fn count_up(target: u64, duration_ms: f64) -> CountUp {
        CountUp::new(
            StatValue {
                value: target,
                suffix: String::new(),
                grouped: false,
            },
            duration_ms,
        )
    }

    #[test]
    fn parses_grouped_plain_and_suffixed_values() {
        assert_eq!(
            parse_stat_value(" 50,000 "),
            Some(StatValue {
                value: 50_000,
                suffix: String::new(),
                grouped: true,
            })
        );
        assert_eq!(
            parse_stat_value("7"),
            Some(StatValue {
                value: 7,
                suffix: String::new(),
                grouped: false,
            })
        );
        assert_eq!(
            parse_stat_value("10%"),
            Some(StatValue {
                value: 10,
                suffix: "%".to_string(),
                grouped: false,
            })
        );
        assert_eq!(
            parse_stat_value("1,200件以上").map(|stat| stat.suffix),
            Some("件以上".to_string())
        );
    }

    #[test]
    fn malformed_stat_text_is_rejected() {
        assert_eq!(parse_stat_value(""), None);
        assert_eq!(parse_stat_value("約100"), None);
        assert_eq!(parse_stat_value(",,,"), None);
        assert_eq!(parse_stat_value("99999999999999999999999"), None);
    }

    #[test]
    fn formats_thousands_groups() {
        assert_eq!(format_number(0, true), "0");
        assert_eq!(format_number(999, true), "999");
        assert_eq!(format_number(1_000, true), "1,000");
        assert_eq!(format_number(50_000, true), "50,000");
        assert_eq!(format_number(1_234_567, true), "1,234,567");
        assert_eq!(format_number(1_234_567, false), "1234567");
    }

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn initial_and_final_text_carry_suffix_and_grouping() {
        let stat = parse_stat_value("12,000+").expect("valid stat");
        let count_up = CountUp::new(stat, 2_000.0);

        assert_eq!(count_up.initial_text(), "0+");
        assert_eq!(count_up.final_text(), "12,000+");
    }

    #[test]
    fn paused_time_adds_no_progress() {
        let mut count_up = count_up(100, 2_000.0);
        count_up.start(0.0);

        count_up.tick(500.0);
        assert_eq!(count_up.elapsed_ms(), 500.0);

        count_up.pause();
        assert_eq!(count_up.tick(4_000.0), None);
        assert_eq!(count_up.elapsed_ms(), 500.0);

        count_up.resume(10_000.0);
        count_up.tick(10_250.0);
        assert_eq!(count_up.elapsed_ms(), 750.0);
    }

    #[test]
    fn backwards_frame_timestamps_do_not_rewind() {
        let mut count_up = count_up(100, 2_000.0);
        count_up.start(1_000.0);

        count_up.tick(990.0);
        assert_eq!(count_up.elapsed_ms(), 0.0);
    }

    #[test]
    fn completes_on_exact_target_and_stops() {
        let mut count_up = count_up(1_234, 2_000.0);
        count_up.start(0.0);

        assert_eq!(count_up.tick(2_500.0).as_deref(), Some("1234"));
        assert!(count_up.is_done());
        assert_eq!(count_up.tick(2_600.0), None);
    }

    #[test]
    fn animation_requests_one_frame_at_a_time() {
        let scheduler = Rc::new(ManualScheduler::default());
        let rendered = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = rendered.clone();

        let animation = CountUpAnimation::start(
            count_up(100, 1_000.0),
            scheduler.clone(),
            0.0,
            move |text| sink.borrow_mut().push(text.to_string()),
        );
        assert_eq!(scheduler.pending(), 1);

        animation.on_visibility(Visibility::Entered, 0.0);
        assert_eq!(scheduler.pending(), 1, "resume must not start a second chain");

        scheduler.run_frame(500.0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(rendered.borrow().last().map(String::as_str), Some("88"));
    }

    #[test]
    fn animation_pauses_offscreen_and_finishes_once() {
        let scheduler = Rc::new(ManualScheduler::default());
        let rendered = Rc::new(RefCell::new(Vec::<String>::new()));
        let finished = Rc::new(Cell::new(0));
        let sink = rendered.clone();
        let finish_count = finished.clone();

        let animation = CountUpAnimation::start(
            count_up(100, 1_000.0),
            scheduler.clone(),
            0.0,
            move |text| sink.borrow_mut().push(text.to_string()),
        );
        animation.set_on_finish(move || finish_count.set(finish_count.get() + 1));

        scheduler.run_frame(400.0);
        animation.on_visibility(Visibility::Exited, 450.0);

        // The frame already queued runs while hidden and must not count.
        scheduler.run_frame(5_000.0);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(rendered.borrow().len(), 1);

        animation.on_visibility(Visibility::Entered, 9_000.0);
        scheduler.run_frame(9_300.0);
        assert!(!animation.is_done());

        scheduler.run_frame(9_600.0);
        assert!(animation.is_done());
        assert_eq!(rendered.borrow().last().map(String::as_str), Some("100"));
        assert_eq!(finished.get(), 1);
        assert_eq!(scheduler.pending(), 0);

        animation.on_visibility(Visibility::Entered, 10_000.0);
        assert_eq!(scheduler.pending(), 0, "a finished animation never re-enters");
    }

    proptest! {
        #[test]
        fn displayed_values_rise_monotonically_to_target(
            target in 0u64..5_000_000,
            duration in 100.0f64..10_000.0,
            steps in proptest::collection::vec(0.0f64..400.0, 1..60),
        ) {
            let mut count_up = count_up(target, duration);
            count_up.start(0.0);

            let mut now = 0.0;
            let mut previous = 0u64;
            for step in steps {
                now += step;
                if let Some(text) = count_up.tick(now) {
                    let shown: u64 = text.parse().expect("plain digits");
                    prop_assert!(shown >= previous);
                    prop_assert!(shown <= target);
                    previous = shown;
                }
            }

            let text = count_up.tick(now + duration);
            if let Some(text) = text {
                prop_assert_eq!(text, target.to_string());
            } else {
                prop_assert!(count_up.is_done());
                prop_assert_eq!(previous, target);
            }
        }
    }
}
