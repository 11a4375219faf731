//! FAQ `details` items that animate open and closed.
//!
//! The item ignores clicks until the running animation settles, so rapid
//! clicks can never leave `open`, `aria-expanded` and the wrapper styles out
//! of step. An animation only settles once its target styles are applied and
//! only for its own epoch.

pub const WRAPPER_CLASS: &str = "faq-content-wrapper";
pub const TRANSITION: &str = "max-height 0.3s ease, opacity 0.3s ease";
pub const TRANSITION_MS: u32 = 300;
/// Settles an animation whose `transitionend` never arrives (nothing to
/// animate, element hidden).
pub const SETTLE_FALLBACK_MS: u32 = TRANSITION_MS + 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperStyle {
    pub max_height: String,
    pub opacity: &'static str,
}

impl WrapperStyle {
    pub fn expanded() -> Self {
        Self {
            max_height: "none".to_string(),
            opacity: "1",
        }
    }

    pub fn collapsed() -> Self {
        Self {
            max_height: "0".to_string(),
            opacity: "0",
        }
    }

    pub fn at_height(height: i32, opacity: &'static str) -> Self {
        Self {
            max_height: format!("{}px", height.max(0)),
            opacity,
        }
    }
}

pub fn initial_wrapper_style(open: bool) -> WrapperStyle {
    if open {
        WrapperStyle::expanded()
    } else {
        WrapperStyle::collapsed()
    }
}

pub fn wrapper_transition(reduced_motion: bool) -> &'static str {
    if reduced_motion {
        "none"
    } else {
        TRANSITION
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    Opening,
    Closing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickPlan {
    Ignored,
    OpenNow,
    CloseNow,
    /// Set `open` and `aria-expanded="true"`, measure the content, collapse,
    /// then two frames later grow to the measured height and wait for
    /// [`Accordion::settle`].
    AnimateOpen,
    /// Set `aria-expanded="false"`, pin the measured height, then two frames
    /// later collapse and wait for [`Accordion::settle`].
    AnimateClose,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settled {
    Opened(WrapperStyle),
    Closed,
}

#[derive(Clone, Copy, Debug)]
pub struct Accordion {
    open: bool,
    motion: Option<Motion>,
    epoch: u64,
    armed: bool,
}

impl Accordion {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            motion: None,
            epoch: 0,
            armed: false,
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn click(&mut self, reduced_motion: bool) -> ClickPlan {
        if self.motion.is_some() {
            return ClickPlan::Ignored;
        }

        self.open = !self.open;
        let (motion, plan) = match (self.open, reduced_motion) {
            (true, true) => return ClickPlan::OpenNow,
            (false, true) => return ClickPlan::CloseNow,
            (true, false) => (Motion::Opening, ClickPlan::AnimateOpen),
            (false, false) => (Motion::Closing, ClickPlan::AnimateClose),
        };
        self.motion = Some(motion);
        self.epoch = self.epoch.wrapping_add(1);
        self.armed = false;
        plan
    }

    /// Marks the target styles as applied and returns the epoch a settle
    /// must present.
    pub fn arm(&mut self) -> u64 {
        self.armed = self.motion.is_some();
        self.epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Finishes the running animation. Before [`Accordion::arm`], for another
    /// epoch, or once already settled this returns `None`.
    pub fn settle(&mut self, epoch: u64) -> Option<Settled> {
        if !self.armed || epoch != self.epoch {
            return None;
        }
        self.armed = false;
        match self.motion.take()? {
            Motion::Opening => Some(Settled::Opened(WrapperStyle::expanded())),
            Motion::Closing => Some(Settled::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animated_open_then_settle() {
        let mut item = Accordion::new(false);

        assert_eq!(item.click(false), ClickPlan::AnimateOpen);
        assert_eq!(item.aria_expanded(), "true");
        assert_eq!(item.click(false), ClickPlan::Ignored);

        let epoch = item.arm();
        assert_eq!(item.settle(epoch), Some(Settled::Opened(WrapperStyle::expanded())));
        assert_eq!(item.settle(epoch), None);
        assert_eq!(item.click(false), ClickPlan::AnimateClose);
    }

    #[test]
    fn animated_close_drops_open_only_when_settled() {
        let mut item = Accordion::new(true);

        assert_eq!(item.click(false), ClickPlan::AnimateClose);
        assert_eq!(item.aria_expanded(), "false");
        let epoch = item.arm();
        assert_eq!(item.settle(epoch), Some(Settled::Closed));
    }

    #[test]
    fn transition_end_before_target_styles_does_not_settle() {
        let mut item = Accordion::new(false);

        assert_eq!(item.click(false), ClickPlan::AnimateOpen);
        // The collapse applied ahead of the measured height may end a
        // transition of its own.
        assert_eq!(item.settle(item.epoch()), None);
        assert_eq!(item.click(false), ClickPlan::Ignored);

        let epoch = item.arm();
        assert_eq!(item.settle(epoch), Some(Settled::Opened(WrapperStyle::expanded())));
    }

    #[test]
    fn stale_fallback_cannot_settle_the_next_animation() {
        let mut item = Accordion::new(false);

        item.click(false);
        let first = item.arm();
        assert!(item.settle(item.epoch()).is_some());

        assert_eq!(item.click(false), ClickPlan::AnimateClose);
        let second = item.arm();
        assert_ne!(first, second);
        assert_eq!(item.settle(first), None);
        assert_eq!(item.settle(second), Some(Settled::Closed));
    }

    #[test]
    fn reduced_motion_applies_end_state_at_once() {
        let mut item = Accordion::new(false);

        assert_eq!(item.click(true), ClickPlan::OpenNow);
        assert_eq!(item.click(true), ClickPlan::CloseNow);
        let epoch = item.arm();
        assert_eq!(item.settle(epoch), None);
    }

    #[test]
    fn initial_styles_follow_open_state() {
        assert_eq!(initial_wrapper_style(true), WrapperStyle::expanded());
        assert_eq!(initial_wrapper_style(false).max_height, "0");
        assert_eq!(wrapper_transition(true), "none");
        assert_eq!(WrapperStyle::at_height(-5, "0").max_height, "0px");
        assert_eq!(WrapperStyle::at_height(120, "1").max_height, "120px");
    }
}
