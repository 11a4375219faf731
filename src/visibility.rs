//! Observer thresholds and the enter/exit edge tracker behind them.

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const COUNT_UP_START_THRESHOLD: f64 = 0.5;
pub const COUNT_UP_PAUSE_THRESHOLD: f64 = 0.1;
pub const SPARKLE_THRESHOLD: f64 = 0.1;
pub const TYPEWRITER_THRESHOLD: f64 = 0.5;
pub const SPIN_THRESHOLD: f64 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Entered,
    Exited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    OneShot,
    Repeating,
}

/// Turns intersection reports for one element into enter/exit edges.
///
/// Thresholds only decide when the observer reports; the edge follows
/// `isIntersecting` alone, so an element taller than the viewport still
/// enters even though its ratio never reaches the threshold.
#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    subscription: Subscription,
    visible: bool,
    finished: bool,
}

impl VisibilityTracker {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            visible: false,
            finished: false,
        }
    }

    pub fn observe(&mut self, is_intersecting: bool) -> Option<Visibility> {
        if self.finished || is_intersecting == self.visible {
            return None;
        }
        self.visible = is_intersecting;

        if is_intersecting {
            if self.subscription == Subscription::OneShot {
                self.finished = true;
            }
            Some(Visibility::Entered)
        } else {
            Some(Visibility::Exited)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_then_finishes() {
        let mut tracker = VisibilityTracker::new(Subscription::OneShot);

        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(Visibility::Entered));
        assert!(tracker.is_finished());
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), None);
    }

    #[test]
    fn repeating_reports_each_edge_once() {
        let mut tracker = VisibilityTracker::new(Subscription::Repeating);

        assert_eq!(tracker.observe(true), Some(Visibility::Entered));
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(false), Some(Visibility::Exited));
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(Visibility::Entered));
        assert!(!tracker.is_finished());
    }

    #[test]
    fn tall_element_enters_while_ratio_stays_under_threshold() {
        let mut tracker = VisibilityTracker::new(Subscription::OneShot);

        // Ratios 0.02, 0.05, 0.07: always intersecting, never reaching 0.1.
        let edges: Vec<_> = [true, true, true]
            .into_iter()
            .filter_map(|intersecting| tracker.observe(intersecting))
            .collect();

        assert_eq!(edges, vec![Visibility::Entered]);
    }

    #[test]
    fn barely_visible_count_up_keeps_running() {
        let mut tracker = VisibilityTracker::new(Subscription::Repeating);

        assert_eq!(tracker.observe(true), Some(Visibility::Entered));
        // 5% on screen is still intersecting.
        assert_eq!(tracker.observe(true), None);
    }
}
