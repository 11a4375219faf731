//! Hover tilt and shine for `.price-card`.

use std::{cell::Cell, rc::Rc};

use crate::scheduler::FrameScheduler;

pub const MAX_TILT_DEG: f64 = 8.0;
pub const NEUTRAL_TILT: &str = "perspective(1000px) rotateY(0deg) rotateX(0deg)";
pub const NEUTRAL_SHINE: &str = "50%";
pub const SHINE_PROPERTY: &str = "--shine-x";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// `(rotate_y, rotate_x)` in degrees: the pointer's offset from the card
/// center scaled to ±[`MAX_TILT_DEG`].
pub fn tilt_angles(rect: CardRect, client_x: f64, client_y: f64) -> (f64, f64) {
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    if center_x <= 0.0 || center_y <= 0.0 {
        return (0.0, 0.0);
    }

    let x = client_x - rect.left;
    let y = client_y - rect.top;
    let rotate_y = (x - center_x) / center_x * MAX_TILT_DEG;
    let rotate_x = (center_y - y) / center_y * MAX_TILT_DEG;
    (rotate_y, rotate_x)
}

pub fn tilt_transform(rect: CardRect, client_x: f64, client_y: f64) -> String {
    let (rotate_y, rotate_x) = tilt_angles(rect, client_x, client_y);
    format!("perspective(1000px) rotateY({rotate_y}deg) rotateX({rotate_x}deg)")
}

pub fn shine_position(rect: CardRect, client_x: f64) -> String {
    if rect.width <= 0.0 {
        return NEUTRAL_SHINE.to_string();
    }
    let percent = ((client_x - rect.left) / rect.width * 100.0).round();
    format!("{percent}%")
}

/// Applies the latest pointer position at most once per frame.
///
/// `pointer_leave` resets synchronously and invalidates any frame that is
/// still queued, so a late frame cannot re-apply a stale position.
pub struct FrameBatcher {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Cell<bool>,
    latest: Cell<(f64, f64)>,
    epoch: Cell<u64>,
    apply: Box<dyn Fn(f64, f64)>,
    reset: Box<dyn Fn()>,
}

impl FrameBatcher {
    pub fn new(
        scheduler: Rc<dyn FrameScheduler>,
        apply: impl Fn(f64, f64) + 'static,
        reset: impl Fn() + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            scheduler,
            pending: Cell::new(false),
            latest: Cell::new((0.0, 0.0)),
            epoch: Cell::new(0),
            apply: Box::new(apply),
            reset: Box::new(reset),
        })
    }

    pub fn pointer_move(self: &Rc<Self>, x: f64, y: f64) {
        self.latest.set((x, y));
        if self.pending.replace(true) {
            return;
        }

        let epoch = self.epoch.get();
        let batcher = Rc::clone(self);
        self.scheduler.on_frame(Box::new(move |_| {
            if batcher.epoch.get() != epoch {
                return;
            }
            batcher.pending.set(false);
            let (x, y) = batcher.latest.get();
            (batcher.apply)(x, y);
        }));
    }

    pub fn pointer_leave(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.pending.set(false);
        (self.reset)();
    }
}
