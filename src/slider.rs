//! Drag-to-scroll for the `.review-cards` slider in the narrow layout.

pub const POINTER_DRAG_FACTOR: f64 = 1.5;
pub const TOUCH_DRAG_FACTOR: f64 = 1.2;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const GRABBING_CLASS: &str = "is-grabbing";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Anchor {
    start_x: f64,
    start_scroll: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollReset {
    pub scroll_left: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SliderDrag {
    pointer: Option<Anchor>,
    touch: Option<Anchor>,
}

impl SliderDrag {
    /// Starts a grab-scroll. Ignored outside the narrow layout. Returns
    /// whether the grab started.
    pub fn pointer_down(&mut self, x: f64, scroll_left: f64, narrow: bool) -> bool {
        if !narrow {
            return false;
        }
        self.pointer = Some(Anchor {
            start_x: x,
            start_scroll: scroll_left,
        });
        true
    }

    pub fn pointer_move(&self, x: f64) -> Option<f64> {
        let anchor = self.pointer?;
        Some(anchor.start_scroll - (x - anchor.start_x) * POINTER_DRAG_FACTOR)
    }

    pub fn pointer_release(&mut self) -> bool {
        self.pointer.take().is_some()
    }

    pub fn is_grabbing(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn touch_start(&mut self, x: f64, scroll_left: f64) {
        self.touch = Some(Anchor {
            start_x: x,
            start_scroll: scroll_left,
        });
    }

    pub fn touch_move(&self, x: f64) -> Option<f64> {
        let anchor = self.touch?;
        Some(anchor.start_scroll + (anchor.start_x - x) * TOUCH_DRAG_FACTOR)
    }

    pub fn touch_end(&mut self) {
        self.touch = None;
    }

    /// Called after the debounced resize. Leaving the narrow layout clears
    /// every drag and rewinds the slider.
    pub fn viewport_resized(&mut self, narrow: bool) -> Option<ScrollReset> {
        if narrow {
            return None;
        }
        self.pointer = None;
        self.touch = None;
        Some(ScrollReset { scroll_left: 0.0 })
    }
}
