//! Host capabilities the animated features are written against.
//!
//! The browser implementation lives in `frontend`; tests drive the same
//! features with `ManualScheduler`.

use std::rc::Rc;

/// Runs a callback before the next repaint with the frame timestamp in
/// milliseconds.
pub trait FrameScheduler {
    fn on_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn on_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        (**self).on_frame(callback);
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;
