//! Rate limiters for scroll and resize handlers.

/// Lets a call through at most once per `wait_ms`, dropping the rest.
#[derive(Clone, Debug)]
pub struct Throttle {
    wait_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: f64::from(wait_ms),
            last_ms: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.wait_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Holds the pending timer of a debounced call.
#[derive(Debug)]
pub struct Debounce<H> {
    pending: Option<H>,
}

impl<H> Default for Debounce<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> Debounce<H> {
    pub fn schedule(&mut self, handle: H) {
        self.pending = Some(handle);
    }
}
