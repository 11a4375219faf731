pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    pub reduced_motion: bool,
    pub narrow_viewport: bool,
    pub touch: bool,
}

impl Environment {
    pub fn decorative_motion(&self) -> bool {
        !self.reduced_motion
    }

    pub fn pointer_tilt(&self) -> bool {
        !self.reduced_motion && !self.touch
    }

    pub fn drag_slider(&self) -> bool {
        self.narrow_viewport
    }
}
