//! Camera follow target

use serde::{Deserialize, Serialize};

/// Tracks the top of the tower and eases the camera height toward it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    /// y of the topmost committed block; the camera looks at this height
    pub target_y: f32,
    /// Current (eased) camera height
    pub height: f32,
    pub offset: f32,
    /// Fraction of the remaining distance closed per tick
    pub easing: f32,
}

impl CameraRig {
    pub fn new(offset: f32, easing: f32) -> Self {
        Self {
            target_y: 0.0,
            height: offset,
            offset,
            easing,
        }
    }

    pub fn look_at_y(&self) -> f32 {
        self.target_y
    }

    /// Retarget to `top_y` and ease toward it by `dt` ticks
    pub fn follow(&mut self, top_y: f32, dt: f32) {
        self.target_y = top_y;
        let goal = top_y + self.offset;
        let t = (self.easing * dt).min(1.0);
        self.height += (goal - self.height) * t;
    }
}
