//! Upward-only follow camera
//!
//! The camera eases toward the avatar only once it rises above the deadzone
//! line (the middle of the screen by default). It never chases the avatar
//! downward; a long fall is caught by the fail-safe instead.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World y shown at the top of the screen
    pub y: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self { y: 0.0 }
    }

    /// Where the camera wants to be for an avatar at `avatar_y`
    pub fn target(&self, avatar_y: f32, viewport_height: f32, tuning: &Tuning) -> f32 {
        let offset = viewport_height * tuning.camera_deadzone;
        let screen_mid = self.y + offset;
        if avatar_y < screen_mid {
            avatar_y - offset
        } else {
            self.y
        }
    }

    /// Ease one frame toward the target
    pub fn follow(&mut self, avatar_y: f32, viewport_height: f32, tuning: &Tuning) {
        let target = self.target(avatar_y, viewport_height, tuning);
        self.y += (target - self.y) * tuning.camera_smoothing;
    }

    /// True once the avatar's top edge is `fail_safe_margin` below the bottom of the view
    pub fn fell_out(&self, avatar_top: f32, viewport_height: f32, tuning: &Tuning) -> bool {
        avatar_top > self.y + viewport_height + tuning.fail_safe_margin
    }

    pub fn reset(&mut self) {
        self.y = 0.0;
    }
}
