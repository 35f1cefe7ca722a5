//! Centered play lane layout
//!
//! The level lives in a strip in the middle of the viewport; the margins on
//! either side (gutters) hold story text.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_RATIO;

/// Lane geometry derived from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Width of the play lane (whole pixels)
    pub play_width: f32,
    /// Width of each side gutter, i.e. the lane's left edge on screen
    pub gutter_x: f32,
}

impl Layout {
    /// Lane layout for the stock 5/8 ratio
    pub fn compute(viewport_width: f32) -> Self {
        Self::with_ratio(viewport_width, LANE_RATIO)
    }

    pub fn with_ratio(viewport_width: f32, ratio: f32) -> Self {
        let play_width = (viewport_width * ratio).floor();
        Self {
            play_width,
            gutter_x: (viewport_width - play_width) / 2.0,
        }
    }

    /// Lane-relative x of a screen-space x
    #[inline]
    pub fn lane_x(&self, screen_x: f32) -> f32 {
        screen_x - self.gutter_x
    }
}
