//! Grapple Climb - A grapple-and-climb physics playground
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (avatar, tether, collisions, camera)
//! - `layout`: Centered play lane derived from the viewport
//! - `tuning`: Data-driven physics constants
//! - `render`: World entities mapped to draw primitives
//! - `input`: Pointer/key events mapped to session calls

pub mod input;
pub mod layout;
pub mod render;
pub mod sim;
pub mod tuning;

pub use layout::Layout;
pub use render::{DrawCommand, RenderFrame};
pub use sim::{Session, TickInput};
pub use tuning::Tuning;

use glam::Vec2;

/// Stock physics constants (one simulation step per rendered frame)
pub mod consts {
    /// Downward acceleration added to velocity every frame
    pub const GRAVITY: f32 = 0.4;
    /// Velocity multiplier applied every frame
    pub const FRICTION: f32 = 0.98;

    /// Rope length bounds
    pub const MIN_ROPE: f32 = 6.0;
    pub const MAX_ROPE: f32 = 120.0;
    /// Fraction of the gap to the target length closed per frame while reeling
    pub const REEL_EASING: f32 = 0.25;

    /// Avatar circle radius
    pub const AVATAR_RADIUS: f32 = 24.0;
    /// Spawn x as a fraction of the lane width
    pub const SPAWN_X_FRACTION: f32 = 0.15;

    /// Camera easing per frame
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    /// Camera scrolls once the avatar rises above this fraction of the viewport
    pub const CAMERA_DEADZONE: f32 = 0.5;
    /// How far below the visible window the avatar may fall before reset
    pub const FAIL_SAFE_MARGIN: f32 = 300.0;

    /// Lane width as a fraction of the viewport width (5/8)
    pub const LANE_RATIO: f32 = 5.0 / 8.0;

    /// Default platform sizes
    pub const LEDGE_HEIGHT: f32 = 12.0;
    pub const ROW_LEDGE_WIDTH: f32 = 80.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
