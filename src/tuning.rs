//! Data-driven physics tuning
//!
//! Every constant that shapes the game feel lives here so it can be tweaked
//! from a JSON file without a rebuild. Missing fields fall back to the
//! stock values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Motion ===
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Velocity multiplier per frame
    pub friction: f32,

    // === Tether ===
    pub min_rope: f32,
    pub max_rope: f32,
    /// Reel-in/out smoothing (0 = frozen, 1 = instant)
    pub reel_easing: f32,

    // === Avatar ===
    pub avatar_radius: f32,
    /// Spawn x as a fraction of the lane width
    pub spawn_x_fraction: f32,

    // === Camera ===
    pub camera_smoothing: f32,
    /// Fraction of viewport height the avatar must rise above before scrolling
    pub camera_deadzone: f32,
    /// Fall distance below the visible window that triggers a reset
    pub fail_safe_margin: f32,

    // === Layout ===
    pub lane_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,

            min_rope: MIN_ROPE,
            max_rope: MAX_ROPE,
            reel_easing: REEL_EASING,

            avatar_radius: AVATAR_RADIUS,
            spawn_x_fraction: SPAWN_X_FRACTION,

            camera_smoothing: CAMERA_SMOOTHING,
            camera_deadzone: CAMERA_DEADZONE,
            fail_safe_margin: FAIL_SAFE_MARGIN,

            lane_ratio: LANE_RATIO,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial objects allowed)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp a rope length to the configured bounds
    #[inline]
    pub fn clamp_rope(&self, len: f32) -> f32 {
        len.clamp(self.min_rope, self.max_rope)
    }

    /// Repair values the simulation can't work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.avatar_radius > 0.0) {
            log::warn!(
                "avatar_radius {} invalid, using {}",
                self.avatar_radius,
                defaults.avatar_radius
            );
            self.avatar_radius = defaults.avatar_radius;
        }

        if !(self.min_rope.is_finite() && self.max_rope.is_finite()) {
            log::warn!("rope bounds not finite, using defaults");
            self.min_rope = defaults.min_rope;
            self.max_rope = defaults.max_rope;
        } else if self.min_rope > self.max_rope {
            log::warn!(
                "rope bounds inverted ({} > {}), swapping",
                self.min_rope,
                self.max_rope
            );
            std::mem::swap(&mut self.min_rope, &mut self.max_rope);
        }

        for (name, value) in [
            ("reel_easing", &mut self.reel_easing),
            ("camera_smoothing", &mut self.camera_smoothing),
            ("camera_deadzone", &mut self.camera_deadzone),
            ("lane_ratio", &mut self.lane_ratio),
            ("spawn_x_fraction", &mut self.spawn_x_fraction),
        ] {
            let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
            if clamped != *value {
                log::warn!("{} {} out of [0, 1], clamped to {}", name, value, clamped);
                *value = clamped;
            }
        }

        self
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning.sanitized();
                }
                Err(e) => log::warn!("Bad tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Can't read tuning file {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
