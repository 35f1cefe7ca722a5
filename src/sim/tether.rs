//! Tether (rope) constraint solver
//!
//! The rope holds the avatar at `rope_length + radius` from a latched anchor.
//! Corrections are applied to both position and velocity, so the avatar's
//! momentum bends around the anchor and it swings instead of snapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::level::Level;
use crate::tuning::Tuning;

/// Rope state carried by the avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tether {
    /// World point the rope is latched to (None = free)
    anchor: Option<Vec2>,
    /// Current rope length, excluding the avatar radius
    rope_length: f32,
    /// Set on the latch frame; the first constraint pass is skipped
    just_latched: bool,
}

/// Free/latched state, for callers that only care about the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetherState {
    Free,
    Latched,
}

impl Tether {
    pub fn new(rope_length: f32) -> Self {
        Self {
            anchor: None,
            rope_length,
            just_latched: false,
        }
    }

    /// A tether already latched at `anchor` (constraint active next frame)
    pub fn latched_at(anchor: Vec2, rope_length: f32) -> Self {
        Self {
            anchor: Some(anchor),
            rope_length,
            just_latched: false,
        }
    }

    #[inline]
    pub fn is_latched(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn state(&self) -> TetherState {
        if self.is_latched() {
            TetherState::Latched
        } else {
            TetherState::Free
        }
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    pub fn rope_length(&self) -> f32 {
        self.rope_length
    }

    pub fn just_latched(&self) -> bool {
        self.just_latched
    }

    /// Where the rope ends: the anchor when latched, otherwise the reach
    /// point along the arm, capped at the maximum rope length
    pub fn tip(&self, pos: Vec2, dir: Vec2, pointer: Vec2, max_rope: f32) -> Vec2 {
        match self.anchor {
            Some(anchor) => anchor,
            None => {
                let reach = pos.distance(pointer).min(max_rope);
                pos + dir * reach
            }
        }
    }

    fn latch(&mut self, anchor: Vec2, pos: Vec2, radius: f32, tuning: &Tuning) {
        self.anchor = Some(anchor);
        self.rope_length = tuning.clamp_rope(anchor.distance(pos) - radius);
        self.just_latched = true;
    }

    /// Drop the anchor. Rope length is kept for the next latch's reel.
    pub fn release(&mut self) {
        self.anchor = None;
    }

    /// Ease the rope length toward the pointer's distance from the anchor
    pub fn reel_toward(&mut self, pointer: Vec2, radius: f32, tuning: &Tuning) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let target = tuning.clamp_rope(pointer.distance(anchor) - radius);
        self.rope_length += (target - self.rope_length) * tuning.reel_easing;
        // Easing between two in-range values stays in range, but an
        // out-of-range starting length (e.g. after retuning) must not leak out
        self.rope_length = tuning.clamp_rope(self.rope_length);
    }

    /// Positional correction that puts a body at `pos` back on the rope.
    ///
    /// Returns None when free, or on the latch frame (the flag is consumed).
    pub fn correction(&mut self, pos: Vec2, dir: Vec2, radius: f32, tuning: &Tuning) -> Option<Vec2> {
        let anchor = self.anchor?;
        if self.just_latched {
            self.just_latched = false;
            return None;
        }

        self.rope_length = tuning.clamp_rope(self.rope_length);
        let target = anchor - dir * (self.rope_length + radius);
        Some(target - pos)
    }
}

/// Try to latch the avatar's tether onto the level.
///
/// No-op while already latched. Otherwise the tip is hit-tested against
/// every platform in insertion order and the first one containing it wins.
/// Returns true if a new latch was made.
pub fn try_latch(avatar: &mut Avatar, level: &Level, pointer: Vec2, tuning: &Tuning) -> bool {
    if avatar.is_latched() {
        return false;
    }

    let tip = avatar.arm_tip(pointer, tuning);
    if level.hit_test(tip).is_none() {
        log::debug!("Latch missed at ({:.1}, {:.1})", tip.x, tip.y);
        return false;
    }

    let (pos, radius) = (avatar.pos, avatar.radius);
    avatar.tether.latch(tip, pos, radius, tuning);
    log::debug!(
        "Latched at ({:.1}, {:.1}), rope {:.1}",
        tip.x,
        tip.y,
        avatar.tether.rope_length()
    );
    true
}

/// Pull the avatar back onto its rope; the correction doubles as an impulse
pub fn apply_anchor_constraint(avatar: &mut Avatar, tuning: &Tuning) {
    let dir = avatar.arm_dir();
    let (pos, radius) = (avatar.pos, avatar.radius);
    if let Some(correction) = avatar.tether.correction(pos, dir, radius, tuning) {
        avatar.pos += correction;
        avatar.vel += correction;
    }
}
