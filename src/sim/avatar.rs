//! The player avatar: a circle with a grappling arm

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_circle_rect;
use super::level::Level;
use super::tether::{Tether, apply_anchor_constraint};
use crate::consts::MAX_ROPE;
use crate::tuning::Tuning;
use crate::{angle_between, from_angle};

/// A circular body that aims, swings and climbs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Circle center (world space)
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Direction from the center toward the pointer (radians)
    pub arm_angle: f32,
    pub tether: Tether,
}

impl Avatar {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            arm_angle: 0.0,
            tether: Tether::new(MAX_ROPE),
        }
    }

    /// Avatar sized by `tuning`, rope starting at the tuned maximum
    pub fn from_tuning(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            tether: Tether::new(tuning.max_rope),
            ..Self::new(pos, tuning.avatar_radius)
        }
    }

    #[inline]
    pub fn is_latched(&self) -> bool {
        self.tether.is_latched()
    }

    /// Unit vector along the arm
    #[inline]
    pub fn arm_dir(&self) -> Vec2 {
        from_angle(self.arm_angle)
    }

    /// Where the arm leaves the body surface
    pub fn arm_base(&self) -> Vec2 {
        self.pos + self.arm_dir() * self.radius
    }

    /// Where the arm ends (the anchor when latched)
    pub fn arm_tip(&self, pointer: Vec2, tuning: &Tuning) -> Vec2 {
        self.tether.tip(self.pos, self.arm_dir(), pointer, tuning.max_rope)
    }

    /// Point the arm at the pointer
    pub fn aim(&mut self, pointer: Vec2) {
        self.arm_angle = angle_between(self.pos, pointer);
    }

    /// Gravity, friction, then move
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.vel.y += tuning.gravity;
        self.vel *= tuning.friction;
        self.pos += self.vel;
    }

    /// Advance one frame.
    ///
    /// Order matters for the feel: aim, reel (latched + held), rope
    /// constraint (latched), integrate, then collide with every platform
    /// in level order.
    pub fn update(&mut self, pointer: Vec2, pointer_down: bool, level: &Level, tuning: &Tuning) {
        self.aim(pointer);

        if self.is_latched() && pointer_down {
            self.tether.reel_toward(pointer, self.radius, tuning);
        }

        if self.is_latched() {
            apply_anchor_constraint(self, tuning);
        }

        self.integrate(tuning);

        for rect in level.platforms() {
            resolve_circle_rect(self, rect);
        }
    }

    /// Back to `spawn`, at rest and free
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.tether.release();
    }

    /// Highest point of the body
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }
}

/// Spawn point: a fraction across the lane, resting on the first platform
pub fn spawn_point(level: &Level, play_width: f32, tuning: &Tuning) -> Vec2 {
    let floor_y = level.first().map_or(0.0, |p| p.y);
    Vec2::new(play_width * tuning.spawn_x_fraction, floor_y - tuning.avatar_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tether::try_latch;

    fn ground_level() -> Level {
        let mut level = Level::new(800.0);
        level.add_platform(0.0, 600.0, 800.0, 100.0);
        level
    }

    #[test]
    fn test_aim_and_arm_geometry() {
        let mut a = Avatar::new(Vec2::new(100.0, 100.0), 24.0);
        a.aim(Vec2::new(200.0, 100.0));
        assert!(a.arm_angle.abs() < 1e-6);
        assert!((a.arm_base() - Vec2::new(124.0, 100.0)).length() < 1e-4);

        a.aim(Vec2::new(100.0, 0.0));
        assert!((a.arm_angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let tip = a.arm_tip(Vec2::new(100.0, 0.0), &Tuning::default());
        assert!((tip - Vec2::new(100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_integrate_applies_gravity_then_friction() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(Vec2::ZERO, 24.0);
        a.vel = Vec2::new(10.0, 0.0);
        a.integrate(&tuning);

        assert!((a.vel.x - 9.8).abs() < 1e-5);
        assert!((a.vel.y - 0.392).abs() < 1e-5);
        assert_eq!(a.pos, a.vel);
    }

    #[test]
    fn test_free_fall_lands_on_ground() {
        let tuning = Tuning::default();
        let level = ground_level();
        let mut a = Avatar::new(Vec2::new(400.0, 400.0), 24.0);
        let pointer = Vec2::new(500.0, 100.0);

        for _ in 0..200 {
            a.update(pointer, false, &level, &tuning);
        }

        assert!((a.pos.y - 576.0).abs() < 0.5);
        assert!(a.vel.y.abs() < 0.5);
    }

    #[test]
    fn test_resting_avatar_stays_put() {
        let tuning = Tuning::default();
        let level = ground_level();
        let mut a = Avatar::new(spawn_point(&level, 800.0, &tuning), 24.0);
        let pointer = Vec2::new(300.0, 300.0);

        for _ in 0..10 {
            a.update(pointer, false, &level, &tuning);
        }

        assert!((a.pos.y - 576.0).abs() < 0.5);
        assert!((a.pos.x - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_swing_stays_on_rope() {
        let tuning = Tuning::default();
        let mut level = Level::new(800.0);
        level.add_platform(380.0, 0.0, 40.0, 20.0);
        let mut a = Avatar::new(Vec2::new(400.0, 110.0), 24.0);
        let pointer = Vec2::new(400.0, 10.0);
        a.aim(pointer);
        assert!(try_latch(&mut a, &level, pointer, &tuning));
        a.vel = Vec2::new(6.0, 0.0);

        let anchor = a.tether.anchor().unwrap();
        for _ in 0..60 {
            a.update(pointer, false, &level, &tuning);
        }

        assert!(a.is_latched());
        // Integration drifts off the rope each frame, the constraint pulls it back
        assert!(a.pos.distance(anchor) < 100.0 + 20.0);
    }

    #[test]
    fn test_reel_in_while_held() {
        let tuning = Tuning::default();
        let mut level = Level::new(800.0);
        level.add_platform(380.0, 0.0, 40.0, 20.0);
        let mut a = Avatar::new(Vec2::new(400.0, 130.0), 24.0);
        let pointer = Vec2::new(400.0, 10.0);
        a.aim(pointer);
        assert!(try_latch(&mut a, &level, pointer, &tuning));
        let start = a.tether.rope_length();

        // Pointer held right next to the anchor: rope shrinks toward MIN
        for _ in 0..30 {
            a.update(Vec2::new(400.0, 12.0), true, &level, &tuning);
        }
        assert!(a.tether.rope_length() < start);
        assert!(a.tether.rope_length() >= tuning.min_rope);

        // Not held: length is left alone
        let held = a.tether.rope_length();
        a.update(Vec2::new(400.0, 200.0), false, &level, &tuning);
        assert_eq!(a.tether.rope_length(), held);
    }

    #[test]
    fn test_reset_clears_motion_and_tether() {
        let mut a = Avatar::new(Vec2::ZERO, 24.0);
        a.vel = Vec2::new(3.0, 4.0);
        a.tether = Tether::latched_at(Vec2::new(1.0, 1.0), 30.0);

        a.reset(Vec2::new(120.0, 576.0));
        assert_eq!(a.pos, Vec2::new(120.0, 576.0));
        assert_eq!(a.vel, Vec2::ZERO);
        assert!(!a.is_latched());
    }

    #[test]
    fn test_from_tuning_uses_tuned_rope_and_radius() {
        let tuning = Tuning {
            max_rope: 50.0,
            avatar_radius: 10.0,
            ..Default::default()
        };
        let a = Avatar::from_tuning(Vec2::new(5.0, 6.0), &tuning);
        assert_eq!(a.pos, Vec2::new(5.0, 6.0));
        assert_eq!(a.radius, 10.0);
        assert_eq!(a.tether.rope_length(), 50.0);
        assert!(!a.is_latched());
    }

    #[test]
    fn test_spawn_point() {
        let tuning = Tuning::default();
        let level = ground_level();
        assert_eq!(spawn_point(&level, 800.0, &tuning), Vec2::new(120.0, 576.0));
        assert_eq!(spawn_point(&Level::new(800.0), 800.0, &tuning), Vec2::new(120.0, -24.0));
    }
}
