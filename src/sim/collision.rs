//! Circle vs axis-aligned rectangle collision
//!
//! Detection is a closest-point test; response pushes the avatar out of the
//! rectangle and adjusts its velocity. Unlatched landings stop vertical
//! motion, everything else (walls, undersides, any contact while latched)
//! feeds the push back into velocity as a deflection.

use glam::Vec2;

use super::avatar::Avatar;
use super::level::Platform;

/// Result of a circle/rectangle overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circle overlaps the rectangle
    pub hit: bool,
    /// Closest point on the rectangle to the circle center
    pub point: Vec2,
    /// Displacement that moves the circle out of contact
    pub push: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            push: Vec2::ZERO,
        }
    }

    /// Contact from above (push points up the screen)
    #[inline]
    pub fn is_landing(&self) -> bool {
        self.push.y < 0.0
    }
}

/// Check a circle against a rectangle
///
/// When the center sits exactly on the closest point (zero distance) the push
/// direction is undefined, so it always resolves straight up.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Platform) -> CollisionResult {
    let point = rect.closest_point(center);
    let delta = center - point;
    let d = delta.length();

    if d >= radius {
        return CollisionResult::miss();
    }

    let overlap = radius - d;
    let push = if d != 0.0 {
        delta / d * overlap
    } else {
        Vec2::new(0.0, -overlap)
    };

    CollisionResult {
        hit: true,
        point,
        push,
    }
}

/// Push the avatar out of `rect` and apply the velocity policy
pub fn resolve_circle_rect(avatar: &mut Avatar, rect: &Platform) -> CollisionResult {
    let result = circle_rect_collision(avatar.pos, avatar.radius, rect);
    if !result.hit {
        return result;
    }

    avatar.pos += result.push;
    if !avatar.is_latched() && result.is_landing() {
        avatar.vel.y = 0.0;
    } else {
        avatar.vel += result.push;
    }

    result
}

/// Distance from a point to the rectangle (0 inside)
#[inline]
pub fn distance_to_rect(p: Vec2, rect: &Platform) -> f32 {
    (p - rect.closest_point(p)).length()
}
