//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. One `Session::tick` per rendered frame:
//! - Single owner, single writer, no threads
//! - Stable iteration order (level insertion order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod camera;
pub mod collision;
pub mod level;
pub mod session;
pub mod tether;

pub use avatar::{Avatar, spawn_point};
pub use camera::Camera;
pub use collision::{CollisionResult, circle_rect_collision, resolve_circle_rect};
pub use level::{Level, Platform, Row};
pub use session::{ResetReason, Session, TickInput};
pub use tether::{Tether, TetherState, apply_anchor_constraint, try_latch};
