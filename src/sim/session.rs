//! Session: owns the level, avatar and camera, and advances them per frame

use glam::Vec2;

use super::avatar::{Avatar, spawn_point};
use super::camera::Camera;
use super::level::Level;
use super::tether::try_latch;
use crate::layout::Layout;
use crate::render::{RenderFrame, ScreenTransform};
use crate::tuning::Tuning;

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in lane-relative world space
    pub pointer: Vec2,
    /// Whether the pointer button is held
    pub pointer_down: bool,
}

/// Why the session was reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Explicit reset (key press, UI)
    Requested,
    /// Avatar fell too far below the visible window
    FellOut,
}

/// All mutable play state. Single owner, single writer.
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    layout: Layout,
    viewport: Vec2,
    level: Level,
    avatar: Avatar,
    camera: Camera,
    /// Last known world pointer (used by press events and render)
    pointer: Vec2,
    frame: u64,
    resets: u32,
}

impl Session {
    /// New session on the starter level
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_tuning(viewport_width, viewport_height, Tuning::default())
    }

    pub fn with_tuning(viewport_width: f32, viewport_height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let layout = Layout::with_ratio(viewport_width, tuning.lane_ratio);
        let level = Level::starter(layout.play_width, viewport_height);
        Self::with_level(viewport_width, viewport_height, tuning, level)
    }

    /// New session on a custom level. `tuning` is sanitized first.
    pub fn with_level(viewport_width: f32, viewport_height: f32, tuning: Tuning, level: Level) -> Self {
        let tuning = tuning.sanitized();
        let layout = Layout::with_ratio(viewport_width, tuning.lane_ratio);
        let spawn = spawn_point(&level, layout.play_width, &tuning);
        let avatar = Avatar::from_tuning(spawn, &tuning);

        log::info!(
            "Session started: viewport {}x{}, lane {} (gutter {}), {} platforms",
            viewport_width,
            viewport_height,
            layout.play_width,
            layout.gutter_x,
            level.len()
        );

        Self {
            tuning,
            layout,
            viewport: Vec2::new(viewport_width, viewport_height),
            level,
            avatar,
            camera: Camera::new(),
            pointer: spawn,
            frame: 0,
            resets: 0,
        }
    }

    /// Advance one frame and describe what to draw.
    ///
    /// Camera first (from the avatar's position at the start of the frame),
    /// then the avatar, then the fail-safe check.
    pub fn tick(&mut self, input: &TickInput) -> RenderFrame {
        self.pointer = input.pointer;
        self.frame += 1;

        let height = self.viewport.y;
        self.camera.follow(self.avatar.pos.y, height, &self.tuning);

        self.avatar
            .update(input.pointer, input.pointer_down, &self.level, &self.tuning);

        if self.camera.fell_out(self.avatar.top(), height, &self.tuning) {
            self.reset(ResetReason::FellOut);
        }

        self.render_frame()
    }

    /// Pointer pressed: try to latch toward `pointer`. Returns true on a new latch.
    pub fn on_pointer_down(&mut self, pointer: Vec2) -> bool {
        self.pointer = pointer;
        try_latch(&mut self.avatar, &self.level, pointer, &self.tuning)
    }

    /// Pointer released: let go of the rope
    pub fn on_pointer_up(&mut self) {
        if self.avatar.is_latched() {
            log::debug!("Released tether");
        }
        self.avatar.tether.release();
    }

    pub fn on_reset_requested(&mut self) {
        self.reset(ResetReason::Requested);
    }

    /// Recompute the lane. The level keeps its geometry.
    pub fn on_viewport_resized(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.layout = Layout::with_ratio(width, self.tuning.lane_ratio);
        log::info!(
            "Viewport resized to {}x{}: lane {} (gutter {})",
            width,
            height,
            self.layout.play_width,
            self.layout.gutter_x
        );
    }

    /// Avatar to spawn, tether released, camera back to 0
    pub fn reset(&mut self, reason: ResetReason) {
        let spawn = self.spawn();
        self.camera.reset();
        self.avatar.reset(spawn);
        self.resets += 1;

        match reason {
            ResetReason::Requested => log::info!("Session reset (requested)"),
            ResetReason::FellOut => log::info!("Session reset (fell out of view, frame {})", self.frame),
        }
    }

    pub fn spawn(&self) -> Vec2 {
        spawn_point(&self.level, self.layout.play_width, &self.tuning)
    }

    /// Screen <-> world mapping for the current camera and lane
    pub fn screen_transform(&self) -> ScreenTransform {
        ScreenTransform {
            gutter_x: self.layout.gutter_x,
            camera_y: self.camera.y,
        }
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(
            &self.avatar,
            &self.level,
            self.pointer,
            self.screen_transform(),
            &self.tuning,
        )
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Direct access for scripted setups and tests
    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn reset_count(&self) -> u32 {
        self.resets
    }
}
