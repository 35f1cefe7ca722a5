//! Static level geometry
//!
//! A level is an ordered list of axis-aligned platforms built once at
//! startup. Insertion order matters: the first platform sets the spawn
//! height, and latch hit-tests scan front to back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEDGE_HEIGHT, ROW_LEDGE_WIDTH};

/// Axis-aligned rectangle in lane-relative world coordinates (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Closest point on (or in) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Strict containment: points on the boundary are outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }
}

/// How a row of ledges is laid out horizontally
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// One ledge per explicit x coordinate
    At(Vec<f32>),
    /// N ledges spread evenly across the lane
    Spaced(usize),
}

impl From<&[f32]> for Row {
    fn from(xs: &[f32]) -> Self {
        Row::At(xs.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for Row {
    fn from(xs: [f32; N]) -> Self {
        Row::At(xs.to_vec())
    }
}

impl From<usize> for Row {
    fn from(count: usize) -> Self {
        Row::Spaced(count)
    }
}

/// Ordered platform collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    /// Lane width used to spread `Row::Spaced` rows
    play_width: f32,
    platforms: Vec<Platform>,
}

impl Level {
    pub fn new(play_width: f32) -> Self {
        Self {
            play_width,
            platforms: Vec::new(),
        }
    }

    /// The stock climb: a ground slab, three stepping ledges, then rows of stones
    pub fn starter(play_width: f32, viewport_height: f32) -> Self {
        let mut level = Self::new(play_width);

        level.add_platform(0.0, viewport_height - 100.0, play_width, 100.0); // ground
        level.add_ledge(220.0, 460.0, 80.0);
        level.add_ledge(360.0, 380.0, 80.0);
        level.add_ledge(480.0, 280.0, 80.0);

        level.add_row(160.0, [100.0, 200.0, 300.0, 400.0, 500.0]);
        level.add_row(40.0, [150.0, 350.0, 550.0]);
        level.add_row(-10.0, [50.0, 500.0]);

        level
    }

    pub fn play_width(&self) -> f32 {
        self.play_width
    }

    pub fn add_platform(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.platforms.push(Platform::new(x, y, w, h));
    }

    /// Thin ledge with the default height
    pub fn add_ledge(&mut self, x: f32, y: f32, w: f32) {
        self.add_platform(x, y, w, LEDGE_HEIGHT);
    }

    /// Row of default-sized ledges at height `y`
    pub fn add_row(&mut self, y: f32, row: impl Into<Row>) {
        self.add_row_sized(y, row, ROW_LEDGE_WIDTH, LEDGE_HEIGHT);
    }

    pub fn add_row_sized(&mut self, y: f32, row: impl Into<Row>, w: f32, h: f32) {
        match row.into() {
            Row::At(xs) => {
                for x in xs {
                    self.add_platform(x, y, w, h);
                }
            }
            Row::Spaced(0) => {}
            // A lone ledge has no gap to divide; pin it to the lane's left edge
            Row::Spaced(1) => self.add_platform(0.0, y, w, h),
            Row::Spaced(count) => {
                let gap = (self.play_width - w) / (count - 1) as f32;
                for i in 0..count {
                    self.add_platform(i as f32 * gap, y, w, h);
                }
            }
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn first(&self) -> Option<&Platform> {
        self.platforms.first()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// First platform (in insertion order) strictly containing `p`.
    ///
    /// Linear scan, O(N) in platform count. The first match wins even if a
    /// later platform overlaps the same point.
    pub fn hit_test(&self, p: Vec2) -> Option<&Platform> {
        self.platforms.iter().find(|r| r.contains_point(p))
    }
}
