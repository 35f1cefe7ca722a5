//! Render adapter: world entities as draw primitives
//!
//! The simulation hands out a [`RenderFrame`] of shapes in lane-relative
//! world coordinates. Backends map them to screen space with the frame's
//! [`ScreenTransform`] (lane gutter to the right, camera scroll up).

use glam::Vec2;

use crate::sim::{Avatar, Level};
use crate::tuning::Tuning;

/// Colors for game elements
pub mod palette {
    pub const BACKGROUND: [f32; 4] = [0.863, 0.863, 0.863, 1.0]; // 220 grey
    pub const PLATFORM: [f32; 4] = [0.471, 0.471, 0.471, 1.0]; // 120 grey
    pub const AVATAR: [f32; 4] = [0.392, 0.588, 1.0, 1.0];
    pub const TETHER: [f32; 4] = [0.157, 0.157, 0.157, 1.0];
    pub const TEXT: [f32; 4] = [0.157, 0.157, 0.157, 1.0];

    /// Stroke width of the tether line
    pub const TETHER_WIDTH: f32 = 6.0;

    /// CSS `rgba()` string for canvas backends
    pub fn css(c: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (c[0] * 255.0).round() as u8,
            (c[1] * 255.0).round() as u8,
            (c[2] * 255.0).round() as u8,
            c[3]
        )
    }
}

/// Story text pinned in the left gutter at a world height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterNote {
    pub world_y: f32,
    pub text: &'static str,
}

/// Notes the climber passes on the way up
pub const GUTTER_NOTES: &[GutterNote] = &[GutterNote {
    world_y: -2000.0,
    text: "You feel small but determined…",
}];

/// Screen-space inset of gutter text from the window edge
const GUTTER_MARGIN: f32 = 20.0;

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Top-left anchored text, wrapped to `max_width`
    Text {
        pos: Vec2,
        max_width: f32,
        text: &'static str,
        color: [f32; 4],
    },
}

impl DrawCommand {
    /// Same primitive with its position mapped through `t`
    pub fn transformed(&self, t: &ScreenTransform) -> Self {
        match self.clone() {
            DrawCommand::Line { from, to, width, color } => DrawCommand::Line {
                from: t.to_screen(from),
                to: t.to_screen(to),
                width,
                color,
            },
            DrawCommand::Circle { center, radius, color } => DrawCommand::Circle {
                center: t.to_screen(center),
                radius,
                color,
            },
            DrawCommand::Rect { min, size, color } => DrawCommand::Rect {
                min: t.to_screen(min),
                size,
                color,
            },
            DrawCommand::Text {
                pos,
                max_width,
                text,
                color,
            } => DrawCommand::Text {
                pos: t.to_screen(pos),
                max_width,
                text,
                color,
            },
        }
    }
}

/// Lane-relative world <-> screen mapping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenTransform {
    pub gutter_x: f32,
    pub camera_y: f32,
}

impl ScreenTransform {
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.gutter_x, world.y - self.camera_y)
    }

    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.gutter_x, screen.y + self.camera_y)
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub transform: ScreenTransform,
    /// Draw order: tether, avatar, platforms, gutter text
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    pub fn capture(
        avatar: &Avatar,
        level: &Level,
        pointer: Vec2,
        transform: ScreenTransform,
        tuning: &Tuning,
    ) -> Self {
        let mut commands = Vec::with_capacity(level.len() + 2 + GUTTER_NOTES.len());

        commands.push(DrawCommand::Line {
            from: avatar.arm_base(),
            to: avatar.arm_tip(pointer, tuning),
            width: palette::TETHER_WIDTH,
            color: palette::TETHER,
        });
        commands.push(DrawCommand::Circle {
            center: avatar.pos,
            radius: avatar.radius,
            color: palette::AVATAR,
        });

        for r in level.platforms() {
            commands.push(DrawCommand::Rect {
                min: r.min(),
                size: Vec2::new(r.w, r.h),
                color: palette::PLATFORM,
            });
        }

        // Gutter text sits at a fixed screen x, so undo the lane offset here
        let max_width = (transform.gutter_x - 2.0 * GUTTER_MARGIN).max(0.0);
        for note in GUTTER_NOTES {
            commands.push(DrawCommand::Text {
                pos: Vec2::new(GUTTER_MARGIN - transform.gutter_x, note.world_y),
                max_width,
                text: note.text,
                color: palette::TEXT,
            });
        }

        Self { transform, commands }
    }

    pub fn camera_y(&self) -> f32 {
        self.transform.camera_y
    }

    /// Commands mapped to screen space
    pub fn screen_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.commands.iter().map(|c| c.transformed(&self.transform))
    }

    pub fn tether(&self) -> Option<(Vec2, Vec2)> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn avatar(&self) -> Option<(Vec2, f32)> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { min, size, .. } => Some((*min, *size)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Tether;

    fn sample_level() -> Level {
        let mut level = Level::new(800.0);
        level.add_platform(0.0, 600.0, 800.0, 100.0);
        level.add_ledge(220.0, 460.0, 80.0);
        level
    }

    #[test]
    fn test_transform_roundtrip_point() {
        let t = ScreenTransform {
            gutter_x: 240.0,
            camera_y: -500.0,
        };
        let world = Vec2::new(100.0, -200.0);
        assert_eq!(t.to_screen(world), Vec2::new(340.0, 300.0));
        assert_eq!(t.to_world(t.to_screen(world)), world);
    }

    #[test]
    fn test_capture_contents_and_order() {
        let tuning = Tuning::default();
        let level = sample_level();
        let mut avatar = Avatar::new(Vec2::new(100.0, 576.0), 24.0);
        avatar.aim(Vec2::new(200.0, 576.0));

        let frame = RenderFrame::capture(
            &avatar,
            &level,
            Vec2::new(200.0, 576.0),
            ScreenTransform::default(),
            &tuning,
        );

        assert!(matches!(frame.commands[0], DrawCommand::Line { .. }));
        assert!(matches!(frame.commands[1], DrawCommand::Circle { .. }));
        assert_eq!(frame.rects().count(), 2);
        assert!(matches!(frame.commands.last(), Some(DrawCommand::Text { .. })));

        let (from, to) = frame.tether().unwrap();
        assert!((from - Vec2::new(124.0, 576.0)).length() < 1e-3);
        assert!((to - Vec2::new(200.0, 576.0)).length() < 1e-3);
        assert_eq!(frame.avatar(), Some((Vec2::new(100.0, 576.0), 24.0)));
    }

    #[test]
    fn test_latched_tether_ends_at_anchor() {
        let tuning = Tuning::default();
        let level = sample_level();
        let mut avatar = Avatar::new(Vec2::new(260.0, 520.0), 24.0);
        avatar.tether = Tether::latched_at(Vec2::new(260.0, 465.0), 31.0);
        avatar.aim(Vec2::new(0.0, 0.0));

        let frame = RenderFrame::capture(
            &avatar,
            &level,
            Vec2::new(0.0, 0.0),
            ScreenTransform::default(),
            &tuning,
        );
        let (_, to) = frame.tether().unwrap();
        assert_eq!(to, Vec2::new(260.0, 465.0));
    }

    #[test]
    fn test_screen_commands_apply_offsets() {
        let tuning = Tuning::default();
        let level = sample_level();
        let avatar = Avatar::new(Vec2::new(100.0, 576.0), 24.0);
        let transform = ScreenTransform {
            gutter_x: 240.0,
            camera_y: -100.0,
        };

        let frame = RenderFrame::capture(&avatar, &level, Vec2::ZERO, transform, &tuning);
        let screen: Vec<DrawCommand> = frame.screen_commands().collect();

        match &screen[1] {
            DrawCommand::Circle { center, .. } => assert_eq!(*center, Vec2::new(340.0, 676.0)),
            other => panic!("expected circle, got {:?}", other),
        }
        match &screen[2] {
            DrawCommand::Rect { min, size, .. } => {
                assert_eq!(*min, Vec2::new(240.0, 700.0));
                assert_eq!(*size, Vec2::new(800.0, 100.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
        // Gutter text stays at a fixed screen x and scrolls with the camera
        match screen.last() {
            Some(DrawCommand::Text { pos, max_width, .. }) => {
                assert_eq!(*pos, Vec2::new(20.0, -1900.0));
                assert_eq!(*max_width, 200.0);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_css_color() {
        assert_eq!(palette::css([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1)");
    }
}
