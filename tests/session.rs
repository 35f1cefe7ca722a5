use glam::Vec2;

use grapple_climb::sim::{Level, Session, TetherState, TickInput};
use grapple_climb::{DrawCommand, Tuning};

const W: f32 = 1280.0;
const H: f32 = 700.0;

fn held(pointer: Vec2) -> TickInput {
    TickInput {
        pointer,
        pointer_down: true,
    }
}

fn idle(pointer: Vec2) -> TickInput {
    TickInput {
        pointer,
        pointer_down: false,
    }
}

#[test]
fn test_grapple_reel_and_drop() {
    let mut s = Session::new(W, H);
    // Stand under the first stepping ledge (220, 460, 80, 12)
    s.avatar_mut().pos = Vec2::new(200.0, 576.0);
    let grab = Vec2::new(240.0, 466.0);
    s.tick(&idle(grab));

    assert!(s.on_pointer_down(grab));
    assert_eq!(s.avatar().tether.state(), TetherState::Latched);
    let anchor = s.avatar().tether.anchor().unwrap();

    // Hold the pointer on the anchor to reel all the way in
    for _ in 0..60 {
        s.tick(&held(anchor));
    }
    let rope = s.avatar().tether.rope_length();
    assert!(rope < 10.0, "rope still {}", rope);
    assert!(s.avatar().pos.y < 540.0, "avatar at {}", s.avatar().pos.y);
    assert!(s.avatar().pos.distance(anchor) < 60.0);

    // Let go and fall back to the ground
    s.on_pointer_up();
    for _ in 0..300 {
        s.tick(&idle(anchor));
    }
    assert!(!s.avatar().is_latched());
    assert!((s.avatar().pos.y - 576.0).abs() < 1.0);
    assert_eq!(s.reset_count(), 0);
}

#[test]
fn test_missed_grab_stays_free() {
    let mut s = Session::new(W, H);
    let sky = Vec2::new(400.0, 100.0);
    s.tick(&idle(sky));
    assert!(!s.on_pointer_down(sky));
    for _ in 0..10 {
        s.tick(&held(sky));
    }
    assert!(!s.avatar().is_latched());
}

#[test]
fn test_endless_fall_triggers_fail_safe() {
    let mut level = Level::new(800.0);
    level.add_platform(0.0, 0.0, 50.0, 12.0);
    let mut s = Session::with_level(W, H, Tuning::default(), level);
    let spawn = s.spawn();
    let pointer = Vec2::new(400.0, 0.0);

    let mut reset_seen = false;
    for _ in 0..400 {
        s.tick(&idle(pointer));
        if s.reset_count() > 0 {
            reset_seen = true;
            break;
        }
    }

    assert!(reset_seen);
    assert_eq!(s.avatar().pos, spawn);
    assert_eq!(s.camera().y, 0.0);
}

#[test]
fn test_smaller_margin_resets_sooner() {
    let frames_until_reset = |margin: f32| {
        let mut level = Level::new(800.0);
        level.add_platform(0.0, 0.0, 50.0, 12.0);
        let tuning = Tuning {
            fail_safe_margin: margin,
            ..Default::default()
        };
        let mut s = Session::with_level(W, H, tuning, level);
        let mut frames = 0;
        while s.reset_count() == 0 && frames < 1000 {
            s.tick(&idle(Vec2::ZERO));
            frames += 1;
        }
        frames
    };

    assert!(frames_until_reset(50.0) < frames_until_reset(300.0));
}

#[test]
fn test_frame_draws_everything() {
    let mut s = Session::new(W, H);
    let frame = s.tick(&idle(Vec2::new(300.0, 300.0)));

    assert_eq!(frame.rects().count(), s.level().len());
    assert_eq!(frame.avatar(), Some((s.avatar().pos, 24.0)));
    assert_eq!(frame.transform.gutter_x, 240.0);
    assert_eq!(frame.camera_y(), 0.0);

    let screen: Vec<DrawCommand> = frame.screen_commands().collect();
    match &screen[1] {
        DrawCommand::Circle { center, .. } => {
            assert_eq!(*center, s.avatar().pos + Vec2::new(240.0, 0.0));
        }
        other => panic!("expected avatar circle, got {:?}", other),
    }
}

#[test]
fn test_camera_scrolls_up_when_climbing_high() {
    let mut s = Session::new(W, H);
    // Park the avatar on a high row (y = 40 ledge at x = 150)
    s.avatar_mut().pos = Vec2::new(190.0, 16.0);
    for _ in 0..30 {
        s.tick(&idle(Vec2::new(190.0, -100.0)));
    }
    // Avatar is above the midline, camera moves up toward y - H/2 = -334
    assert!(s.camera().y < -100.0);
    assert!(s.camera().y > -334.0);
}
