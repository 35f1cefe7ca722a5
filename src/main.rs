//! Grapple Climb entry point
//!
//! Native: runs a scripted headless session and logs what the avatar does.
//! Web: drives the session from a 2D canvas with mouse and keyboard input.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use grapple_climb::input::InputState;
    use grapple_climb::render::palette;
    use grapple_climb::{DrawCommand, RenderFrame, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn update(&mut self) -> RenderFrame {
            let input = self.input.apply(&mut self.session);
            self.session.tick(&input)
        }

        fn render(&self, frame: &RenderFrame) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;

            ctx.set_fill_style_str(&palette::css(palette::BACKGROUND));
            ctx.fill_rect(0.0, 0.0, w, h);

            for cmd in frame.screen_commands() {
                match cmd {
                    DrawCommand::Line {
                        from,
                        to,
                        width,
                        color,
                    } => {
                        ctx.set_stroke_style_str(&palette::css(color));
                        ctx.set_line_width(width as f64);
                        ctx.set_line_cap("round");
                        ctx.begin_path();
                        ctx.move_to(from.x as f64, from.y as f64);
                        ctx.line_to(to.x as f64, to.y as f64);
                        ctx.stroke();
                    }
                    DrawCommand::Circle {
                        center,
                        radius,
                        color,
                    } => {
                        ctx.set_fill_style_str(&palette::css(color));
                        ctx.begin_path();
                        let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                        ctx.fill();
                    }
                    DrawCommand::Rect { min, size, color } => {
                        ctx.set_fill_style_str(&palette::css(color));
                        ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                    }
                    DrawCommand::Text {
                        pos,
                        max_width,
                        text,
                        color,
                    } => {
                        // Skip notes scrolled off screen
                        if pos.y < -40.0 || pos.y as f64 > h {
                            continue;
                        }
                        ctx.set_fill_style_str(&palette::css(color));
                        ctx.set_font("16px sans-serif");
                        ctx.set_text_baseline("top");
                        let _ = ctx.fill_text_with_max_width(
                            text,
                            pos.x as f64,
                            pos.y as f64,
                            max_width as f64,
                        );
                    }
                }
            }
        }
    }

    fn viewport_size() -> (f64, f64) {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w, h)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grapple Climb starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (w, h) = viewport_size();
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(w as f32, h as f32),
            input: InputState::new(),
            canvas: canvas.clone(),
            ctx,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Grapple Climb running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - latch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer_pressed();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - release (on window so a release outside the canvas still counts)
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_released();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_pressed(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport_size();
            let mut g = game.borrow_mut();
            g.canvas.set_width(w as u32);
            g.canvas.set_height(h as u32);
            g.session.on_viewport_resized(w as f32, h as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let frame = g.update();
            g.render(&frame);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grapple Climb (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => grapple_climb::Tuning::load(std::path::Path::new(&path)),
        None => grapple_climb::Tuning::default(),
    };

    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless session
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use grapple_climb::input::InputState;
    use grapple_climb::{Session, Tuning};

    const VIEW_W: f32 = 1280.0;
    const VIEW_H: f32 = 720.0;
    const FRAMES: u32 = 600;
    /// One grab/swing/release cycle
    const CYCLE: u32 = 120;
    const GRAB_AT: u32 = 10;
    const RELEASE_AT: u32 = 80;

    /// Pointer target (world space) for a frame of the cycle.
    ///
    /// Aim just ahead of and below the avatar so the tip lands in whatever
    /// it's standing on, then sweep the pointer back and up to swing.
    fn scripted_pointer(session: &Session, phase: u32) -> Vec2 {
        let pos = session.avatar().pos;
        match session.avatar().tether.anchor() {
            Some(anchor) => {
                let span = RELEASE_AT - GRAB_AT;
                let t = phase.saturating_sub(GRAB_AT).min(span) as f32 / span as f32;
                let theta = std::f32::consts::PI * (0.25 + 0.5 * t);
                anchor - Vec2::new(theta.cos(), theta.sin()) * 20.0
            }
            None => pos + Vec2::new(60.0, 44.0),
        }
    }

    pub fn run(tuning: Tuning) {
        let mut session = Session::with_tuning(VIEW_W, VIEW_H, tuning);
        let mut input = InputState::new();
        let mut highest = session.avatar().pos.y;
        let mut latches = 0u32;

        for frame in 0..FRAMES {
            let phase = frame % CYCLE;
            let pointer = scripted_pointer(&session, phase);
            let screen = session.screen_transform().to_screen(pointer);
            input.pointer_moved(screen.x, screen.y);

            if phase == GRAB_AT {
                input.pointer_pressed();
            } else if phase == RELEASE_AT {
                input.pointer_released();
            }

            let was_latched = session.avatar().is_latched();
            let tick = input.apply(&mut session);
            if !was_latched && session.avatar().is_latched() {
                latches += 1;
            }
            let render = session.tick(&tick);

            highest = highest.min(session.avatar().pos.y);

            if frame % 60 == 0 {
                let a = session.avatar();
                log::info!(
                    "frame {:>3}: pos ({:7.1}, {:7.1}) vel ({:5.1}, {:5.1}) {:?} rope {:5.1} cam {:6.1} ({} draw cmds)",
                    frame,
                    a.pos.x,
                    a.pos.y,
                    a.vel.x,
                    a.vel.y,
                    a.tether.state(),
                    a.tether.rope_length(),
                    render.camera_y(),
                    render.commands.len()
                );
            }
        }

        log::info!(
            "Demo finished: {} frames, {} latches, highest y {:.1}, {} resets",
            session.frame_count(),
            latches,
            highest,
            session.reset_count()
        );
    }
}
