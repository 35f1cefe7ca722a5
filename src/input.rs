//! Input adapter: pointer and key events to session calls
//!
//! Platform event handlers record raw screen-space events here. Before each
//! frame, [`InputState::apply`] replays them against the session in arrival
//! order and produces that frame's [`TickInput`].

use glam::Vec2;

use crate::sim::{Session, TickInput};

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    PointerUp,
    Reset,
}

/// Map a key name (DOM `KeyboardEvent.key` style) to an event
pub fn key_event(key: &str) -> Option<InputEvent> {
    match key {
        "Escape" | "Esc" => Some(InputEvent::Reset),
        _ => None,
    }
}

/// Pointer state plus queued one-shot events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last pointer position in screen space
    pointer_screen: Vec2,
    pointer_down: bool,
    pending: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_screen = Vec2::new(x, y);
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer_down = true;
        self.pending.push(InputEvent::PointerDown);
    }

    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
        self.pending.push(InputEvent::PointerUp);
    }

    /// Returns true if the key was handled
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match key_event(key) {
            Some(event) => {
                self.pending.push(event);
                true
            }
            None => false,
        }
    }

    /// Flush queued events into the session and sample this frame's input
    pub fn apply(&mut self, session: &mut Session) -> TickInput {
        for event in self.pending.drain(..) {
            let pointer = session.screen_transform().to_world(self.pointer_screen);
            match event {
                InputEvent::PointerDown => {
                    session.on_pointer_down(pointer);
                }
                InputEvent::PointerUp => session.on_pointer_up(),
                InputEvent::Reset => session.on_reset_requested(),
            }
        }

        TickInput {
            pointer: session.screen_transform().to_world(self.pointer_screen),
            pointer_down: self.pointer_down,
        }
    }
}
