use crate::core::FrameMessage;

use super::types::Key;

/// Held state of the single movement key.
///
/// Written by key messages, read once per frame by the simulation update.
/// Last message wins; there is no debouncing.
#[derive(Debug, Clone)]
pub struct InputState {
    movement_key: Key,
    movement_key_held: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Key::ArrowDown)
    }
}

impl InputState {
    pub fn new(movement_key: Key) -> Self {
        Self {
            movement_key,
            movement_key_held: false,
        }
    }

    pub fn set_held(&mut self, held: bool) {
        self.movement_key_held = held;
    }

    pub fn is_held(&self) -> bool {
        self.movement_key_held
    }

    /// Applies an input message. Returns `true` when the message concerned
    /// this state (bound key or focus change).
    pub fn apply(&mut self, msg: &FrameMessage) -> bool {
        match *msg {
            FrameMessage::KeyDown(key) if key == self.movement_key => {
                self.set_held(true);
                true
            }
            FrameMessage::KeyUp(key) if key == self.movement_key => {
                self.set_held(false);
                true
            }
            // Key-up is never delivered once focus is gone; avoid a stuck key.
            FrameMessage::FocusLost => {
                self.set_held(false);
                true
            }
            _ => false,
        }
    }
}
