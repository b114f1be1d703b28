use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::FrameMessage;
use crate::input::Key;

/// Translates a winit `WindowEvent` into a frame-loop message.
///
/// Returns `None` for events the frame loop does not consume. Redraw, close
/// and resize are driven by the runtime itself.
pub fn translate_window_event(event: &WindowEvent) -> Option<FrameMessage> {
    match event {
        WindowEvent::Focused(false) => Some(FrameMessage::FocusLost),

        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => FrameMessage::KeyDown(key),
                ElementState::Released => FrameMessage::KeyUp(key),
            })
        }

        _ => None,
    }
}

/// Maps a physical key to an engine [`Key`].
pub fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,

            other => Key::Unknown(other as u32),
        },

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_engine_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowDown)), Key::ArrowDown);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyS)), Key::S);
    }

    #[test]
    fn unmapped_key_is_unknown() {
        assert!(matches!(
            map_key(PhysicalKey::Code(KeyCode::F7)),
            Key::Unknown(_)
        ));
    }

    #[test]
    fn focus_gain_is_not_a_message() {
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false)),
            Some(FrameMessage::FocusLost)
        );
    }
}
