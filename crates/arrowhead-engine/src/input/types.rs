use std::fmt;

/// Keys the arrow can be bound to.
///
/// Anything else arrives as `Unknown` carrying the platform scancode, so
/// presses of unbound keys still flow through as messages and are ignored by
/// [`InputState`](super::InputState).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Escape => "Escape",
            Key::Enter => "Enter",
            Key::Space => "Space",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::W => "W",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::Unknown(code) => return write!(f, "scancode {code}"),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Key::ArrowDown.to_string(), "Down");
        assert_eq!(Key::Unknown(57).to_string(), "scancode 57");
    }
}
