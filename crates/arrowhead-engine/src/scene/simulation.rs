use std::f32::consts::TAU;

use crate::input::{InputState, Key};

/// Motion constants for the update step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Rotation rate in radians per second.
    pub turn_speed: f32,

    /// Vertical speed in clip-space units per second while the key is held.
    pub movement_speed: f32,

    /// Key that moves the shape down.
    pub movement_key: Key,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            turn_speed: 1.0,
            movement_speed: 0.5,
            movement_key: Key::ArrowDown,
        }
    }
}

/// Mutable per-frame state: rotation and translation.
///
/// The angle stays in `[0, TAU)` so precision holds over long runs; the
/// translation is unbounded.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SimulationState {
    /// Radians.
    pub angle: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl SimulationState {
    /// Integrates one frame of motion.
    ///
    /// Only the vertical axis reacts to input; `translation_x` is never touched.
    pub fn advance(&mut self, dt: f32, input: &InputState, config: &SimulationConfig) {
        self.angle = (self.angle + config.turn_speed * dt).rem_euclid(TAU);

        if input.is_held() {
            self.translation_y -= config.movement_speed * dt;
        }
    }

    #[inline]
    pub fn translation(&self) -> [f32; 2] {
        [self.translation_x, self.translation_y]
    }
}
