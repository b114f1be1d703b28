use std::time::Instant;

/// Monotonic millisecond timestamps relative to the clock's creation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn timestamp_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Delta-time policy.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockConfig {
    /// Optional upper bound for a single frame delta, in seconds.
    ///
    /// Unset by default: a stalled window catches up with the full elapsed
    /// time on its next frame.
    pub max_delta: Option<f64>,
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Zero on the first tick.
    pub dt: f32,

    /// Timestamp of this tick, in seconds.
    pub now: f64,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Turns host timestamps into per-frame deltas.
///
/// The previous timestamp starts unset and is seeded by the first tick, so the
/// first delta is exactly zero instead of "time since epoch".
#[derive(Debug, Clone)]
pub struct FrameTimer {
    previous: Option<f64>,
    frame_index: u64,
    config: ClockConfig,
}

impl FrameTimer {
    pub fn new(config: ClockConfig) -> Self {
        debug_assert!(config.max_delta.is_none_or(|m| m >= 0.0));
        Self {
            previous: None,
            frame_index: 0,
            config,
        }
    }

    /// Advances the timer to `timestamp_ms` and returns the frame snapshot.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let now = timestamp_ms / 1000.0;
        let previous = self.previous.unwrap_or(now);

        // Timestamps are expected to be monotonic; a backwards step yields 0
        // rather than running the simulation in reverse.
        let mut dt = (now - previous).max(0.0);
        if let Some(max) = self.config.max_delta {
            dt = dt.min(max);
        }
        if !dt.is_finite() {
            dt = 0.0;
        }

        if now.is_finite() {
            self.previous = Some(now);
        }

        let ft = FrameTime {
            dt: dt as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut timer = FrameTimer::default();
        let ft = timer.tick(123_456.0);
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
        assert_eq!(ft.now, 123.456);
    }

    #[test]
    fn delta_is_difference_in_seconds() {
        let mut timer = FrameTimer::default();
        timer.tick(1000.0);
        let ft = timer.tick(1016.0);
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn long_gaps_are_not_clamped_by_default() {
        let mut timer = FrameTimer::default();
        timer.tick(0.0);
        assert_eq!(timer.tick(5_000.0).dt, 5.0);
    }

    #[test]
    fn delta_is_clamped_to_configured_max() {
        let mut timer = FrameTimer::new(ClockConfig {
            max_delta: Some(0.25),
        });
        timer.tick(0.0);
        assert_eq!(timer.tick(5_000.0).dt, 0.25);
    }

    #[test]
    fn backwards_timestamp_yields_zero() {
        let mut timer = FrameTimer::default();
        timer.tick(2_000.0);
        assert_eq!(timer.tick(1_000.0).dt, 0.0);
    }

    #[test]
    fn nan_timestamp_never_leaks_into_delta() {
        let mut timer = FrameTimer::default();
        assert_eq!(timer.tick(f64::NAN).dt, 0.0);
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.timestamp_ms();
        let b = clock.timestamp_ms();
        assert!(b >= a);
    }
}
