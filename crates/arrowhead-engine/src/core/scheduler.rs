use anyhow::Result;

use crate::coords::{CanvasDimensions, SurfaceMetrics};
use crate::input::InputState;
use crate::render::{GraphicsBackend, Renderer};
use crate::scene::{GeometryStore, SimulationConfig, SimulationState};
use crate::time::{ClockConfig, FrameTime, FrameTimer};

use super::FrameMessage;

/// Control directive returned to the runtime after each message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Lifecycle of the frame loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Uninitialized,
    Running,
    Stopped,
}

/// Everything a frame reads or writes.
#[derive(Debug, Clone)]
pub struct FrameContext {
    pub simulation: SimulationState,
    pub input: InputState,
    pub canvas: CanvasDimensions,
    pub geometry: GeometryStore,
    pub config: SimulationConfig,
}

impl FrameContext {
    pub fn new(geometry: GeometryStore, config: SimulationConfig) -> Self {
        Self {
            simulation: SimulationState::default(),
            input: InputState::new(config.movement_key),
            canvas: CanvasDimensions::default(),
            geometry,
            config,
        }
    }
}

/// Single consumer of [`FrameMessage`]s.
///
/// Each `Tick` runs one frame: timing, canvas resize check, simulation update,
/// then render. Frames never overlap and update always precedes render.
pub struct FrameScheduler {
    state: SchedulerState,
    timer: FrameTimer,
    renderer: Renderer,
    ctx: FrameContext,
    last_frame: Option<FrameTime>,
}

impl FrameScheduler {
    pub fn new(geometry: GeometryStore, config: SimulationConfig, clock: ClockConfig) -> Self {
        Self {
            state: SchedulerState::Uninitialized,
            timer: FrameTimer::new(clock),
            renderer: Renderer::default(),
            ctx: FrameContext::new(geometry, config),
            last_frame: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn geometry(&self) -> &GeometryStore {
        &self.ctx.geometry
    }

    /// Timing of the most recent frame.
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    /// `Uninitialized -> Running`. Returns `false` if the loop was already
    /// started or has stopped.
    pub fn start(&mut self) -> bool {
        if self.state != SchedulerState::Uninitialized {
            return false;
        }
        self.state = SchedulerState::Running;
        log::info!("frame loop running");
        true
    }

    /// Processes one message.
    ///
    /// `surface` and `backend` are only touched by `Tick`. An error from the
    /// backend stops the loop.
    pub fn dispatch<S, B>(
        &mut self,
        msg: FrameMessage,
        surface: &S,
        backend: &mut B,
    ) -> Result<AppControl>
    where
        S: SurfaceMetrics + ?Sized,
        B: GraphicsBackend + ?Sized,
    {
        if self.state == SchedulerState::Stopped {
            return Ok(AppControl::Exit);
        }

        match msg {
            FrameMessage::KeyDown(_) | FrameMessage::KeyUp(_) | FrameMessage::FocusLost => {
                if self.ctx.input.apply(&msg) {
                    log::trace!("input: {msg:?} -> held={}", self.ctx.input.is_held());
                }
                Ok(AppControl::Continue)
            }

            FrameMessage::Tick { timestamp_ms } => {
                if self.state != SchedulerState::Running {
                    log::warn!("tick at {timestamp_ms:.1}ms before the frame loop was started");
                    return Ok(AppControl::Continue);
                }

                if let Err(err) = self.frame(timestamp_ms, surface, backend) {
                    self.stop();
                    return Err(err);
                }
                Ok(AppControl::Continue)
            }

            FrameMessage::Stop => {
                self.stop();
                Ok(AppControl::Exit)
            }
        }
    }

    fn frame<S, B>(&mut self, timestamp_ms: f64, surface: &S, backend: &mut B) -> Result<()>
    where
        S: SurfaceMetrics + ?Sized,
        B: GraphicsBackend + ?Sized,
    {
        let ft = self.timer.tick(timestamp_ms);
        self.last_frame = Some(ft);

        let ctx = &mut self.ctx;

        if ctx.canvas.resize(surface) {
            log::debug!(
                "canvas resized to {}x{} (dpr {})",
                ctx.canvas.width_px,
                ctx.canvas.height_px,
                ctx.canvas.device_pixel_ratio
            );
            backend.resize(ctx.canvas.width_px, ctx.canvas.height_px);
        }

        ctx.simulation.advance(ft.dt, &ctx.input, &ctx.config);

        self.renderer
            .render(&ctx.simulation, &ctx.canvas, &ctx.geometry, backend)?;

        Ok(())
    }

    fn stop(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        let frames = self.last_frame.map_or(0, |ft| ft.frame_index + 1);
        log::info!("frame loop stopped after {frames} frames");
        self.state = SchedulerState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::RecordingBackend;

    struct FixedSurface;

    impl SurfaceMetrics for FixedSurface {
        fn client_size(&self) -> (f64, f64) {
            (400.0, 300.0)
        }

        fn device_pixel_ratio(&self) -> f64 {
            1.0
        }
    }

    fn scheduler() -> FrameScheduler {
        FrameScheduler::new(
            GeometryStore::arrow(),
            SimulationConfig::default(),
            ClockConfig::default(),
        )
    }

    fn tick(ms: f64) -> FrameMessage {
        FrameMessage::Tick { timestamp_ms: ms }
    }

    #[test]
    fn start_transitions_once() {
        let mut s = scheduler();
        assert_eq!(s.state(), SchedulerState::Uninitialized);
        assert!(s.start());
        assert!(!s.start());
        assert_eq!(s.state(), SchedulerState::Running);
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut s = scheduler();
        let mut backend = RecordingBackend::new();
        let control = s.dispatch(tick(16.0), &FixedSurface, &mut backend).unwrap();
        assert_eq!(control, AppControl::Continue);
        assert!(backend.commands.is_empty());
        assert!(s.last_frame().is_none());
    }

    #[test]
    fn first_frame_has_zero_delta() {
        let mut s = scheduler();
        s.start();
        let mut backend = RecordingBackend::new();
        s.dispatch(tick(987_654.0), &FixedSurface, &mut backend).unwrap();

        let ft = s.last_frame().unwrap();
        assert_eq!(ft.dt, 0.0);
        assert_eq!(s.context().simulation.angle, 0.0);
    }

    #[test]
    fn update_runs_before_render() {
        let mut s = scheduler();
        s.start();
        let mut backend = RecordingBackend::new();
        s.dispatch(tick(0.0), &FixedSurface, &mut backend).unwrap();
        s.dispatch(tick(100.0), &FixedSurface, &mut backend).unwrap();

        // The uniforms of the second frame already carry its rotation.
        let rotation = backend.last_uniforms().unwrap().rotation;
        assert!((rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn one_second_gap_turns_one_radian() {
        let mut s = scheduler();
        s.start();
        let mut backend = RecordingBackend::new();
        s.dispatch(FrameMessage::KeyDown(Key::ArrowDown), &FixedSurface, &mut backend)
            .unwrap();
        s.dispatch(tick(0.0), &FixedSurface, &mut backend).unwrap();
        s.dispatch(tick(1_000.0), &FixedSurface, &mut backend).unwrap();

        let sim = s.context().simulation;
        assert_eq!(s.last_frame().unwrap().dt, 1.0);
        assert_eq!(sim.angle, 1.0);
        assert_eq!(sim.translation_y, -0.5);
    }

    #[test]
    fn key_messages_drive_input_state() {
        let mut s = scheduler();
        let mut backend = RecordingBackend::new();
        s.dispatch(FrameMessage::KeyDown(Key::ArrowDown), &FixedSurface, &mut backend)
            .unwrap();
        assert!(s.context().input.is_held());
        s.dispatch(FrameMessage::FocusLost, &FixedSurface, &mut backend)
            .unwrap();
        assert!(!s.context().input.is_held());
        assert!(backend.commands.is_empty());
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut s = scheduler();
        s.start();
        let mut backend = RecordingBackend::new();
        assert_eq!(
            s.dispatch(FrameMessage::Stop, &FixedSurface, &mut backend).unwrap(),
            AppControl::Exit
        );
        assert_eq!(s.state(), SchedulerState::Stopped);

        assert_eq!(
            s.dispatch(tick(16.0), &FixedSurface, &mut backend).unwrap(),
            AppControl::Exit
        );
        assert!(backend.commands.is_empty());
        assert!(!s.start());
    }

    #[test]
    fn resize_reaches_backend_once_per_change() {
        let mut s = scheduler();
        s.start();
        let mut backend = RecordingBackend::new();
        for ms in [0.0, 16.0, 32.0] {
            s.dispatch(tick(ms), &FixedSurface, &mut backend).unwrap();
        }
        assert_eq!(backend.resizes(), 1);
        assert_eq!(s.context().canvas, CanvasDimensions::new(400, 300, 1.0));
    }
}
