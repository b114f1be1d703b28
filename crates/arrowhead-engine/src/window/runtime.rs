use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{AppControl, FrameMessage, FrameScheduler};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::render::{TriangleProgram, WgpuBackend};
use crate::scene::GeometryStore;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "arrowhead".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the GPU program and drives `scheduler` until
    /// the window closes.
    ///
    /// Returns an error when the environment cannot host the renderer (no
    /// surface/adapter/device, shader rejected) or when a frame fails fatally.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scheduler: FrameScheduler) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scheduler);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// GPU objects bound to one window.
struct WindowGpu<'w> {
    gpu: Gpu<'w>,
    program: TriangleProgram,
}

fn create_window_gpu<'w>(
    window: &'w Window,
    init: GpuInit,
    geometry: &GeometryStore,
) -> Result<WindowGpu<'w>> {
    let gpu = pollster::block_on(Gpu::new(window, init))
        .context("graphics backend is not available on this system")?;

    let program = TriangleProgram::new(gpu.device(), gpu.surface_format(), geometry)?;

    Ok(WindowGpu { gpu, program })
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: WindowGpu<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scheduler: FrameScheduler,

    window: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scheduler: FrameScheduler) -> Self {
        Self {
            config,
            gpu_init,
            scheduler,
            window: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal.get_or_insert(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let geometry = self.scheduler.geometry();

        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| create_window_gpu(w, gpu_init, geometry),
        }
        .try_build()
    }

    /// Routes one message through the scheduler with a backend over the live surface.
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: FrameMessage) {
        let (scheduler, window) = (&mut self.scheduler, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| {
            let WindowGpu { gpu, program } = fields.gpu;
            let mut backend = WgpuBackend::new(gpu, program).with_window(fields.window);
            scheduler.dispatch(msg, fields.window, &mut backend)
        });

        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => {
                self.exit_requested = true;
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err.context("frame failed")),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => {
                self.fail(event_loop, err.context("failed to initialize renderer"));
                return;
            }
        };

        entry.with_window(|w| {
            let size = w.inner_size();
            log::info!(
                "window ready: {}x{} px (scale {})",
                size.width,
                size.height,
                w.scale_factor()
            );
            w.request_redraw();
        });

        self.window = Some(entry);
        self.scheduler.start();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws are requested at the end of each frame; nothing to poll.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_ref() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(msg) = translate_window_event(&event) {
            self.dispatch(event_loop, msg);
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.dispatch(event_loop, FrameMessage::Stop);
                self.window = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            // The canvas is re-measured on the next tick.
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(timestamp_ms) = self
                    .window
                    .as_ref()
                    .map(|entry| entry.with_clock(|clock| clock.timestamp_ms()))
                else {
                    return;
                };

                self.dispatch(event_loop, FrameMessage::Tick { timestamp_ms });

                // Re-arm for the next refresh.
                if !self.exit_requested {
                    if let Some(entry) = self.window.as_ref() {
                        entry.with_window(|w| w.request_redraw());
                    }
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop surface resources before the event loop tears down the display.
        self.window = None;
    }
}
