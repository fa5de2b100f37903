use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use pong2d::{
    config::WindowConfig,
    controller::{FrameLoop, Key, KeyBindings, LoopState, PressedKeys},
    error::SetupError,
    logging,
    view::{GpuContext, SurfaceBackend},
};

struct App {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    backend: Option<SurfaceBackend>,
    frame_loop: FrameLoop,
    keys: PressedKeys,
    setup_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            backend: None,
            frame_loop: FrameLoop::new(KeyBindings::default()),
            keys: PressedKeys::new(),
            setup_error: None,
        }
    }

    /// Window, GPU, program and quad. Any failure here is fatal.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = event_loop
            .create_window(attributes)
            .map_err(SetupError::from)
            .context("window setup")?;
        let window = Arc::new(window);

        let gpu = pollster::block_on(GpuContext::new(window.clone(), self.config.present_mode))
            .context("GPU setup")?;

        self.backend = Some(SurfaceBackend::new(gpu));
        self.window = Some(window);
        tracing::info!(title = %self.config.title, "running");
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_loop.terminate();
        // Drop GPU resources before the window they were created for
        self.backend = None;
        self.window = None;
        event_loop.exit();
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else { return false };
        let Some(key) = Key::from_key_code(code) else { return false };

        match event.state {
            ElementState::Pressed => {
                self.keys.press(key);
                key == Key::Escape
            }
            ElementState::Released => {
                self.keys.release(key);
                false
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("{e:#}");
            self.setup_error = Some(e);
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if self.handle_key(&event) {
                    tracing::info!("escape pressed");
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::Resized(size) => {
                if let Some(backend) = self.backend.as_mut() {
                    backend.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(backend) = self.backend.as_mut() else { return };
                self.frame_loop.tick(&self.keys, backend);
                if self.frame_loop.status() == LoopState::Terminated {
                    self.shutdown(event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    logging::init();

    let config = WindowConfig::from_env();
    tracing::debug!(?config, "window config");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    match app.setup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
