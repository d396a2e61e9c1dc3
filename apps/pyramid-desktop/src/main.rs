use anyhow::Result;
use clap::Parser;
use pyramid_assets::TextureImage;
use pyramid_navigation::NavigationConfig;
use pyramid_render_wgpu::{GpuContext, PyramidRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

mod hud;
mod keymap;
mod state;

use hud::Hud;
use state::AppState;

#[derive(Parser)]
#[command(name = "pyramid-desktop", about = "Fly a camera around a textured pyramid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Image applied to the pyramid (PNG or JPEG)
    #[arg(long, default_value = "Brick.jpg")]
    texture: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Initial movement speed in units per second (1 to 55)
    #[arg(long, default_value_t = 10.0)]
    speed: f32,
}

/// Window and GPU resources, created once the event loop resumes.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: PyramidRenderer,
    hud: Hud,
}

struct GpuApp {
    state: AppState,
    texture_path: PathBuf,
    window_size: PhysicalSize<u32>,
    graphics: Option<Graphics>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        let config = NavigationConfig::default()
            .with_initial_movement_rate(cli.speed)
            .with_window_size(cli.width, cli.height);
        Self {
            state: AppState::new(config),
            texture_path: cli.texture.clone(),
            window_size: PhysicalSize::new(cli.width.max(1), cli.height.max(1)),
            graphics: None,
            init_error: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let attrs = Window::default_attributes()
            .with_title("Textured 3D Pyramid")
            .with_inner_size(self.window_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = pollster::block_on(GpuContext::new(window.clone(), size.width, size.height))?;

        let texture = TextureImage::load_or_fallback(&self.texture_path);
        let renderer = PyramidRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format(),
            size.width,
            size.height,
            &texture,
        );
        let hud = Hud::new(&window, &gpu);

        Ok(Graphics {
            window,
            gpu,
            renderer,
            hud,
        })
    }

    fn redraw(&mut self) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let now = self.state.now();
        let view = self.state.frame(now, graphics.gpu.aspect());

        let frame = match graphics.gpu.acquire_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                graphics.window.request_redraw();
                return;
            }
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        graphics
            .renderer
            .render(&graphics.gpu.device, &graphics.gpu.queue, &target, &view);

        if self.state.show_hud {
            let pose = self.state.navigation.pose();
            graphics
                .hud
                .draw(&graphics.window, &graphics.gpu, &target, &pose);
        }

        frame.present();
        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => self.graphics = Some(graphics),
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let overlay_consumed =
            self.state.show_hud && graphics.hud.on_window_event(&graphics.window, &event);
        self.state.handle_input(&event, overlay_consumed);
        if self.state.quit_requested() {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                graphics.gpu.resize(new_size.width, new_size.height);
                let (width, height) = graphics.gpu.size();
                graphics.renderer.resize(&graphics.gpu.device, width, height);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("pyramid-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
