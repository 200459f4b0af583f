use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use stilllife_input::{ProjectionMode, ViewKey};
use stilllife_render_wgpu::{GpuRenderer, GpuTexture};
use stilllife_scene::{DEFAULT_TEXTURE_DIR, TEXTURES, Tableau};
use stilllife_view::{FrameControl, ViewManager, WINDOW_HEIGHT, WINDOW_WIDTH};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "stilllife-desktop", about = "Still-life scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the scene textures
    #[arg(long, default_value = DEFAULT_TEXTURE_DIR)]
    textures: PathBuf,
}

fn view_key(code: KeyCode) -> Option<ViewKey> {
    let key = match code {
        KeyCode::KeyW => ViewKey::W,
        KeyCode::KeyA => ViewKey::A,
        KeyCode::KeyS => ViewKey::S,
        KeyCode::KeyD => ViewKey::D,
        KeyCode::KeyQ => ViewKey::Q,
        KeyCode::KeyE => ViewKey::E,
        KeyCode::Digit1 => ViewKey::One,
        KeyCode::Digit2 => ViewKey::Two,
        KeyCode::Digit3 => ViewKey::Three,
        KeyCode::Digit4 => ViewKey::Four,
        KeyCode::KeyO => ViewKey::O,
        KeyCode::KeyP => ViewKey::P,
        KeyCode::Escape => ViewKey::Escape,
        _ => return None,
    };
    Some(key)
}

/// Scene and input state, independent of the window and GPU.
struct AppState {
    view: ViewManager,
    tableau: Tableau<Arc<GpuTexture>>,
    texture_dir: PathBuf,
    keys_held: HashSet<ViewKey>,
    // Unbounded cursor position built from raw mouse motion while grabbed.
    cursor: Vec2,
    started: Instant,
    draws_last_frame: usize,
    show_hud: bool,
}

impl AppState {
    fn new(texture_dir: PathBuf) -> Self {
        Self {
            view: ViewManager::default(),
            tableau: Tableau::new(),
            texture_dir,
            keys_held: HashSet::new(),
            cursor: Vec2::new(WINDOW_WIDTH as f32 / 2.0, WINDOW_HEIGHT as f32 / 2.0),
            started: Instant::now(),
            draws_last_frame: 0,
            show_hud: true,
        }
    }

    /// Textures, materials, lights and meshes, once the renderer exists.
    fn load_scene(&mut self, renderer: &mut GpuRenderer) -> Result<()> {
        let loaded = self.tableau.load_textures(&self.texture_dir, renderer);
        if loaded < TEXTURES.len() {
            tracing::warn!(
                "{} textures missing from {}",
                TEXTURES.len() - loaded,
                self.texture_dir.display()
            );
        }
        self.tableau.define_materials()?;
        self.tableau.setup_lights(renderer);
        self.tableau.load_meshes(renderer);
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed && code == KeyCode::F1 {
            self.show_hud = !self.show_hud;
        }
        let Some(key) = view_key(code) else {
            return;
        };
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    fn mouse_moved(&mut self, dx: f32, dy: f32) {
        self.cursor += Vec2::new(dx, dy);
        self.view.on_cursor_moved(self.cursor.x, self.cursor.y);
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let camera = self.view.camera();
        let input = self.view.input();
        let projection = match self.view.projection_mode() {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "orthographic",
        };

        egui::Window::new("Still Life")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Camera: ({:.1}, {:.1}, {:.1})",
                    camera.position.x, camera.position.y, camera.position.z
                ));
                ui.label(format!("Projection: {projection}"));
                ui.label(format!("Speed: x{:.2}", input.speed_multiplier()));
                ui.label(format!(
                    "Frame: {:.2} ms, {} draws",
                    input.delta_time() * 1000.0,
                    self.draws_last_frame
                ));
                ui.label(format!(
                    "Textures: {} / {}",
                    self.tableau.textures().len(),
                    TEXTURES.len()
                ));

                let failed = self.tableau.failed_textures();
                if !failed.is_empty() {
                    ui.separator();
                    ui.heading("Failed textures");
                    for texture in failed {
                        ui.colored_label(
                            egui::Color32::LIGHT_RED,
                            format!("{}: {}", texture.tag, texture.reason),
                        );
                    }
                }

                ui.separator();
                ui.small("F1: HUD | WASD/QE: Move | Scroll: Speed | 1-4: Views | P/O: Projection");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<GpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(texture_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(texture_dir),
            window: None,
            surface: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Still Life")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            tracing::warn!("cursor grab unavailable; mouse look may stop at the window edge");
        }
        window.set_cursor_visible(false);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("stilllife_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer =
            GpuRenderer::new(device, queue, surface_format, config.width, config.height);
        self.state.load_scene(&mut renderer)?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(renderer.device(), surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (
            Some(window),
            Some(surface),
            Some(config),
            Some(renderer),
            Some(egui_winit),
            Some(egui_renderer),
        ) = (
            &self.window,
            &self.surface,
            &self.config,
            &mut self.renderer,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        )
        else {
            return;
        };

        let now = self.state.started.elapsed().as_secs_f32();
        renderer.begin_frame();
        if self
            .state
            .view
            .prepare_frame(now, &self.state.keys_held, renderer)
            == FrameControl::Exit
        {
            event_loop.exit();
            return;
        }
        self.state.draws_last_frame = self.state.tableau.render(renderer);

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(renderer.device(), config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = renderer
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        renderer.encode(&mut encoder, &view);

        let raw_input = egui_winit.take_egui_input(window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| state.draw_hud(ctx));
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let (device, queue) = (renderer.device(), renderer.queue());
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(config), Some(renderer)) =
                    (&self.surface, &mut self.config, &mut self.renderer)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(renderer.device(), config);
                    renderer.resize(config.width, config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.keys_held.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(code, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.state.view.on_scroll(y);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.mouse_moved(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("stilllife-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.textures);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
