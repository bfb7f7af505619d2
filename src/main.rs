//! Carbon Atom
//!
//! Animated 3D model of a carbon atom: nucleons spread over the nucleus,
//! six electrons on fixed orbits, and an orbiting camera.

mod gui;

use atom_renderer::{AtomRenderer, Projection};
use atom_scene::{
    FrameClock, NodeKind, SceneComposer, SceneError, SceneGraph, SceneParams, SceneTree,
};
use glam::{Vec2, Vec3};
use gui::{Gui, ScreenLabel, UiState};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to compose scene: {0}")]
    Scene(#[from] SceneError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Scatter small unlit spheres over a distant shell as a backdrop
fn spawn_star_field(composer: &mut SceneComposer, params: &SceneParams) -> Result<(), SceneError> {
    let mut rng = rand::rng();
    let stars = composer.graph_mut().add_group(None, Vec3::ZERO)?;

    for _ in 0..params.star_count {
        // Uniform direction on the unit sphere
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        let cos_phi = rng.random::<f32>() * 2.0 - 1.0;
        let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
        let r = params.star_radius * (1.0 + rng.random::<f32>() * 0.5);

        let position = Vec3::new(
            r * sin_phi * theta.cos(),
            r * sin_phi * theta.sin(),
            r * cos_phi,
        );
        let brightness = 0.6 + rng.random::<f32>() * 0.4;
        let size = 0.15 + rng.random::<f32>() * 0.25;

        composer
            .graph_mut()
            .add_sphere(Some(stars), position, size, [brightness; 3], 1.0)?;
    }

    log::info!("✓ Star field: {} stars", params.star_count);
    Ok(())
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    renderer: AtomRenderer,
    projection: Projection,
    composer: SceneComposer,
    clock: FrameClock,

    gui: Gui,
    ui_state: UiState,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self, AppError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = AtomRenderer::new(&device, &config);
        log::info!("✓ Renderer initialized");

        let projection = Projection::new(config.width, config.height);

        // Compose scene (camera rig first, then nucleus and electrons)
        let params = SceneParams::default();
        let mut composer = SceneComposer::new(SceneTree::new(), params)?;
        spawn_star_field(&mut composer, &params)?;

        let gui = Gui::new(&device, config.format, &window);
        let ui_state = UiState {
            isotope: composer.isotope(),
            show_orbits: params.show_orbits,
            show_labels: params.show_labels,
            time_scale: params.time_scale,
            ..Default::default()
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            projection,
            composer,
            clock: FrameClock::new(),
            gui,
            ui_state,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, &self.config);
            self.projection.resize(new_size.width, new_size.height);
        }
    }

    fn viewport_height(&self) -> f32 {
        self.config.height as f32
    }

    /// Apply selections and toggles made in the UI during the previous frame
    fn apply_ui_requests(&mut self) {
        if let Some(mass_number) = self.ui_state.requested_isotope.take() {
            // Rejections are logged by the composer; the selector just snaps back
            let _ = self.composer.set_isotope(mass_number);
            self.ui_state.isotope = self.composer.isotope();
        }

        let params = *self.composer.params();
        if self.ui_state.show_orbits != params.show_orbits {
            if let Err(e) = self.composer.set_show_orbits(self.ui_state.show_orbits) {
                log::warn!("Failed to toggle orbits: {}", e);
            }
        }
        if self.ui_state.show_labels != params.show_labels {
            if let Err(e) = self.composer.set_show_labels(self.ui_state.show_labels) {
                log::warn!("Failed to toggle labels: {}", e);
            }
        }

        if std::mem::take(&mut self.ui_state.reset_camera) {
            self.composer.reset_camera();
        }

        self.clock.time_scale = self.ui_state.time_scale;
        self.clock.paused = self.ui_state.is_paused;
    }

    /// Project every visible label node into egui screen space
    fn collect_labels(&self, pixels_per_point: f32) -> Vec<ScreenLabel> {
        let graph = self.composer.graph();
        let pose = self.composer.camera().pose();

        graph
            .iter()
            .filter_map(|(id, node)| {
                let NodeKind::Label { text } = &node.kind else {
                    return None;
                };
                if !graph.is_shown(id) {
                    return None;
                }
                let screen = self
                    .projection
                    .project_to_screen(&pose, graph.world_position(id)?)?;
                Some(ScreenLabel {
                    position: egui::pos2(screen.x, screen.y) / pixels_per_point,
                    text: text.clone(),
                })
            })
            .collect()
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }

        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = 1000.0 / avg_frame_time;

        self.apply_ui_requests();

        // Drive the scene: electrons from elapsed time, then one camera damping step
        let elapsed = self.clock.tick();
        let pose = match self.composer.frame(elapsed) {
            Ok(pose) => pose,
            Err(e) => {
                log::warn!("Frame update failed: {}", e);
                self.composer.camera().pose()
            }
        };
        log::trace!("t={:.3}s camera={:?}", elapsed, pose.position);

        // Update UI state
        self.ui_state.fps = fps;
        self.ui_state.frame_time = avg_frame_time;
        self.ui_state.labels = self.collect_labels(window.scale_factor() as f32);

        // Render
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let camera = self.projection.to_uniform(&pose, self.composer.params());
        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            camera,
            self.composer.graph(),
        );

        self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &mut self.ui_state,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok((fps, avg_frame_time))
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,

    // Left drag orbits, right drag pans
    rotating: bool,
    panning: bool,
    last_cursor_pos: Option<(f64, f64)>,
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attributes = Window::default_attributes()
            .with_title("Carbon Atom")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.window = Some(window.clone());
        self.gpu_state = Some(pollster::block_on(GpuState::new(window))?);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("Startup failed: {}", e);
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
        // Handle GUI events
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if gpu_state.gui.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    match key_code {
                        KeyCode::Digit1 => gpu_state.ui_state.requested_isotope = Some(12),
                        KeyCode::Digit2 => gpu_state.ui_state.requested_isotope = Some(13),
                        KeyCode::Digit3 => gpu_state.ui_state.requested_isotope = Some(14),
                        KeyCode::KeyC => gpu_state.ui_state.reset_camera = true,
                        KeyCode::Space => {
                            gpu_state.ui_state.is_paused = !gpu_state.ui_state.is_paused
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.rotating = pressed,
                    MouseButton::Right => self.panning = pressed,
                    _ => {}
                }
                if !self.rotating && !self.panning {
                    self.last_cursor_pos = None;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.rotating || self.panning {
                    if let (Some(last_pos), Some(gpu_state)) =
                        (self.last_cursor_pos, &mut self.gpu_state)
                    {
                        let delta = Vec2::new(
                            (position.x - last_pos.0) as f32,
                            (position.y - last_pos.1) as f32,
                        );
                        let height = gpu_state.viewport_height();
                        let controls = gpu_state.composer.camera_mut().controls_mut();
                        if self.rotating {
                            controls.rotate(delta, height);
                        } else {
                            controls.pan(delta, height);
                        }
                    }
                    self.last_cursor_pos = Some((position.x, position.y));
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_x, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.02,
                };

                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.composer.camera_mut().controls_mut().zoom(scroll);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok((fps, frame_time)) => {
                            log::debug!("{:.0} FPS ({:.2}ms)", fps, frame_time);
                        }
                        Err(wgpu::SurfaceError::Lost) => gpu_state.resize(window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::error!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), AppError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting carbon atom viewer...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
