use anyhow::{Context, Result};
use bigday_common::Light;
use bigday_input::Action;
use bigday_render::{DisplayContext, ProgramState, Scratchpad};
use bigday_render_wgpu::WgpuRenderer;
use bigday_scene::{DrawPlan, DrawableScene, MiffyScene};
use bigday_tools::SceneInspector;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Mat4;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "bigday-desktop", about = "miffy's big day, in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use a perspective projection instead of the identity projection
    #[arg(long)]
    perspective: bool,

    /// Draw sky, grass and sun
    #[arg(long)]
    background: bool,

    /// Draw the title while it is on screen
    #[arg(long)]
    title: bool,
}

/// Application state.
struct AppState {
    scene: MiffyScene,
    program: ProgramState,
    scratchpad: Scratchpad,
    perspective: bool,
    show_panel: bool,
    last_error: Option<String>,
    // Input state
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let plan = DrawPlan {
            house: true,
            background: cli.background,
            title: cli.title,
        };
        Self {
            scene: MiffyScene::with_plan(plan),
            program: ProgramState::new(),
            scratchpad: Scratchpad::new(),
            perspective: cli.perspective,
            show_panel: true,
            last_error: None,
            keys_held: HashSet::new(),
            mouse_captured: false,
            last_frame: Instant::now(),
        }
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut v = 0.0;
        if self.keys_held.contains(&positive) {
            v += 1.0;
        }
        if self.keys_held.contains(&negative) {
            v -= 1.0;
        }
        v
    }

    fn apply(&mut self, action: Action) {
        if let Some(controls) = self.scratchpad.controls_mut() {
            controls.apply(&action);
        }
    }

    /// Advance the clock and let the controls move the camera.
    fn update(&mut self, dt_ms: f64, aspect: f32) {
        self.program.advance_clock(dt_ms);

        let thrust = Action::thrust(
            self.axis(KeyCode::KeyD, KeyCode::KeyA),
            self.axis(KeyCode::Space, KeyCode::ControlLeft),
            self.axis(KeyCode::KeyW, KeyCode::KeyS),
        );
        self.apply(thrust);
        self.scratchpad.update_controls(&mut self.program);

        self.program.projection_transform = if self.perspective {
            Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_4, aspect, 0.5, 1000.0)
        } else {
            Mat4::IDENTITY
        };
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        match key {
            KeyCode::KeyR => self.apply(Action::ResetView),
            KeyCode::KeyP => self.perspective = !self.perspective,
            KeyCode::F1 => self.show_panel = !self.show_panel,
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);

        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("miffy's big day");
                ui.label(format!("Registry entries: {}", summary.entry_count));
                ui.separator();

                ui.heading("Draw plan");
                ui.checkbox(&mut self.scene.plan.house, "House");
                ui.checkbox(&mut self.scene.plan.background, "Sky, grass and sun");
                ui.checkbox(&mut self.scene.plan.title, "Title");
                ui.label(format!(
                    "Title window: ({}, {}) s",
                    self.scene.title_window.start_sec, self.scene.title_window.end_sec
                ));
                ui.separator();

                ui.heading("Clock");
                let clock = self.program.clock();
                ui.label(format!("t = {:.2} s", clock.time_sec()));
                ui.label(format!("dt = {:.1} ms", clock.delta_ms()));
                ui.separator();

                ui.heading("Light");
                match self.program.lights.first() {
                    Some(light) => ui.label(light_label(light)),
                    None => ui.label("none"),
                };
                ui.separator();

                ui.heading("Camera");
                let eye = self.program.camera_transform().w_axis;
                ui.label(format!("Eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z));
                ui.checkbox(&mut self.perspective, "Perspective (P)");
                ui.label(format!(
                    "Controls: {:?} ({} registrations)",
                    self.scratchpad.controls(),
                    self.scratchpad.registrations()
                ));
                if ui.button("Reset view (R)").clicked() {
                    self.apply(Action::ResetView);
                }

                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }

                ui.separator();
                ui.small("F1: Toggle panel | RMB: Look | WASD/Space/Ctrl: Move");
            });
    }
}

fn light_label(light: &Light) -> String {
    let p = light.position;
    format!(
        "({:.1}, {:.1}, {:.1}, {:.0}) {} size {}",
        p.x,
        p.y,
        p.z,
        p.w,
        light.color.to_hex_string(),
        light.size
    )
}

/// Everything that only exists once a window and device are up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("miffy's big day")
            .with_inner_size(PhysicalSize::new(1080u32, 600));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("bigday_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.config.width = new_size.width.max(1);
        self.config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn render_ui(&mut self, egui_ctx: &EguiContext, state: &mut AppState, view: &wgpu::TextureView) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let now = Instant::now();
        let dt_ms = (now - self.state.last_frame).as_secs_f64().min(0.1) * 1000.0;
        self.state.last_frame = now;
        self.state.update(dt_ms, gpu.aspect());

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        let state = &mut self.state;
        let mut ctx = DisplayContext::new(
            &mut gpu.renderer,
            &mut state.scratchpad,
            gpu.config.width,
            gpu.config.height,
        );
        match state.scene.display(&mut ctx, &mut state.program) {
            Ok(()) => state.last_error = None,
            Err(e) => {
                if state.last_error.is_none() {
                    tracing::error!("frame failed: {e}");
                }
                state.last_error = Some(e.to_string());
            }
        }
        gpu.renderer.flush(&gpu.device, &gpu.queue, &view);

        gpu.render_ui(&self.egui_ctx, state, &view);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
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
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(gpu) = &self.gpu {
                    gpu.window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
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
            if self.state.mouse_captured {
                self.state.apply(Action::Look {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!(perspective = cli.perspective, "bigday-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
