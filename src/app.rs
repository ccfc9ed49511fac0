// src/app.rs

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};
use animated_polygons::animation_lib::{AnimationError, AnimationResult, PolygonScene};
use animated_polygons::rendering_lib::{FrameSurface, Renderer, WGSL_SHADER_SOURCE};
use crate::config::AppConfig;
use crate::demo_scene;
use crate::ui::{build_ui, UiStatus};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not create a window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,
    #[error("could not open the graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("could not build the demo scene: {0}")]
    Scene(#[from] AnimationError),
}

/// Latest scene failure, shown in the overlay. A distinct message is logged
/// once while it persists; a clean frame clears it.
#[derive(Debug, Default)]
struct FrameErrors {
    last: Option<String>,
}

impl FrameErrors {
    fn record(&mut self, result: AnimationResult<()>) {
        match result {
            Ok(()) => {
                if self.last.take().is_some() {
                    log::info!("scene renders cleanly again");
                }
            }
            Err(e) => {
                let message = e.to_string();
                if self.last.as_deref() != Some(message.as_str()) {
                    log::error!("{}", message);
                }
                self.last = Some(message);
            }
        }
    }

    fn message(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

pub struct PolygonApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    frame: FrameSurface,
    scene: PolygonScene,
    clear_color: wgpu::Color,
    errors: FrameErrors,
    /// Failures since the last rendered frame
    pending: AnimationResult<()>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl PolygonApp {
    pub async fn new(window: std::sync::Arc<Window>, app_config: &AppConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter().copied()
            .find(|f| f.is_srgb()).unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            config.width as f32, config.height as f32,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let scene = demo_scene::create_demo_scene(app_config)?;

        Ok(Self {
            surface, device, queue, config, size,
            renderer,
            frame: FrameSurface::new(),
            scene,
            clear_color: app_config.clear_color,
            errors: FrameErrors::default(),
            pending: Ok(()),
            egui_ctx, egui_state, egui_renderer,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.queue, new_size.width as f32, new_size.height as f32);
        }
    }

    /// Keeps the first failure until the next frame is rendered.
    fn report(&mut self, result: AnimationResult<()>) {
        let pending = std::mem::replace(&mut self.pending, Ok(()));
        self.pending = pending.and(result);
    }

    pub fn update(&mut self, dt: f32) {
        let result = self.scene.advance(dt).map(|_| ());
        self.report(result);
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        self.frame.begin_frame();
        let drawn = self.scene.draw_all(&mut self.frame);
        self.report(drawn);
        let frame_result = std::mem::replace(&mut self.pending, Ok(()));
        self.errors.record(frame_result);
        self.renderer.render_frame(
            &self.device, &self.queue, &mut encoder, &view,
            &self.frame, self.clear_color,
        );

        let clock = self.scene.clock();
        let status = UiStatus {
            progress: clock.progress().get(),
            pass_count: clock.pass_count(),
            paused: clock.is_paused(),
            looping: clock.is_looping(),
            polygon_count: self.scene.polygons().len(),
            point_count: self.scene.pool().len(),
            triangle_count: self.frame.triangle_count(),
            last_error: self.errors.message(),
        };
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| { build_ui(ctx, &status); });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Space => {
                let clock = self.scene.clock_mut();
                let paused = !clock.is_paused();
                clock.set_paused(paused);
                log::debug!("animation {}", if paused { "paused" } else { "resumed" });
                true
            }
            KeyCode::KeyR => {
                let result = self.scene.restart();
                self.report(result);
                true
            }
            KeyCode::KeyL => {
                let clock = self.scene.clock_mut();
                let looping = !clock.is_looping();
                clock.set_looping(looping);
                true
            }
            _ => false,
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed { return true; }
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. }
                if key_event.state == ElementState::Pressed && !key_event.repeat =>
            {
                match key_event.physical_key {
                    PhysicalKey::Code(code) => self.handle_key(code),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_frame_clears_the_error() {
        let mut errors = FrameErrors::default();
        errors.record(Err(AnimationError::NotInitialized.at_polygon(2)));
        assert_eq!(errors.message(), Some("polygon #2: polygon used before init"));
        errors.record(Err(AnimationError::NotInitialized.at_polygon(2)));
        assert!(errors.message().is_some());

        errors.record(Ok(()));
        assert_eq!(errors.message(), None);
    }
}
