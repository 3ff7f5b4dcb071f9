//! Core application state and lifecycle.

use layoutpad_core::storage::{create_default_storage, StorageError};
use layoutpad_core::{PlatformSession, Session, SessionConfig};
use std::sync::Arc;
use thiserror::Error;
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::canvas_view::CanvasView;
use crate::ui::render_ui;

/// Errors that stop the application from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: egui::Color32,
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "LayoutPad".to_string(),
            width: 1000,
            height: 680,
            background_color: egui::Color32::from_gray(243),
            session: SessionConfig::default(),
        }
    }
}

/// Window, GPU handles and egui integration.
struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl GpuState {
    async fn new(window: Arc<Window>, fallback_size: (u32, u32)) -> Result<Self, AppError> {
        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            fallback_size
        } else {
            (size.width, size.height)
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("layoutpad device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await?;

        let mut surface_config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(AppError::UnsupportedSurface)?;
        // egui expects a linear framebuffer
        let capabilities = surface.get_capabilities(&adapter);
        if let Some(format) = capabilities.formats.iter().copied().find(|f| !f.is_srgb()) {
            surface_config.format = format;
        }
        surface.configure(&device, &surface_config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!("LayoutPad initialized - {}x{}", width, height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            surface_config,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Paint tessellated egui output to the window.
    fn present(
        &mut self,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        pixels_per_point: f32,
        background: egui::Color32,
    ) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.window.request_redraw();
                return;
            }
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
        let user_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            primitives,
            &screen_descriptor,
        );

        {
            let [r, g, b, _] = background.to_normalized_gamma_f32();
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Use forget_lifetime to satisfy egui-wgpu's 'static requirement
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, primitives, &screen_descriptor);
        }

        self.queue
            .submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    /// Shapes, selection and saved layouts for this run.
    session: PlatformSession,
    canvas_view: CanvasView,
    gpu: Option<GpuState>,
    /// Why startup failed, handed back by `run` once the loop exits.
    init_error: Option<AppError>,
    /// GPU state finished asynchronously, waiting to be picked up (WASM only)
    #[cfg(target_arch = "wasm32")]
    pending_gpu: std::rc::Rc<std::cell::RefCell<Option<GpuState>>>,
    #[cfg(target_arch = "wasm32")]
    init_in_progress: bool,
}

impl App {
    /// Create an application around an existing session.
    pub fn new(config: AppConfig, session: PlatformSession) -> Self {
        Self {
            config,
            session,
            canvas_view: CanvasView::new(),
            gpu: None,
            init_error: None,
            #[cfg(target_arch = "wasm32")]
            pending_gpu: Default::default(),
            #[cfg(target_arch = "wasm32")]
            init_in_progress: false,
        }
    }

    /// Open platform storage, restore saved layouts and run the event loop.
    pub async fn run(config: AppConfig) -> Result<(), AppError> {
        let storage = create_default_storage()?;
        let session = Session::new(config.session.clone(), storage);
        let event_loop = EventLoop::new()?;
        let app = App::new(config, session);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop.run_app(&mut app)?;
            app.finish()?;
        }

        Ok(())
    }

    /// Remember a startup failure. Only the first one is kept.
    fn record_init_error(&mut self, error: AppError) {
        log::error!("{}", error);
        if self.init_error.is_none() {
            self.init_error = Some(error);
        }
    }

    /// Stop the event loop because startup failed.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.record_init_error(error);
        event_loop.exit();
    }

    /// Outcome of the finished event loop.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn finish(&mut self) -> Result<(), AppError> {
        match self.init_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            // Remove loading indicator
            if let Some(loading) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("loading"))
            {
                loading.remove();
            }

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_append(true)
        }
    }

    /// Run one egui frame, apply the resulting actions and draw.
    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let session = &mut self.session;
        let canvas_view = &mut self.canvas_view;

        let egui_input = gpu.egui_state.take_egui_input(&gpu.window);
        let mut actions = Vec::new();
        let egui_output = gpu.egui_ctx.run(egui_input, |ctx| {
            actions = render_ui(ctx, session, canvas_view);
        });

        let changed = !actions.is_empty();
        for action in actions {
            session.dispatch(action);
        }

        gpu.egui_state
            .handle_platform_output(&gpu.window, egui_output.platform_output);
        let primitives = gpu
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);
        gpu.present(
            &primitives,
            &egui_output.textures_delta,
            egui_output.pixels_per_point,
            self.config.background_color,
        );

        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());
        if changed || repaint_now {
            gpu.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            if self.init_in_progress {
                return;
            }
        }

        log::info!("Creating window...");
        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };
        let fallback_size = (self.config.width, self.config.height);

        // On native, block on async GPU setup
        #[cfg(not(target_arch = "wasm32"))]
        {
            match pollster::block_on(GpuState::new(window.clone(), fallback_size)) {
                Ok(gpu) => {
                    self.gpu = Some(gpu);
                    window.request_redraw();
                }
                Err(e) => self.fail(event_loop, e),
            }
        }

        // On WASM, finish setup in the background and pick it up on the next event
        #[cfg(target_arch = "wasm32")]
        {
            self.init_in_progress = true;
            let slot = self.pending_gpu.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match GpuState::new(window.clone(), fallback_size).await {
                    Ok(gpu) => {
                        *slot.borrow_mut() = Some(gpu);
                        window.request_redraw();
                    }
                    Err(e) => log::error!("{}", e),
                }
            });
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.gpu.is_none() {
                self.gpu = self.pending_gpu.borrow_mut().take();
            }
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // Let egui process the event first
        let egui_response = gpu.egui_state.on_window_event(&gpu.window, &event);
        if egui_response.repaint {
            gpu.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Closing with {} saved layout(s)", self.session.archive().len());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                gpu.window.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutpad_core::storage::FileStorage;
    use tempfile::tempdir;

    fn app() -> App {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
        let config = AppConfig::default();
        let session = Session::new(config.session.clone(), storage);
        App::new(config, session)
    }

    #[test]
    fn test_clean_exit_is_ok() {
        let mut app = app();
        assert!(app.finish().is_ok());
    }

    #[test]
    fn test_startup_failure_reaches_caller() {
        let mut app = app();
        app.record_init_error(AppError::UnsupportedSurface);
        app.record_init_error(AppError::Storage(StorageError::Other("later".to_string())));

        assert!(matches!(app.finish(), Err(AppError::UnsupportedSurface)));
        assert!(app.finish().is_ok());
    }
}
