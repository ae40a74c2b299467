use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use winit::window::Window;

pub mod brdf;
pub mod ibl;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod texture;

use ibl::{EnvironmentSource, PreparedEnvironment};
use mesh::{CubeMesh, SphereCache};
use renderer::PbrRenderer;
use scene::{camera::Camera, MaterialGrid, Scene};

/// Tessellation of the demo spheres, both axes.
pub const SPHERE_SEGMENTS: u32 = 64;

/// Startup configuration resolved from the command line.
pub struct ViewerOptions {
    /// `None` renders the direct-lighting variant with no environment.
    pub environment: Option<EnvironmentSource>,
    /// LDR albedo texture applied to the grid spheres in place of the flat
    /// base color.
    pub albedo_map: Option<PathBuf>,
    pub grid: MaterialGrid,
}

pub struct State {
    window: Arc<Window>,
    pub scene: Scene,
    renderer: PbrRenderer,
    environment: Option<PreparedEnvironment>,
}

impl State {
    pub fn new(window: Window, options: ViewerOptions) -> Result<Self> {
        let window = Arc::new(window);
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: if cfg!(target_os = "macos") {
                wgpu::Backends::METAL
            } else {
                wgpu::Backends::VULKAN
            },
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
        .ok_or_else(|| anyhow!("no compatible adapter found"))?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        log::info!("surface format {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let cube = CubeMesh::new(&device);
        let mut sphere_cache = SphereCache::new();
        let sphere = sphere_cache.get_or_create(&device, SPHERE_SEGMENTS, SPHERE_SEGMENTS);

        // The whole IBL preprocessing chain runs here, before the first
        // frame; per-frame rendering only samples its output.
        let environment = options
            .environment
            .as_ref()
            .map(|source| PreparedEnvironment::build(&device, &queue, &cube, source))
            .transpose()?;

        let albedo_map = options
            .albedo_map
            .as_ref()
            .map(|path| {
                let img = texture::TextureImage::load(path)?;
                Ok::<_, anyhow::Error>(img.upload(&device, &queue, "Albedo Map"))
            })
            .transpose()?;

        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 20.0),
            size.width as f32 / size.height.max(1) as f32,
        );
        let mut scene = Scene::new(camera, options.grid);
        scene.lights = if environment.is_some() {
            Scene::ibl_rig()
        } else {
            Scene::direct_lighting_rig()
        };

        let renderer = PbrRenderer::new(device, queue, &config, surface, sphere, cube, albedo_map);

        Ok(Self {
            window,
            scene,
            renderer,
            environment,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.scene.resize(new_size.width, new_size.height);
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(&self.scene, self.environment.as_ref())
    }
}
