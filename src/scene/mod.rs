pub mod camera;
pub mod grid;

pub use camera::Camera;
pub use grid::{GridCell, MaterialGrid, ROUGHNESS_FLOOR};

use std::time::Instant;

use glam::Vec3;
use winit::keyboard::KeyCode;

use crate::brdf::PointLight;

/// The demo scene: a free-fly camera, a point-light rig and the
/// metallic/roughness sphere grid. Light positions may be animated between
/// frames; everything else is static after construction.
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<PointLight>,
    pub grid: MaterialGrid,
    pub base_albedo: Vec3,
    last_update: Instant,
}

impl Scene {
    pub fn new(camera: Camera, grid: MaterialGrid) -> Self {
        Self {
            camera,
            lights: Vec::new(),
            grid,
            base_albedo: Vec3::new(0.5, 0.0, 0.0),
            last_update: Instant::now(),
        }
    }

    /// The original direct-lighting rig: one white light straight ahead.
    pub fn direct_lighting_rig() -> Vec<PointLight> {
        vec![PointLight::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::splat(150.0),
        )]
    }

    /// The IBL rig: four lights on the near corners of the grid.
    pub fn ibl_rig() -> Vec<PointLight> {
        vec![
            PointLight::new(Vec3::new(-10.0, 10.0, 10.0), Vec3::splat(300.0)),
            PointLight::new(Vec3::new(10.0, 10.0, 10.0), Vec3::splat(300.0)),
            PointLight::new(Vec3::new(-10.0, -10.0, 10.0), Vec3::splat(300.0)),
            PointLight::new(Vec3::new(10.0, -10.0, 10.0), Vec3::splat(300.0)),
        ]
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        self.camera.update(dt);
    }

    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) {
        self.camera.process_keyboard(key, pressed);
    }

    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.camera.process_mouse(dx, dy);
    }

    pub fn process_scroll(&mut self, delta: f32) {
        self.camera.process_scroll(delta);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height as f32;
    }
}
