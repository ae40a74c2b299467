use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,   // Rotation around Y axis
    pub pitch: f32, // Rotation around X axis
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    // Movement state
    pub moving_forward: bool,
    pub moving_backward: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub moving_up: bool,
    pub moving_down: bool,
}

impl Camera {
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            aspect,
            near: 0.1,
            far: 100.0,
            moving_forward: false,
            moving_backward: false,
            moving_left: false,
            moving_right: false,
            moving_up: false,
            moving_down: false,
        }
    }

    pub fn build_view_matrix(&self) -> Mat4 {
        let view_dir = self.get_view_direction();
        let target = self.position + view_dir;
        Mat4::look_at_rh(self.position, target, Vec3::Y)
    }

    pub fn build_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.build_projection_matrix() * self.build_view_matrix()
    }

    pub fn get_forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(yaw_cos, 0.0, yaw_sin).normalize()
    }

    pub fn get_right(&self) -> Vec3 {
        let forward = self.get_forward();
        forward.cross(Vec3::Y).normalize()
    }

    fn get_view_direction(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        const MOUSE_SENSITIVITY: f32 = 0.2;

        self.yaw += dx * MOUSE_SENSITIVITY;
        let new_pitch = self.pitch - dy * MOUSE_SENSITIVITY;
        self.pitch = new_pitch.clamp(-89.0, 89.0);
    }

    /// Scroll-wheel zoom narrows the field of view.
    pub fn process_scroll(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(1.0, 45.0);
    }

    pub fn update(&mut self, dt: f32) {
        const SPEED: f32 = 5.0;
        let velocity = SPEED * dt;

        let forward = self.get_forward();
        let right = self.get_right();

        if self.moving_forward {
            self.position += forward * velocity;
        }
        if self.moving_backward {
            self.position -= forward * velocity;
        }
        if self.moving_right {
            self.position += right * velocity;
        }
        if self.moving_left {
            self.position -= right * velocity;
        }
        if self.moving_up {
            self.position.y += velocity;
        }
        if self.moving_down {
            self.position.y -= velocity;
        }
    }

    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::KeyW => self.moving_forward = pressed,
            KeyCode::KeyS => self.moving_backward = pressed,
            KeyCode::KeyA => self.moving_left = pressed,
            KeyCode::KeyD => self.moving_right = pressed,
            KeyCode::Space => self.moving_up = pressed,
            KeyCode::ShiftLeft => self.moving_down = pressed,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_initialization() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), 16.0 / 9.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(camera.yaw, -90.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.fov, 45.0);
        assert!(!camera.moving_forward);
    }

    #[test]
    fn test_default_view_direction_faces_negative_z() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let dir = camera.get_view_direction();
        assert_relative_eq!(dir.x, 0.0, epsilon = 0.001);
        assert_relative_eq!(dir.y, 0.0, epsilon = 0.001);
        assert_relative_eq!(dir.z, -1.0, epsilon = 0.001);
    }

    #[test]
    fn test_movement_update() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.moving_forward = true;
        camera.update(1.0);
        assert_relative_eq!(camera.position.z, -5.0, epsilon = 0.001); // SPEED = 5.0

        camera = Camera::new(Vec3::ZERO, 1.0);
        camera.moving_right = true;
        camera.update(1.0);
        assert_relative_eq!(camera.position.x, 5.0, epsilon = 0.001);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.process_mouse(0.0, -1000.0);
        assert_relative_eq!(camera.pitch, 89.0, epsilon = 0.001);
        camera.process_mouse(0.0, 1000.0);
        assert_relative_eq!(camera.pitch, -89.0, epsilon = 0.001);
    }

    #[test]
    fn test_scroll_zoom_clamps_fov() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.process_scroll(10.0);
        assert_relative_eq!(camera.fov, 35.0, epsilon = 0.001);
        camera.process_scroll(100.0);
        assert_relative_eq!(camera.fov, 1.0, epsilon = 0.001);
        camera.process_scroll(-100.0);
        assert_relative_eq!(camera.fov, 45.0, epsilon = 0.001);
    }

    #[test]
    fn test_view_matrix_changes_with_movement() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let initial = camera.build_view_projection_matrix();

        camera.position = Vec3::new(1.0, 1.0, 5.0);
        let moved = camera.build_view_projection_matrix();
        assert_ne!(initial, moved);

        camera.yaw = 0.0;
        let rotated = camera.build_view_projection_matrix();
        assert_ne!(moved, rotated);
    }
}
