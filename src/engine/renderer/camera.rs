// Perspective camera for the 3D scene

use glam::Vec3;

/// Perspective camera looking at a target point
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    target: Vec3,
    /// Vertical field of view in degrees
    fov_y_degrees: f32,
    /// Viewport width / height
    aspect: f32,
    near: f32,
    far: f32,
}

impl PerspectiveCamera {
    /// Create a new camera looking at the origin
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            fov_y_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set the viewport aspect ratio (width / height)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Near and far clip distances
    pub fn clip_range(&self) -> (f32, f32) {
        (self.near, self.far)
    }
}
