// Camera plus output size, kept in step on resize

use super::PerspectiveCamera;

/// What the renderer draws through and how big the output is
#[derive(Debug, Clone)]
pub struct SceneView {
    camera: PerspectiveCamera,
    output_size: (u32, u32),
}

impl SceneView {
    pub fn new(camera: PerspectiveCamera, width: u32, height: u32) -> Self {
        let mut view = Self {
            camera,
            output_size: (width.max(1), height.max(1)),
        };
        view.camera.set_aspect(view.aspect());
        view
    }

    /// Follow a new surface size. Zero-sized surfaces (minimised windows)
    /// are ignored; returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == self.output_size {
            return false;
        }
        self.output_size = (width, height);
        self.camera.set_aspect(self.aspect());
        true
    }

    pub fn aspect(&self) -> f32 {
        self.output_size.0 as f32 / self.output_size.1 as f32
    }

    pub fn output_size(&self) -> (u32, u32) {
        self.output_size
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
}
