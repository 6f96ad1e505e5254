// Scene content: background, lights and placed models

use glam::{Quat, Vec3};
use log::debug;
use std::f32::consts::PI;

use crate::core::math::hex_to_rgb;
use crate::engine::assets::EnvironmentMap;

/// Flat colour shown until the environment map arrives
pub const DEFAULT_BACKGROUND: u32 = 0xaaaaaa;

/// What the surface is cleared to
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// 0xRRGGBB
    Color(u32),
    Environment(EnvironmentMap),
}

impl Background {
    pub fn clear_color(&self) -> [f32; 3] {
        match self {
            Background::Color(hex) => hex_to_rgb(*hex),
            Background::Environment(env) => env.tone_mapped_mean(),
        }
    }
}

/// Scene lights as configured for the ring
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: u32,
        intensity: f32,
    },
    Spot {
        color: u32,
        intensity: f32,
        position: Vec3,
        target: Vec3,
        /// Cone half-angle in radians
        angle: f32,
        penumbra: f32,
        cast_shadow: bool,
    },
    Directional {
        color: u32,
        intensity: f32,
        position: Vec3,
        cast_shadow: bool,
    },
}

impl Light {
    fn spot(intensity: f32, position: Vec3) -> Self {
        Light::Spot {
            color: 0xffffff,
            intensity,
            position,
            target: Vec3::ZERO,
            angle: PI / 3.0,
            penumbra: 0.2,
            cast_shadow: true,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        match self {
            Light::Ambient { .. } => false,
            Light::Spot { cast_shadow, .. } | Light::Directional { cast_shadow, .. } => {
                *cast_shadow
            }
        }
    }
}

/// Where a model sits in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Rotation about the vertical axis, radians
    pub rotation_y: f32,
}

impl Placement {
    pub const fn new(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale,
            rotation_y: 0.0,
        }
    }

    pub const fn rotated(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_rotation_y(self.rotation_y),
            scale: Vec3::splat(self.scale),
        }
    }
}

/// Node transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// A loaded model placed in the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl SceneNode {
    /// A node that casts and receives shadows
    pub fn shadowed(name: &str, placement: Placement) -> Self {
        Self {
            name: name.to_string(),
            transform: placement.transform(),
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// Everything the renderer would draw
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Background,
    pub lights: Vec<Light>,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            lights: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// The arena lighting rig: soft ambient fill, three shadow-casting spots
    /// aimed at the ring centre and an overhead sun
    pub fn boxing_ring() -> Self {
        let mut scene = Self::new(Background::Color(DEFAULT_BACKGROUND));
        scene.lights = vec![
            Light::Ambient {
                color: 0xffffff,
                intensity: 0.5,
            },
            Light::spot(8.0, Vec3::new(0.0, 20.0, 0.0)),
            Light::spot(4.0, Vec3::new(10.0, 10.0, 10.0)),
            Light::spot(4.0, Vec3::new(-10.0, 10.0, -10.0)),
            Light::Directional {
                color: 0xffffff,
                intensity: 2.0,
                position: Vec3::new(0.0, 20.0, 0.0),
                cast_shadow: true,
            },
        ];
        scene
    }

    pub fn add_node(&mut self, node: SceneNode) {
        let t = &node.transform;
        debug!(
            "Placed {} at {} rotated {} scaled {} (cast shadow: {}, receive shadow: {})",
            node.name, t.translation, t.rotation, t.scale, node.cast_shadow, node.receive_shadow
        );
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Use an HDR image as background and lighting environment
    pub fn set_environment(&mut self, env: EnvironmentMap) {
        self.background = Background::Environment(env);
    }

    pub fn clear_color(&self) -> [f32; 3] {
        self.background.clear_color()
    }

    pub fn shadow_casting_lights(&self) -> usize {
        self.lights.iter().filter(|l| l.casts_shadow()).count()
    }
}

#[cfg(test)]
impl Scene {
    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Mat4;

    #[test]
    fn test_boxing_ring_lights() {
        let scene = Scene::boxing_ring();
        assert_eq!(scene.lights.len(), 5);
        assert_eq!(scene.shadow_casting_lights(), 4);
        assert_eq!(scene.background, Background::Color(DEFAULT_BACKGROUND));
        assert!(scene.nodes().is_empty());
    }

    #[test]
    fn test_environment_replaces_background() {
        let mut scene = Scene::boxing_ring();
        scene.set_environment(EnvironmentMap {
            width: 2048,
            height: 1024,
            mean_radiance: [1.0, 1.0, 1.0],
        });

        assert_eq!(scene.clear_color(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_placement_transform() {
        let placement = Placement::new(Vec3::new(30.0, -600.0, 300.0), 8.0).rotated(PI);
        let t = placement.transform();
        let m = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.translation);

        let origin = m.transform_point3(Vec3::ZERO);
        assert_relative_eq!(origin.x, 30.0);
        assert_relative_eq!(origin.y, -600.0);

        // Facing flipped: local +Z points to world -Z, scaled by 8
        let forward = m.transform_vector3(Vec3::Z);
        assert_relative_eq!(forward.z, -8.0, epsilon = 1e-4);
        assert_relative_eq!(forward.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_nodes_by_name() {
        let mut scene = Scene::boxing_ring();
        scene.add_node(SceneNode::shadowed(
            "ring",
            Placement::new(Vec3::new(0.0, -1000.0, 0.0), 30.0),
        ));

        let ring = scene.node("ring").unwrap();
        assert!(ring.cast_shadow && ring.receive_shadow);
        assert_eq!(ring.transform.scale, Vec3::splat(30.0));
        assert!(scene.node("adam").is_none());
    }
}
