// The two fighters in the ring and where their animations come from

use glam::Vec3;
use std::f32::consts::PI;
use winit::keyboard::KeyCode;

use crate::game::scene::Placement;

/// A one-shot move: the clip to use and the key that fires it
#[derive(Debug, Clone, Copy)]
pub struct MoveSpec {
    /// Trigger name
    pub name: &'static str,
    /// Model file holding the clip
    pub asset: &'static str,
    /// Index of the clip within that file
    pub clip_index: usize,
    pub key: KeyCode,
}

/// Static description of an animated fighter
#[derive(Debug, Clone, Copy)]
pub struct FighterSpec {
    pub name: &'static str,
    /// Rigged model whose clips include the idle loop
    pub model: &'static str,
    pub idle_clip_index: usize,
    pub placement: Placement,
    pub moves: &'static [MoveSpec],
}

impl FighterSpec {
    pub fn move_names(&self) -> Vec<&'static str> {
        self.moves.iter().map(|m| m.name).collect()
    }
}

pub const ADAM: FighterSpec = FighterSpec {
    name: "Adam",
    model: "adam_idle.glb",
    // The first clip in this export is a T-pose
    idle_clip_index: 1,
    placement: Placement::new(Vec3::new(-30.0, -600.0, -380.0), 8.0),
    moves: &[MoveSpec {
        name: "combo",
        asset: "adam_combo.glb",
        clip_index: 0,
        key: KeyCode::KeyP,
    }],
};

pub const JAMES: FighterSpec = FighterSpec {
    name: "James",
    model: "james_idle.glb",
    idle_clip_index: 0,
    // Faces Adam across the ring
    placement: Placement::new(Vec3::new(30.0, -600.0, 300.0), 8.0).rotated(PI),
    moves: &[
        MoveSpec {
            name: "uppercut",
            asset: "james_uppercut.glb",
            clip_index: 0,
            key: KeyCode::KeyU,
        },
        MoveSpec {
            name: "dying",
            asset: "james_zombie_death.glb",
            clip_index: 0,
            key: KeyCode::KeyD,
        },
    ],
};

pub const FIGHTERS: &[FighterSpec] = &[ADAM, JAMES];
