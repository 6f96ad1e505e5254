// Game layer: the boxing ring, its fighters and their controls

pub mod arena;
pub mod characters;
pub mod controls;
pub mod scene;
