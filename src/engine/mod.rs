// Engine modules: animation, assets, timing, input, renderer

pub mod animation;
pub mod assets;
pub mod frame_clock;
pub mod input;
pub mod renderer;
pub mod timer;
