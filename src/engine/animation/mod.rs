// Skeletal animation playback
//
// Clips come from loaded models; the mixer only tracks playback time and
// blend weights. Posing the skeleton is the renderer's concern.

mod clip;
mod mixer;

pub use clip::AnimationClip;
pub use mixer::{ActionHandle, AnimationMixer, LoopMode};
