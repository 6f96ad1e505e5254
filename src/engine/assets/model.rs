// glTF / GLB model decoding
//
// Only what the scene needs is extracted: animation clips and a summary of
// the mesh hierarchy. Geometry stays inside the file.

use super::AssetError;
use crate::engine::animation::AnimationClip;
use std::path::Path;

/// Summary of a loaded model
#[derive(Debug, Clone, Default)]
pub struct ModelAsset {
    /// Animation clips in file order
    pub clips: Vec<AnimationClip>,
    /// Number of meshes in the document
    pub mesh_count: usize,
    /// Number of nodes in the document
    pub node_count: usize,
}

impl ModelAsset {
    /// Decode a model from disk; external buffers are resolved next to the file
    pub fn from_path(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes, path.parent())
    }

    /// Decode an in-memory glTF or GLB; `base` is where external buffers live
    pub fn from_slice(bytes: &[u8], base: Option<&Path>) -> Result<Self, AssetError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, base, blob)?;
        Ok(Self::from_document(&document, &buffers))
    }

    fn from_document(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Self {
        let clips = document
            .animations()
            .map(|animation| {
                let duration = animation_duration(&animation, buffers);
                match animation.name() {
                    Some(name) => AnimationClip::new(name, duration),
                    None => AnimationClip::unnamed(duration),
                }
            })
            .collect();

        Self {
            clips,
            mesh_count: document.meshes().len(),
            node_count: document.nodes().len(),
        }
    }

    /// Clip at `index`, if the file has that many animations
    pub fn clip(&self, index: usize) -> Option<&AnimationClip> {
        self.clips.get(index)
    }
}

/// Length of an animation: the latest keyframe time over all channels
fn animation_duration(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> f32 {
    animation
        .channels()
        .filter_map(|channel| {
            channel
                .reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]))
                .read_inputs()
                .map(|inputs| inputs.fold(0.0_f32, f32::max))
        })
        .fold(0.0, f32::max)
}
