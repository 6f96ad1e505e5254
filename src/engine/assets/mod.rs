// Asset loading system
//
// Models and the environment map are decoded on background threads and
// handed back to the frame loop as `LoadEvent`s.

mod environment;
mod handle;
mod loader;
mod model;
mod worker;

pub use environment::EnvironmentMap;
pub use handle::AssetId;
pub use loader::{AssetLoader, AssetType, LoadedAsset};
pub use model::ModelAsset;
pub use worker::{AsyncLoader, LoadEvent};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type for {asset_type:?} asset: {name}")]
    UnsupportedExtension { asset_type: AssetType, name: String },

    #[error("Failed to decode model: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not start loader thread: {0}")]
    WorkerSpawn(std::io::Error),
}
