// Asset path resolution and decoding

use super::{AssetError, AssetId, EnvironmentMap, ModelAsset};
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// Mesh, skeleton and animation clips (glTF / GLB)
    Model,
    /// Equirectangular HDR environment image
    Environment,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Model => "models",
            AssetType::Environment => "hdr",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Model => &["glb", "gltf"],
            AssetType::Environment => &["hdr"],
        }
    }

    /// Check whether a file name carries one of this type's extensions
    pub fn accepts(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

/// A decoded asset
#[derive(Debug)]
pub enum LoadedAsset {
    Model(ModelAsset),
    Environment(EnvironmentMap),
}

/// Asset loader responsible for finding and decoding asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Identifier of an asset, stable across runs for the same type and name
    pub fn asset_id(&self, asset_type: AssetType, name: &str) -> AssetId {
        AssetId::from_path(&format!("{}/{}", asset_type.default_directory(), name))
    }

    /// Load and decode an asset (blocking)
    pub fn load(&self, asset_type: AssetType, name: &str) -> Result<LoadedAsset, AssetError> {
        if !asset_type.accepts(name) {
            return Err(AssetError::UnsupportedExtension {
                asset_type,
                name: name.to_string(),
            });
        }

        let path = self.resolve_path(asset_type, name);
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        match asset_type {
            AssetType::Model => ModelAsset::from_path(&path).map(LoadedAsset::Model),
            AssetType::Environment => {
                EnvironmentMap::from_path(&path).map(LoadedAsset::Environment)
            }
        }
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
