// HDR environment map

use super::AssetError;
use image::DynamicImage;
use std::path::Path;

/// Equirectangular environment image, reduced to what the renderer uses
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// Average radiance over all texels (linear RGB, unbounded)
    pub mean_radiance: [f32; 3],
}

impl EnvironmentMap {
    /// Decode a Radiance HDR file
    pub fn from_path(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path)?;
        Ok(Self::from_image(&img))
    }

    /// Build from any decoded image
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb32f();
        let texels = (rgb.width() as f64 * rgb.height() as f64).max(1.0);

        let mut sum = [0.0_f64; 3];
        for pixel in rgb.pixels() {
            for (acc, channel) in sum.iter_mut().zip(pixel.0) {
                *acc += channel as f64;
            }
        }

        Self {
            width: rgb.width(),
            height: rgb.height(),
            mean_radiance: sum.map(|c| (c / texels) as f32),
        }
    }

    /// Mean radiance tone-mapped into [0, 1] (Reinhard)
    pub fn tone_mapped_mean(&self) -> [f32; 3] {
        self.mean_radiance.map(|c| {
            let c = c.max(0.0);
            c / (1.0 + c)
        })
    }
}
