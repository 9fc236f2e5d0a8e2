mod coverage;
mod dilate;
mod rasterize;

pub use coverage::CoverageGrid;
pub use dilate::{Connectivity, Dilate};
pub use rasterize::{RasterizeMask, RasterizedMask};

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{BakeError, Result};
use crate::mask::VertexMask;
use crate::mesh::MeshTopology;

/// Texture sizes offered by the mask editor.
pub const RESOLUTION_PRESETS: [u32; 5] = [256, 512, 1024, 2048, 4096];

/// Largest padding offered by the mask editor.
pub const MAX_PADDING: usize = 16;

/// Parameters controlling a mask bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeParams {
    /// Texture width and height in texels.
    pub resolution: u32,
    /// Dilation iterations applied after rasterization.
    pub padding: usize,
    /// Neighbourhood used for padding.
    pub connectivity: Connectivity,
}

impl Default for BakeParams {
    fn default() -> Self {
        Self {
            resolution: 512,
            padding: 2,
            connectivity: Connectivity::Eight,
        }
    }
}

impl BakeParams {
    #[must_use]
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Whether the resolution is one of [`RESOLUTION_PRESETS`].
    #[must_use]
    pub fn is_preset_resolution(&self) -> bool {
        RESOLUTION_PRESETS.contains(&self.resolution)
    }
}

/// Bakes a vertex mask into a padded UV-space texture.
pub struct BakeTexture {
    params: BakeParams,
}

impl BakeTexture {
    /// Creates a new `BakeTexture` operation.
    #[must_use]
    pub fn new(params: BakeParams) -> Self {
        Self { params }
    }

    /// Executes the bake: rasterize, then pad.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is zero or `mask` does not have
    /// one flag per vertex.
    pub fn execute(&self, topology: &MeshTopology, mask: &VertexMask) -> Result<MaskTexture> {
        let raw = RasterizeMask::new(self.params.resolution).execute(topology, mask)?;
        let padded = Dilate::new(self.params.padding)
            .with_connectivity(self.params.connectivity)
            .execute(&raw.grid);
        let texture = MaskTexture::from_grid(&padded);
        debug!(
            resolution = self.params.resolution,
            padding = self.params.padding,
            selected_vertices = mask.count_selected(),
            "baked mask texture"
        );
        Ok(texture)
    }
}

/// An 8-bit baked mask, ready for encoding.
///
/// Stored like [`CoverageGrid`], with row 0 along `v = 0`. The image
/// conversions emit rows top-down, so the first image row is `v ≈ 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskTexture {
    resolution: u32,
    texels: Vec<u8>,
}

impl MaskTexture {
    /// Quantizes a coverage grid to 8 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_grid(grid: &CoverageGrid) -> Self {
        Self {
            resolution: grid.resolution(),
            texels: grid
                .texels()
                .iter()
                .map(|&c| (c * 255.0).round() as u8)
                .collect(),
        }
    }

    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// 8-bit coverage of texel `(x, y)` (row 0 along `v = 0`).
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is outside the texture.
    #[must_use]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.resolution && y < self.resolution);
        self.texels[y as usize * self.resolution as usize + x as usize]
    }

    /// Single-channel image, mask in luma.
    #[must_use]
    pub fn to_luma8(&self) -> GrayImage {
        GrayImage::from_fn(self.resolution, self.resolution, |x, y| {
            Luma([self.coverage(x, self.resolution - 1 - y)])
        })
    }

    /// Opaque RGBA image with the mask in the red channel.
    #[must_use]
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.resolution, self.resolution, |x, y| {
            Rgba([self.coverage(x, self.resolution - 1 - y), 0, 0, 255])
        })
    }

    /// Encodes [`to_rgba8`](Self::to_rgba8) as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BakeError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_rgba8()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| BakeError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
