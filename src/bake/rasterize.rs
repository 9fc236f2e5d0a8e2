use tracing::debug;

use crate::error::Result;
use crate::mask::VertexMask;
use crate::math::barycentric::Triangle2;
use crate::math::Point2;
use crate::mesh::MeshTopology;

use super::CoverageGrid;

/// Barycentric slack that keeps texels on shared UV edges covered.
const EDGE_EPSILON: f64 = 1e-9;

/// Output of [`RasterizeMask`].
#[derive(Debug, Clone)]
pub struct RasterizedMask {
    /// Raw (unpadded) coverage.
    pub grid: CoverageGrid,
    /// Triangles that were drawn.
    pub drawn: usize,
    /// Triangles skipped because their UV projection has no area.
    pub skipped_degenerate: usize,
}

/// Renders a per-vertex mask into UV space.
///
/// Each triangle is drawn at its UV coordinates; covered texels receive the
/// barycentric interpolation of the triangle's vertex mask values. Where UV
/// triangles overlap, the later triangle in index order wins.
pub struct RasterizeMask {
    resolution: u32,
}

impl RasterizeMask {
    /// Creates a new `RasterizeMask` operation.
    #[must_use]
    pub fn new(resolution: u32) -> Self {
        Self { resolution }
    }

    /// Executes the rasterization.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is zero or `mask` does not have
    /// one flag per vertex.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn execute(&self, topology: &MeshTopology, mask: &VertexMask) -> Result<RasterizedMask> {
        mask.check_len(topology.vertex_count())?;
        let mut grid = CoverageGrid::new(self.resolution)?;

        let res = f64::from(self.resolution);
        let last = res - 1.0;
        let side = self.resolution as usize;
        let uvs = topology.uvs();

        let mut drawn = 0;
        let mut skipped_degenerate = 0;

        for [a, b, c] in topology.triangles() {
            let to_grid = |i: usize| Point2::new(uvs[i].x * res, uvs[i].y * res);
            let Some(tri) = Triangle2::new(to_grid(a), to_grid(b), to_grid(c)) else {
                skipped_degenerate += 1;
                continue;
            };
            drawn += 1;

            // texel centres inside the bounding box
            let (min, max) = tri.bounds();
            let x_lo = (min.x - 0.5).ceil().max(0.0);
            let x_hi = (max.x - 0.5).floor().min(last);
            let y_lo = (min.y - 0.5).ceil().max(0.0);
            let y_hi = (max.y - 0.5).floor().min(last);
            if x_lo > x_hi || y_lo > y_hi {
                continue;
            }

            let values = [mask.coverage(a), mask.coverage(b), mask.coverage(c)];
            let texels = grid.texels_mut();
            for y in y_lo as usize..=y_hi as usize {
                for x in x_lo as usize..=x_hi as usize {
                    let centre = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                    let w = tri.weights(&centre);
                    if w.iter().any(|&wi| wi < -EDGE_EPSILON) {
                        continue;
                    }
                    let value = w[0] * values[0] + w[1] * values[1] + w[2] * values[2];
                    texels[y * side + x] = value.clamp(0.0, 1.0) as f32;
                }
            }
        }

        if skipped_degenerate > 0 {
            debug!(skipped_degenerate, "skipped zero-area UV triangles");
        }
        debug!(
            resolution = self.resolution,
            drawn,
            covered = grid.covered_texels(),
            "rasterized vertex mask"
        );

        Ok(RasterizedMask {
            grid,
            drawn,
            skipped_degenerate,
        })
    }
}
