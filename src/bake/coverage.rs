use crate::error::{BakeError, Result};

/// Square grid of mask coverage values in `[0, 1]`, one per texel.
///
/// Texel `(x, y)` samples UV `((x + 0.5) / res, (y + 0.5) / res)`, so row 0
/// lies along `v = 0`. `0.0` is background.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageGrid {
    resolution: u32,
    texels: Vec<f32>,
}

impl CoverageGrid {
    /// An all-background grid of `resolution × resolution` texels.
    ///
    /// # Errors
    ///
    /// Returns [`BakeError::InvalidResolution`] if `resolution` is zero, or
    /// [`BakeError::TooLarge`] if the texels cannot be allocated.
    pub fn new(resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(BakeError::InvalidResolution(resolution).into());
        }
        let side = resolution as usize;
        let too_large = || BakeError::TooLarge { resolution };
        let len = side.checked_mul(side).ok_or_else(too_large)?;
        let mut texels = Vec::new();
        texels.try_reserve_exact(len).map_err(|_| too_large())?;
        texels.resize(len, 0.0);
        Ok(Self { resolution, texels })
    }

    /// Builds a grid from row-major texels; values are clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`BakeError::InvalidResolution`] for a zero resolution, or
    /// [`BakeError::GridSize`] if `texels` is not `resolution²` long.
    pub fn from_texels(resolution: u32, texels: Vec<f32>) -> Result<Self> {
        let mut grid = Self::new(resolution)?;
        if texels.len() != grid.texels.len() {
            return Err(BakeError::GridSize {
                resolution,
                expected: grid.texels.len(),
                actual: texels.len(),
            }
            .into());
        }
        grid.texels = texels.into_iter().map(clamp_unit).collect();
        Ok(grid)
    }

    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Coverage at texel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.texels[self.index(x, y)]
    }

    /// Sets texel `(x, y)`, clamping `value` to `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index(x, y);
        self.texels[i] = clamp_unit(value);
    }

    /// Row-major texels, row 0 first.
    #[must_use]
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    /// Number of texels with non-zero coverage.
    #[must_use]
    pub fn covered_texels(&self) -> usize {
        self.texels.iter().filter(|&&c| c > 0.0).count()
    }

    pub(crate) fn texels_mut(&mut self) -> &mut [f32] {
        &mut self.texels
    }

    fn index(&self, x: usize, y: usize) -> usize {
        let side = self.resolution as usize;
        assert!(x < side && y < side, "texel ({x}, {y}) outside {side}x{side} grid");
        y * side + x
    }
}

/// Clamps to `[0, 1]`, mapping NaN to background.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::IslandMaskError;

    #[test]
    fn new_grid_is_background() {
        let grid = CoverageGrid::new(4).unwrap();
        assert_eq!(grid.texels().len(), 16);
        assert_eq!(grid.covered_texels(), 0);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert!(matches!(
            CoverageGrid::new(0),
            Err(IslandMaskError::Bake(BakeError::InvalidResolution(0)))
        ));
    }

    #[test]
    fn unallocatable_resolution_is_an_error() {
        assert_eq!(
            CoverageGrid::new(3_000_000_000).unwrap_err(),
            IslandMaskError::Bake(BakeError::TooLarge {
                resolution: 3_000_000_000
            })
        );
    }

    #[test]
    fn values_are_clamped() {
        let mut grid = CoverageGrid::new(2).unwrap();
        grid.set(0, 0, 1.5);
        grid.set(1, 0, -0.5);
        grid.set(0, 1, f32::NAN);
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(1, 0), 0.0);
        assert_eq!(grid.get(0, 1), 0.0);

        let grid = CoverageGrid::from_texels(1, vec![3.0]).unwrap();
        assert_eq!(grid.get(0, 0), 1.0);
    }

    #[test]
    fn from_texels_checks_length() {
        assert!(matches!(
            CoverageGrid::from_texels(2, vec![0.0; 3]),
            Err(IslandMaskError::Bake(BakeError::GridSize {
                expected: 4,
                actual: 3,
                ..
            }))
        ));
    }

    #[test]
    fn rows_are_row_major() {
        let grid = CoverageGrid::from_texels(2, vec![0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(grid.get(1, 0), 0.25);
        assert_eq!(grid.get(0, 1), 0.5);
    }
}
