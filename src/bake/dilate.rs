use tracing::debug;

use super::CoverageGrid;

/// Neighbourhood used by [`Dilate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Orthogonal neighbours only.
    Four,
    /// Orthogonal and diagonal neighbours.
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Self::Eight => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
        }
    }
}

/// Grows coverage outward by one texel per iteration (grey-scale dilation).
///
/// Each round replaces every texel by the maximum of itself and its
/// neighbours, so values never decrease. Once a round changes nothing the
/// remaining rounds are skipped; a saturated grid is a valid result.
pub struct Dilate {
    iterations: usize,
    connectivity: Connectivity,
}

impl Dilate {
    /// Creates a new `Dilate` operation with 8-connected neighbours.
    #[must_use]
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            connectivity: Connectivity::default(),
        }
    }

    /// Sets the neighbourhood.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Executes the dilation, returning a new grid.
    #[must_use]
    pub fn execute(&self, grid: &CoverageGrid) -> CoverageGrid {
        let mut front = grid.clone();
        if self.iterations == 0 {
            return front;
        }

        let side = front.resolution() as usize;
        let offsets = self.connectivity.offsets();
        let mut back = front.clone();
        let mut rounds = 0;

        for _ in 0..self.iterations {
            let changed = dilate_once(front.texels(), back.texels_mut(), side, offsets);
            std::mem::swap(&mut front, &mut back);
            rounds += 1;
            if !changed {
                break;
            }
        }

        debug!(
            requested = self.iterations,
            rounds,
            connectivity = ?self.connectivity,
            "dilated coverage grid"
        );
        front
    }
}

/// One dilation round from `src` into `dst`; returns whether any texel grew.
fn dilate_once(src: &[f32], dst: &mut [f32], side: usize, offsets: &[(isize, isize)]) -> bool {
    let mut changed = false;
    for y in 0..side {
        for x in 0..side {
            let own = src[y * side + x];
            let mut best = own;
            for &(dx, dy) in offsets {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx < side && ny < side {
                    best = best.max(src[ny * side + nx]);
                }
            }
            changed |= best > own;
            dst[y * side + x] = best;
        }
    }
    changed
}
