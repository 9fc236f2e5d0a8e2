mod edit;
mod session;

pub use edit::{MaskEditor, MaskOp, SelectionMode};
pub use session::MaskSession;

use crate::error::MaskError;

/// Per-vertex boolean mask.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexMask(Vec<bool>);

impl VertexMask {
    /// A mask of `len` unselected vertices.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// A mask of `len` selected vertices.
    #[must_use]
    pub fn full(len: usize) -> Self {
        Self(vec![true; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flag of vertex `i`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<bool> {
        self.0.get(i).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of selected vertices.
    #[must_use]
    pub fn count_selected(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// A copy with every flag flipped.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self(self.0.iter().map(|&b| !b).collect())
    }

    /// Mask value of vertex `i` as coverage (`1.0` selected, `0.0` not).
    pub(crate) fn coverage(&self, i: usize) -> f64 {
        if self.0[i] {
            1.0
        } else {
            0.0
        }
    }

    /// Checks that the mask has `expected` flags.
    pub(crate) fn check_len(&self, expected: usize) -> Result<(), MaskError> {
        if self.0.len() == expected {
            Ok(())
        } else {
            Err(MaskError::LengthMismatch {
                expected,
                actual: self.0.len(),
            })
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.0
    }
}

impl From<Vec<bool>> for VertexMask {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

impl From<VertexMask> for Vec<bool> {
    fn from(mask: VertexMask) -> Self {
        mask.0
    }
}
