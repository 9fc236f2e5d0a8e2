use tracing::trace;

use crate::error::{MaskError, Result};
use crate::mesh::{IslandAssignment, MeshTopology};

use super::VertexMask;

/// How an island edit changes the flags of the island's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Force the flags to `true`.
    #[default]
    Add,
    /// Force the flags to `false`.
    Remove,
}

/// A single mask edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskOp {
    /// Add or remove every vertex of one island.
    Island { island: usize, mode: SelectionMode },
    /// Unselect every vertex.
    Clear,
    /// Select every vertex.
    SelectAll,
    /// Flip every flag.
    Invert,
}

/// Pure mask edits against one mesh and its island assignment.
///
/// Every edit takes the current mask and returns a new one; the input is
/// never modified, so a rejected edit leaves the caller's state intact.
#[derive(Debug, Clone, Copy)]
pub struct MaskEditor<'a> {
    topology: &'a MeshTopology,
    islands: &'a IslandAssignment,
}

impl<'a> MaskEditor<'a> {
    /// Creates an editor for `topology` segmented into `islands`.
    #[must_use]
    pub fn new(topology: &'a MeshTopology, islands: &'a IslandAssignment) -> Self {
        Self { topology, islands }
    }

    /// Applies `op` to `mask`, returning the edited mask.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] if `mask` does not have one flag
    /// per vertex, or [`MaskError::InvalidIsland`] for an unknown island.
    pub fn apply(&self, mask: &VertexMask, op: MaskOp) -> Result<VertexMask> {
        match op {
            MaskOp::Island { island, mode } => self.set_island(mask, island, mode),
            MaskOp::Clear => self.clear(mask),
            MaskOp::SelectAll => self.select_all(mask),
            MaskOp::Invert => self.invert(mask),
        }
    }

    /// Sets the flag of every vertex of every triangle in `island`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] or [`MaskError::InvalidIsland`].
    pub fn set_island(
        &self,
        mask: &VertexMask,
        island: usize,
        mode: SelectionMode,
    ) -> Result<VertexMask> {
        self.check_len(mask)?;
        self.islands.check_island(island)?;

        let value = mode == SelectionMode::Add;
        let mut next = mask.clone();
        let flags = next.as_mut_slice();
        for t in self.islands.triangles_in(island) {
            for v in self.topology.triangle(t) {
                flags[v] = value;
            }
        }

        trace!(
            island,
            ?mode,
            changed = mask.iter().zip(next.iter()).filter(|(a, b)| a != b).count(),
            "island edit"
        );
        Ok(next)
    }

    /// Returns a mask with every flag cleared.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] if `mask` has the wrong length.
    pub fn clear(&self, mask: &VertexMask) -> Result<VertexMask> {
        self.check_len(mask)?;
        Ok(VertexMask::new(mask.len()))
    }

    /// Returns a mask with every flag set.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] if `mask` has the wrong length.
    pub fn select_all(&self, mask: &VertexMask) -> Result<VertexMask> {
        self.check_len(mask)?;
        Ok(VertexMask::full(mask.len()))
    }

    /// Returns `mask` with every flag flipped.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] if `mask` has the wrong length.
    pub fn invert(&self, mask: &VertexMask) -> Result<VertexMask> {
        self.check_len(mask)?;
        Ok(mask.inverted())
    }

    /// Checks that `mask` has one flag per vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`] otherwise.
    pub fn check_len(&self, mask: &VertexMask) -> std::result::Result<(), MaskError> {
        mask.check_len(self.topology.vertex_count())
    }
}
