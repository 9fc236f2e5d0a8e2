use crate::bake::{BakeParams, BakeTexture, MaskTexture};
use crate::error::Result;
use crate::math::Matrix4;
use crate::mesh::{segment_islands, IslandAssignment, MeshTopology, SourceMesh};
use crate::query::{Ray, Raycast, RaycastHit};

use super::{MaskEditor, MaskOp, SelectionMode, VertexMask};

/// One mask-painting session over a single mesh.
///
/// Owns the topology, its island assignment and the committed mask. Every
/// mutating method takes an `on_change` callback that is invoked with the
/// new mask after a successful commit, and not at all on failure.
#[derive(Debug, Clone)]
pub struct MaskSession {
    topology: MeshTopology,
    islands: IslandAssignment,
    mask: VertexMask,
}

impl MaskSession {
    /// Starts a session with an empty mask.
    #[must_use]
    pub fn new(topology: MeshTopology) -> Self {
        let islands = segment_islands(&topology);
        let mask = VertexMask::new(topology.vertex_count());
        Self {
            topology,
            islands,
            mask,
        }
    }

    /// Loads `source` and starts a session over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is invalid.
    pub fn load(source: SourceMesh) -> Result<Self> {
        Ok(Self::new(MeshTopology::load(source)?))
    }

    #[must_use]
    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }

    #[must_use]
    pub fn islands(&self) -> &IslandAssignment {
        &self.islands
    }

    /// The committed mask.
    #[must_use]
    pub fn mask(&self) -> &VertexMask {
        &self.mask
    }

    /// Editor bound to this session's mesh.
    #[must_use]
    pub fn editor(&self) -> MaskEditor<'_> {
        MaskEditor::new(&self.topology, &self.islands)
    }

    /// Replaces the whole mask.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::LengthMismatch`](crate::error::MaskError::LengthMismatch)
    /// if `mask` does not have one flag per vertex; the session is unchanged.
    pub fn set_mask(
        &mut self,
        mask: VertexMask,
        mut on_change: impl FnMut(&VertexMask),
    ) -> Result<()> {
        mask.check_len(self.topology.vertex_count())?;
        self.mask = mask;
        on_change(&self.mask);
        Ok(())
    }

    /// Applies `op` to the committed mask.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit is rejected; the session is unchanged.
    pub fn apply(&mut self, op: MaskOp, on_change: impl FnMut(&VertexMask)) -> Result<()> {
        let next = self.editor().apply(&self.mask, op)?;
        self.set_mask(next, on_change)
    }

    /// Unselects every vertex.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn clear(&mut self, on_change: impl FnMut(&VertexMask)) -> Result<()> {
        self.apply(MaskOp::Clear, on_change)
    }

    /// Selects every vertex.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn select_all(&mut self, on_change: impl FnMut(&VertexMask)) -> Result<()> {
        self.apply(MaskOp::SelectAll, on_change)
    }

    /// Flips every flag.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn invert(&mut self, on_change: impl FnMut(&VertexMask)) -> Result<()> {
        self.apply(MaskOp::Invert, on_change)
    }

    /// Casts `ray` at the mesh placed by `transform`.
    #[must_use]
    pub fn pick(&self, ray: Ray, transform: Matrix4) -> Option<RaycastHit> {
        Raycast::new(ray)
            .with_transform(transform)
            .execute(&self.topology)
    }

    /// Picks a triangle and applies `mode` to its whole island.
    ///
    /// Returns the edited island, or `None` (mask untouched, no callback)
    /// when the ray misses.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit is rejected; the session is unchanged.
    pub fn select_at(
        &mut self,
        ray: Ray,
        transform: Matrix4,
        mode: SelectionMode,
        on_change: impl FnMut(&VertexMask),
    ) -> Result<Option<usize>> {
        let Some(island) = self
            .pick(ray, transform)
            .and_then(|hit| self.islands.island_of(hit.triangle))
        else {
            return Ok(None);
        };
        self.apply(MaskOp::Island { island, mode }, on_change)?;
        Ok(Some(island))
    }

    /// Bakes the committed mask.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is zero.
    pub fn bake(&self, params: &BakeParams) -> Result<MaskTexture> {
        BakeTexture::new(*params).execute(&self.topology, &self.mask)
    }
}
