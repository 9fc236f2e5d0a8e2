mod islands;

pub use islands::{segment_islands, IslandAssignment};

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::math::{Point2, Point3, Vector3};

/// A snapshot of a source triangle mesh, as handed over by the host editor.
///
/// Attributes are per vertex. `normals` and `uvs` may be left empty, in
/// which case [`MeshTopology::load`] fills in defaults.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Vertex positions (object space).
    pub positions: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Flattened triangle indices (each triple defines a triangle).
    pub indices: Vec<u32>,
}

/// Immutable, validated view of a triangle mesh.
///
/// Every index is guaranteed to be in `[0, vertex_count)` and every
/// attribute has exactly `vertex_count` entries.
#[derive(Debug, Clone)]
pub struct MeshTopology {
    positions: Vec<Point3>,
    normals: Vec<Vector3>,
    uvs: Vec<Point2>,
    indices: Vec<u32>,
}

impl MeshTopology {
    /// Validates a source mesh and builds its topology view.
    ///
    /// Missing normals default to +Y and missing UVs default to `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] if the mesh is empty, the index buffer is not
    /// a whole number of triangles, an index is out of range, an attribute
    /// has the wrong length, or a position, normal or UV is not finite.
    pub fn load(source: SourceMesh) -> Result<Self> {
        let SourceMesh {
            positions,
            normals,
            uvs,
            indices,
        } = source;

        let vertex_count = positions.len();
        if vertex_count == 0 || indices.is_empty() {
            return Err(MeshError::Empty.into());
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles { len: indices.len() }.into());
        }

        let normals = fill_attribute("normals", normals, vertex_count, Vector3::y())?;
        let uvs = fill_attribute("uvs", uvs, vertex_count, Point2::origin())?;

        if let Some(vertex) = positions.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(MeshError::NonFinite {
                attribute: "position",
                vertex,
            }
            .into());
        }
        if let Some(vertex) = normals.iter().position(|n| !n.iter().all(|c| c.is_finite())) {
            return Err(MeshError::NonFinite {
                attribute: "normal",
                vertex,
            }
            .into());
        }
        if let Some(vertex) = uvs.iter().position(|uv| !(uv.x.is_finite() && uv.y.is_finite())) {
            return Err(MeshError::NonFinite {
                attribute: "uv",
                vertex,
            }
            .into());
        }

        for (i, &index) in indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    triangle: i / 3,
                    index,
                    vertex_count,
                }
                .into());
            }
        }

        debug!(
            vertices = vertex_count,
            triangles = indices.len() / 3,
            "loaded mesh topology"
        );

        Ok(Self {
            positions,
            normals,
            uvs,
            indices,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    #[must_use]
    pub fn uvs(&self) -> &[Point2] {
        &self.uvs
    }

    /// Flattened index buffer; triangle `t` occupies `[3t, 3t + 3)`.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex indices of triangle `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= triangle_count()`.
    #[must_use]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        let base = t * 3;
        [
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        ]
    }

    /// Iterates over all triangles in index-buffer order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
    }
}

/// Returns `values`, or `vertex_count` copies of `default` when empty.
fn fill_attribute<T: Clone>(
    attribute: &'static str,
    values: Vec<T>,
    vertex_count: usize,
    default: T,
) -> Result<Vec<T>> {
    if values.is_empty() {
        return Ok(vec![default; vertex_count]);
    }
    if values.len() != vertex_count {
        return Err(MeshError::AttributeLength {
            attribute,
            expected: vertex_count,
            actual: values.len(),
        }
        .into());
    }
    Ok(values)
}
