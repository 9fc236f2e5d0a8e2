use tracing::debug;

use crate::error::{MaskError, Result};

use super::MeshTopology;

/// Per-triangle island labels for a [`MeshTopology`].
///
/// Island ids are dense in `[0, island_count)` and numbered in order of
/// first appearance while scanning triangles, so re-segmenting an unchanged
/// mesh yields identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IslandAssignment {
    island_ids: Vec<usize>,
    island_count: usize,
}

impl IslandAssignment {
    /// Island id of every triangle, indexed by triangle.
    #[must_use]
    pub fn island_ids(&self) -> &[usize] {
        &self.island_ids
    }

    #[must_use]
    pub fn island_count(&self) -> usize {
        self.island_count
    }

    /// Number of triangles covered by this assignment.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.island_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.island_ids.is_empty()
    }

    /// Island containing triangle `t`, or `None` if `t` is out of range.
    #[must_use]
    pub fn island_of(&self, t: usize) -> Option<usize> {
        self.island_ids.get(t).copied()
    }

    /// Triangles belonging to `island`, in ascending order.
    pub fn triangles_in(&self, island: usize) -> impl Iterator<Item = usize> + '_ {
        self.island_ids
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| id == island)
            .map(|(t, _)| t)
    }

    /// Sorted, deduplicated vertex indices referenced by `island`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::InvalidIsland`] if `island >= island_count()`.
    pub fn vertices_in(&self, topology: &MeshTopology, island: usize) -> Result<Vec<usize>> {
        self.check_island(island)?;
        let mut vertices: Vec<usize> = self
            .triangles_in(island)
            .flat_map(|t| topology.triangle(t))
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        Ok(vertices)
    }

    pub(crate) fn check_island(&self, island: usize) -> std::result::Result<(), MaskError> {
        if island < self.island_count {
            Ok(())
        } else {
            Err(MaskError::InvalidIsland {
                island,
                island_count: self.island_count,
            })
        }
    }
}

/// Partitions the triangles of `topology` into islands.
///
/// Two triangles belong to the same island when they are connected through
/// a chain of shared vertex indices. Sharing a single corner is enough, so
/// a "bowtie" (two triangles meeting at one vertex) is one island.
#[must_use]
pub fn segment_islands(topology: &MeshTopology) -> IslandAssignment {
    let assignment = segment_indices(topology.indices(), topology.vertex_count());
    debug!(
        triangles = assignment.triangle_count(),
        islands = assignment.island_count(),
        "segmented mesh islands"
    );
    assignment
}

/// Island segmentation over a raw, already validated index buffer.
fn segment_indices(indices: &[u32], vertex_count: usize) -> IslandAssignment {
    let triangle_count = indices.len() / 3;
    if triangle_count == 0 {
        return IslandAssignment::default();
    }

    // vertex -> triangles referencing it, in scan order
    let mut vertex_triangles: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for (t, tri) in indices.chunks_exact(3).enumerate() {
        for &v in tri {
            vertex_triangles[v as usize].push(t);
        }
    }

    let mut sets = DisjointSets::new(triangle_count);
    for triangles in &vertex_triangles {
        // chaining neighbours connects the whole list transitively
        for pair in triangles.windows(2) {
            sets.union(pair[0], pair[1]);
        }
    }

    let mut root_to_island = vec![usize::MAX; triangle_count];
    let mut island_ids = Vec::with_capacity(triangle_count);
    let mut island_count = 0;
    for t in 0..triangle_count {
        let root = sets.find(t);
        if root_to_island[root] == usize::MAX {
            root_to_island[root] = island_count;
            island_count += 1;
        }
        island_ids.push(root_to_island[root]);
    }

    IslandAssignment {
        island_ids,
        island_count,
    }
}

/// Disjoint-set forest over `0..n`, union by size with path compression.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        // ties attach y under x
        if self.size[root_x] < self.size[root_y] {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        } else {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        }
    }
}
