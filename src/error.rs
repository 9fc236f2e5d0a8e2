use thiserror::Error;

/// Top-level error type for the island mask toolkit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IslandMaskError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Bake(#[from] BakeError),
}

/// Errors raised while loading a source mesh snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("invalid mesh: no vertices or no triangles")]
    Empty,

    #[error("invalid mesh: index buffer length {len} is not a multiple of 3")]
    NotTriangles { len: usize },

    #[error("invalid mesh: triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("invalid mesh: {attribute} has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid mesh: {attribute} of vertex {vertex} is not finite")]
    NonFinite {
        attribute: &'static str,
        vertex: usize,
    },
}

/// Errors related to mask edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("island {island} is out of range [0, {island_count})")]
    InvalidIsland { island: usize, island_count: usize },

    #[error("mask length must be {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors related to texture baking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BakeError {
    #[error("texture resolution must be positive, got {0}")]
    InvalidResolution(u32),

    #[error("coverage grid of resolution {resolution} needs {expected} texels, got {actual}")]
    GridSize {
        resolution: u32,
        expected: usize,
        actual: usize,
    },

    #[error("texture resolution {resolution} is too large to allocate")]
    TooLarge { resolution: u32 },

    #[error("failed to encode mask texture: {0}")]
    Encode(String),
}

/// Convenience type alias for results using [`IslandMaskError`].
pub type Result<T> = std::result::Result<T, IslandMaskError>;
