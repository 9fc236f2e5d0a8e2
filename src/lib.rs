pub mod bake;
pub mod error;
pub mod mask;
pub mod math;
pub mod mesh;
pub mod query;

pub use error::{IslandMaskError, Result};
