mod raycast;

pub use raycast::{Ray, Raycast, RaycastHit};
