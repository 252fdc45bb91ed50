pub mod builder;
pub mod engine;
pub mod state;

pub use engine::{compute_projection, ProjectionEngine};
