pub mod color;
pub mod error;
pub mod geometry;
pub(crate) mod math;
