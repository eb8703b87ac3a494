//! Container shapes. Each one derives its bounding box and child offsets
//! from the children's own boxes on every call; nothing is cached.

pub mod fit;
pub mod flex;
pub mod grid;
pub mod padding;

pub use fit::{BoxSpec, FitBox};
pub use flex::{Flex, Row, Spacing};
pub use grid::{Cell, Grid};
pub use padding::{Insets, Padding};
