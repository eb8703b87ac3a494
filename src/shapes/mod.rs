pub mod ellipse;
pub mod polygon;
pub mod raster;
pub mod round_rect;
pub mod text;

pub use ellipse::{Ellipse, PieSlice};
pub use polygon::{Dot, Polygon, Rectangle, Star};
pub use raster::{Raster, Stencil};
pub use round_rect::RoundRect;
pub use text::Text;
