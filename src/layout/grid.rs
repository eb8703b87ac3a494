use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::layout::fit::FitBox;
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};

/// One occupied grid slot: a shape plus its span in grid units.
#[derive(Clone, Debug)]
pub struct Cell {
    shape: ShapeRef,
    width: u32,
    height: u32,
}

impl Cell {
    pub fn new(shape: ShapeRef) -> Self {
        Self::span(shape, 1, 1)
    }

    pub fn span(shape: ShapeRef, width: u32, height: u32) -> Self {
        Self {
            shape,
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl From<ShapeRef> for Cell {
    fn from(shape: ShapeRef) -> Self {
        Self::new(shape)
    }
}

/// A fixed pixel area divided into `cols x rows` equal cells, with shapes
/// placed sparsely by integer cell coordinate.
///
/// Coordinates beyond the dimensions are tolerated and skipped at render
/// time. Each occupied cell aspect-fits its shape into the cell rectangle,
/// centered, spanning multiple cells when the `Cell` says so.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: BTreeMap<(u32, u32), Cell>,
    size: Size,
    cols: u32,
    rows: u32,
}

impl Grid {
    pub fn new(size: impl Into<Size>, dimensions: (u32, u32)) -> Self {
        Self {
            cells: BTreeMap::new(),
            size: size.into(),
            cols: dimensions.0.max(1),
            rows: dimensions.1.max(1),
        }
    }

    /// Place a cell at `(x, y)`. Re-placing at an occupied coordinate
    /// replaces the previous occupant.
    pub fn set(&mut self, coord: (u32, u32), cell: impl Into<Cell>) -> &mut Self {
        self.cells.insert(coord, cell.into());
        self
    }

    /// Build from a dense row-major layout: the outer sequence is rows,
    /// `None` entries are left empty. The shape at `rows[y][x]` lands at
    /// cell `(x, y)`.
    pub fn from_rows(
        rows: impl IntoIterator<Item = impl IntoIterator<Item = Option<ShapeRef>>>,
        size: impl Into<Size>,
        dimensions: (u32, u32),
    ) -> Self {
        let mut grid = Self::new(size, dimensions);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, slot) in row.into_iter().enumerate() {
                if let Some(shape) = slot {
                    grid.set((x as u32, y as u32), shape);
                }
            }
        }
        grid
    }

    pub fn cell_size(&self) -> Size {
        Size::new(
            self.size.w / f64::from(self.cols),
            self.size.h / f64::from(self.rows),
        )
    }

    /// Coordinates currently occupied and within the dimensions, in
    /// deterministic (column, row) order.
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells
            .keys()
            .copied()
            .filter(|&(x, y)| x < self.cols && y < self.rows)
    }
}

impl Shape for Grid {
    fn box_get(&self) -> Size {
        self.size
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let cell_size = self.cell_size();
        for (&(x, y), cell) in &self.cells {
            if x >= self.cols || y >= self.rows {
                tracing::trace!(x, y, cols = self.cols, rows = self.rows, "cell out of range, skipped");
                continue;
            }
            let target = Size::new(
                cell_size.w * f64::from(cell.width),
                cell_size.h * f64::from(cell.height),
            );
            let origin = Point::new(cell_size.w * f64::from(x), cell_size.h * f64::from(y));
            FitBox::new(cell.shape.clone(), target).render(surface, position + origin)?;
        }
        Ok(())
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Grid {
            size: self.size.scaled(k),
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::color::Rgba;
    use crate::shape::IntoShape;
    use crate::shapes::Rectangle;

    fn rect() -> ShapeRef {
        Rectangle::new((10.0, 10.0), Rgba::BLACK).into_shape()
    }

    #[test]
    fn dense_rows_map_to_column_row_coordinates() {
        let grid = Grid::from_rows(
            [vec![Some(rect()), None], vec![Some(rect()), Some(rect())]],
            (100.0, 100.0),
            (2, 2),
        );
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn out_of_range_cells_are_skipped_not_errors() {
        let mut grid = Grid::new((100.0, 100.0), (2, 2));
        grid.set((5, 5), rect());
        assert_eq!(grid.occupied().count(), 0);
        let mut surface = crate::render::RasterSurface::new(100, 100, Rgba::WHITE).unwrap();
        grid.render(&mut surface, Point::ZERO).unwrap();
    }

    #[test]
    fn duplicate_placement_last_write_wins() {
        let mut grid = Grid::new((100.0, 100.0), (3, 3));
        grid.set((1, 1), rect());
        grid.set((1, 1), rect());
        assert_eq!(grid.occupied().count(), 1);
    }

    #[test]
    fn cell_size_divides_the_area_evenly() {
        let grid = Grid::new((120.0, 90.0), (4, 3));
        assert_eq!(grid.cell_size(), Size::new(30.0, 30.0));
    }

    #[test]
    fn resize_scales_the_pixel_area_only() {
        let mut grid = Grid::new((100.0, 50.0), (2, 2));
        grid.set((0, 0), rect());
        assert_eq!(grid.resized(2.0).box_get(), Size::new(200.0, 100.0));
    }
}
