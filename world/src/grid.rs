//! Static grid of clickable cells covering the playfield below the control bar.

use lane_defence_core::{CellCoord, Rect, Rules};

/// Single grid-aligned cell. Cells are created once and never change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    coord: CellCoord,
    rect: Rect,
}

impl Cell {
    /// Grid coordinate of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Area covered by the cell.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

/// Ordered, immutable collection of playfield cells.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    /// Lays out the cells row-major, starting one cell below the top edge.
    ///
    /// Rows run up to and including the bottom edge of the field, so the last
    /// row sits just below the visible surface.
    pub(crate) fn new(rules: &Rules) -> Self {
        let cell_size = rules.cell_size;
        if cell_size <= 0.0 {
            return Self { cells: Vec::new() };
        }

        let columns = rules.columns();
        let mut cells = Vec::new();
        let mut row = 1;
        while row as f32 * cell_size <= rules.field_height {
            for column in 0..columns {
                let coord = CellCoord::new(column, row);
                cells.push(Cell {
                    coord,
                    rect: coord.rect(cell_size),
                });
            }
            row += 1;
        }

        Self { cells }
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
