//! Board module - the grid of locked cells
//!
//! The grid is a 10x20 matrix of [`Cell`]s holding locked pieces only; the
//! active piece is overlaid separately when a snapshot is taken.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Point;
use crate::types::{Cell, Rgb, COLUMNS, ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (COLUMNS as usize) * (ROWS as usize);

/// Row indices returned by [`Grid::full_rows`], ascending.
pub type RowList = ArrayVec<usize, { ROWS as usize }>;

/// Translation applied to a piece's relative points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i8,
    pub y: i8,
}

impl Offset {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// The locked-cell grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLUMNS + x)
    cells: [Cell; BOARD_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (COLUMNS as usize) + (x as usize))
    }

    /// Strict bounds check: `[0, COLUMNS) x [0, ROWS)`
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < COLUMNS as i8 && y >= 0 && y < ROWS as i8
    }

    pub fn width(&self) -> u8 {
        COLUMNS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Scan-loop emptiness: anything outside the grid counts as empty.
    ///
    /// Commit validity must pair this with [`Grid::in_bounds`].
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        match self.get(x, y) {
            Some(cell) => !cell.taken,
            None => true,
        }
    }

    /// Commit translated points into the grid, each with its own color.
    ///
    /// Points that land outside the grid are skipped.
    pub fn lock(&mut self, points: &[Point], offset: Offset) {
        for p in points {
            self.set(p.x + offset.x, p.y + offset.y, Cell::filled(p.color));
        }
    }

    /// Check if a row is completely taken
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).map_or(false, |row| row.iter().all(|c| c.taken))
    }

    /// Check if any cell of a row is taken
    pub fn row_has_taken(&self, y: usize) -> bool {
        self.row(y).map_or(false, |row| row.iter().any(|c| c.taken))
    }

    /// Full rows, ascending by index (top to bottom)
    pub fn full_rows(&self) -> RowList {
        (0..ROWS as usize).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Recolor every cell of the given rows, keeping their taken state.
    pub fn mark_rows(&mut self, rows: &[usize], color: Rgb) {
        for &y in rows {
            if let Some(row) = self.row_mut(y) {
                for cell in row {
                    cell.color = color;
                }
            }
        }
    }

    /// Reset every cell of the given rows to empty.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        for &y in rows {
            if let Some(row) = self.row_mut(y) {
                row.fill(Cell::EMPTY);
            }
        }
    }

    /// Let cells fall into the gaps left by `cleared` rows.
    ///
    /// Cleared rows are visited bottom-up. On each pass every taken cell above
    /// the cleared row slides down through empty in-bounds cells. A cell falls
    /// at most `cleared.len()` rows in total across all passes. Cells are
    /// scanned bottom-up, so a cell that already moved is never visited again
    /// in the same pass.
    pub fn compact_after_clear(&mut self, cleared: &[usize]) {
        let mut order: RowList = cleared
            .iter()
            .copied()
            .filter(|&y| y < ROWS as usize)
            .collect();
        order.sort_unstable_by(|a, b| b.cmp(a));

        let budget = order.len();
        // Rows fallen so far, tracked at the cell's current position.
        let mut fallen = [0usize; BOARD_SIZE];
        for &cleared_y in &order {
            for y in (0..cleared_y).rev() {
                for x in 0..COLUMNS as i8 {
                    self.settle_cell(x, y as i8, budget, &mut fallen);
                }
            }
        }
    }

    /// Slide one cell down while the cell below is empty and in bounds and
    /// the cell still has budget left.
    fn settle_cell(&mut self, x: i8, y: i8, budget: usize, fallen: &mut [usize; BOARD_SIZE]) {
        let (Some(cell), Some(start)) = (self.get(x, y), Self::index(x, y)) else {
            return;
        };
        if !cell.taken {
            return;
        }

        let mut cur_y = y;
        let mut steps = fallen[start];
        while steps < budget && Self::in_bounds(x, cur_y + 1) && self.is_empty(x, cur_y + 1) {
            self.set(x, cur_y + 1, cell);
            self.set(x, cur_y, Cell::EMPTY);
            cur_y += 1;
            steps += 1;
        }
        if let Some(end) = Self::index(x, cur_y) {
            fallen[start] = 0;
            fallen[end] = steps;
        }
    }

    /// Number of taken cells
    pub fn taken_count(&self) -> usize {
        self.cells.iter().filter(|c| c.taken).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLUMNS as usize)
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= ROWS as usize {
            return None;
        }
        let start = y * COLUMNS as usize;
        Some(&self.cells[start..start + COLUMNS as usize])
    }

    fn row_mut(&mut self, y: usize) -> Option<&mut [Cell]> {
        if y >= ROWS as usize {
            return None;
        }
        let start = y * COLUMNS as usize;
        Some(&mut self.cells[start..start + COLUMNS as usize])
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PALETTE;

    fn fill_row(grid: &mut Grid, y: i8) {
        for x in 0..COLUMNS as i8 {
            grid.set(x, y, Cell::filled(PALETTE[0]));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn out_of_bounds_reads_as_empty() {
        let grid = Grid::new();
        assert!(grid.is_empty(-1, 0));
        assert!(grid.is_empty(0, ROWS as i8));
        assert!(!Grid::in_bounds(-1, 0));
    }

    #[test]
    fn mark_rows_keeps_taken_state() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19);
        grid.mark_rows(&[19], crate::types::CLEARING_COLOR);

        for x in 0..COLUMNS as i8 {
            let cell = grid.get(x, 19).unwrap();
            assert!(cell.taken);
            assert_eq!(cell.color, crate::types::CLEARING_COLOR);
        }
    }

    #[test]
    fn compact_single_row_matches_row_shift() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19);
        grid.set(0, 18, Cell::filled(PALETTE[3]));
        grid.set(0, 17, Cell::filled(PALETTE[4]));

        grid.clear_rows(&[19]);
        grid.compact_after_clear(&[19]);

        assert_eq!(grid.get(0, 19), Some(Cell::filled(PALETTE[3])));
        assert_eq!(grid.get(0, 18), Some(Cell::filled(PALETTE[4])));
        assert_eq!(grid.get(0, 17), Some(Cell::EMPTY));
        assert_eq!(grid.taken_count(), 2);
    }

    #[test]
    fn adjacent_cleared_rows_cap_the_total_fall() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 18);
        fill_row(&mut grid, 19);
        grid.set(0, 15, Cell::filled(PALETTE[2]));

        grid.clear_rows(&[18, 19]);
        grid.compact_after_clear(&[18, 19]);

        assert_eq!(grid.get(0, 17), Some(Cell::filled(PALETTE[2])));
        assert_eq!(grid.get(0, 19), Some(Cell::EMPTY));
        assert_eq!(grid.taken_count(), 1);
    }
}
