//! Scoring module - row clear points
//!
//! A clear is worth every removed cell: `rows * COLUMNS * per_square_score`.
//! There are no levels, combos or drop bonuses.

use crate::types::COLUMNS;

/// Points for clearing `rows` full rows in one event.
pub fn row_clear_score(rows: usize, per_square_score: u32) -> u32 {
    (rows as u32)
        .saturating_mul(COLUMNS as u32)
        .saturating_mul(per_square_score)
}
