/// Knight relaxation network — Board Rules
///
/// Board bounds, the knight displacement table and position encodings.
/// Coordinates are (x, y) with both in [0, n).

use serde::{Deserialize, Serialize};

use crate::error::{KnightError, Result};

pub const MIN_BOARD_SIZE: usize = 6;
pub const MAX_BOARD_SIZE: usize = 25;

/// Knight displacements in discovery order. Edge creation and therefore
/// incident-list order follow this table.
pub const KNIGHT_MOVES: [(i64, i64); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

/// Reject board sizes outside [MIN_BOARD_SIZE, MAX_BOARD_SIZE].
pub fn validate_board_size(size: usize) -> Result<()> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(KnightError::BoardSizeOutOfRange { size });
    }
    Ok(())
}

/// On-board knight destinations from (x, y), in `KNIGHT_MOVES` order.
pub fn knight_targets(x: usize, y: usize, size: usize) -> impl Iterator<Item = (usize, usize)> {
    let n = size as i64;
    KNIGHT_MOVES.iter().filter_map(move |&(dx, dy)| {
        let tx = x as i64 + dx;
        let ty = y as i64 + dy;
        if (0..n).contains(&tx) && (0..n).contains(&ty) {
            Some((tx as usize, ty as usize))
        } else {
            None
        }
    })
}

/// Coordinates with y as the row (outer loop) and x as the column.
/// This is the fixed update order and the rendering order.
pub fn row_major(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
}

// ---------------------------------------------------------------------------
// Position encoding
// ---------------------------------------------------------------------------

/// How a square is printed in solution output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionEncoding {
    /// `10*x + y`. Only unambiguous while x and y are both below 10.
    #[default]
    Legacy,
    /// `x,y`.
    Pair,
}

/// Largest board on which `Legacy` encoding cannot collide.
pub const LEGACY_ENCODING_MAX_SIZE: usize = 10;

impl PositionEncoding {
    pub fn encode(self, x: usize, y: usize) -> String {
        match self {
            PositionEncoding::Legacy => (10 * x + y).to_string(),
            PositionEncoding::Pair => format!("{},{}", x, y),
        }
    }

    /// True if two distinct squares on a board of `size` can encode equally.
    pub fn is_ambiguous_for(self, size: usize) -> bool {
        matches!(self, PositionEncoding::Legacy) && size > LEGACY_ENCODING_MAX_SIZE
    }
}
