/// Knight relaxation network — Error Types
///
/// Recoverable failures surfaced to callers. Structural corruption of a
/// constructed network is not represented here; see `invariants`.

use thiserror::Error;

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Error)]
pub enum KnightError {
    #[error(
        "board size {size} is outside the supported range {min}..={max}",
        min = MIN_BOARD_SIZE,
        max = MAX_BOARD_SIZE
    )]
    BoardSizeOutOfRange { size: usize },

    #[error("no valid tour found after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KnightError>;
