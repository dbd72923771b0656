//! Display-offset mapping for presentation layers.
//!
//! Maps a `(position, ordinal, seat)` triple to the `(column, row)`
//! cell the piece occupies in the 2-D board layout. Lives in the
//! board module because the branching mirrors the position-to-sector
//! mapping the validator uses.
//!
//! Row 2 is the shared combat lane; rows 1 and 3 are the players'
//! safe lanes, rows 0 and 4 their spawn shelves.

use thiserror::Error;

use super::piece::Seat;
use super::square::{FINISH, SPAWN};

/// Errors from board topology lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid track position {0}")]
    InvalidPosition(u8),

    #[error("invalid seat number {0}, expected 1 or 2")]
    InvalidSeat(u8),
}

/// Returns the `(column, row)` display cell for a piece.
///
/// `ordinal` is the piece's 1-based index within its owner's set; it
/// only spreads out the spawn and finish shelves, where pieces line
/// up side by side.
pub fn piece_offset(position: u8, ordinal: u8, seat: Seat) -> Result<(u8, u8), BoardError> {
    let safe_row = match seat {
        Seat::Player1 => 1,
        Seat::Player2 => 3,
    };
    match position {
        SPAWN => {
            let row = match seat {
                Seat::Player1 => 0,
                Seat::Player2 => 4,
            };
            Ok((ordinal - 1, row))
        }
        FINISH => Ok((7 + ordinal, safe_row)),
        1..=4 => Ok((4 - position, safe_row)),
        13..=14 => Ok((20 - position, safe_row)),
        5..=12 => Ok((position - 5, 2)),
        _ => Err(BoardError::InvalidPosition(position)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_spot_maps_to_middle_row() {
        assert_eq!(piece_offset(8, 7, Seat::Player1), Ok((3, 2)));
    }

    #[test]
    fn player1_cells() {
        assert_eq!(piece_offset(14, 6, Seat::Player1), Ok((6, 1)));
        assert_eq!(piece_offset(15, 5, Seat::Player1), Ok((12, 1)));
        assert_eq!(piece_offset(4, 4, Seat::Player1), Ok((0, 1)));
        assert_eq!(piece_offset(0, 3, Seat::Player1), Ok((2, 0)));
        assert_eq!(piece_offset(1, 1, Seat::Player1), Ok((3, 1)));
    }

    #[test]
    fn player2_cells() {
        assert_eq!(piece_offset(14, 6, Seat::Player2), Ok((6, 3)));
        assert_eq!(piece_offset(15, 5, Seat::Player2), Ok((12, 3)));
        assert_eq!(piece_offset(4, 4, Seat::Player2), Ok((0, 3)));
        assert_eq!(piece_offset(0, 3, Seat::Player2), Ok((2, 4)));
    }

    #[test]
    fn combat_lane_is_shared() {
        for position in 5..=12 {
            let p1 = piece_offset(position, 1, Seat::Player1).unwrap();
            let p2 = piece_offset(position, 1, Seat::Player2).unwrap();
            assert_eq!(p1, p2);
            assert_eq!(p1, (position - 5, 2));
        }
    }

    #[test]
    fn out_of_track_position_is_rejected() {
        assert_eq!(
            piece_offset(44, 44, Seat::Player1),
            Err(BoardError::InvalidPosition(44))
        );
        assert_eq!(
            piece_offset(16, 1, Seat::Player2),
            Err(BoardError::InvalidPosition(16))
        );
    }
}
