//! Move legality checks.
//!
//! Pure functions deciding whether a proposed move is legal given the
//! current piece layout. The engine consults these before mutating
//! any state; presentation layers use [`parse_ordinal`] to turn raw
//! player input into a piece ordinal and display the errors verbatim.

use thiserror::Error;

use crate::board::{PieceId, PieceState, Roster, Seat, FINISH, SAFE_SPOT};

/// Reasons a proposed move is illegal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("piece number must be an integer, got '{0}'")]
    InvalidOrdinal(String),

    #[error("{seat} has no piece number {ordinal}")]
    NoSuchPiece { seat: Seat, ordinal: u8 },

    #[error("piece {ordinal} has already finished the course")]
    PieceFinished { ordinal: u8 },

    #[error("a roll of {roll} would carry piece {ordinal} past the finish")]
    OverShoot { ordinal: u8, roll: u8 },

    #[error("the safe spot is held by an opposing piece")]
    SafeSpotProtected,

    #[error("position {position} already holds one of your pieces")]
    SquareOccupiedBySelf { position: u8 },
}

/// Parses a raw piece number as typed by a player.
pub fn parse_ordinal(raw: &str) -> Result<u8, RuleError> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| RuleError::InvalidOrdinal(raw.to_string()))
}

/// Checks whether `seat` may advance its piece `ordinal` by `roll`.
///
/// Checks run in a fixed order: the piece must exist, must not have
/// finished, must not overshoot the finish, must not displace an
/// opposing piece from the safe spot, and must not land on a square
/// already held by its own side. The finish square is exempt from the
/// self-occupancy check; it holds any number of finished pieces.
///
/// A zero roll trips the self-occupancy check against the moving
/// piece itself: zero-step turns are skips, never moves.
pub fn check_movable(
    ordinal: u8,
    pieces: &Roster,
    seat: Seat,
    roll: u8,
) -> Result<(), RuleError> {
    let id = PieceId::new(seat, ordinal);
    let piece = pieces
        .get(id)
        .ok_or(RuleError::NoSuchPiece { seat, ordinal })?;

    if piece.state() == PieceState::Finished {
        return Err(RuleError::PieceFinished { ordinal });
    }

    let destination = piece.position() + roll;
    if destination > FINISH {
        return Err(RuleError::OverShoot { ordinal, roll });
    }

    for other in pieces.iter() {
        if other.position() == destination
            && destination == SAFE_SPOT
            && other.seat() != seat
        {
            return Err(RuleError::SafeSpotProtected);
        }
        if other.position() == destination
            && destination != FINISH
            && other.seat() == seat
        {
            return Err(RuleError::SquareOccupiedBySelf {
                position: destination,
            });
        }
    }
    Ok(())
}
