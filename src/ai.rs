//! Heuristic computer opponent.
//!
//! Scores every candidate move for the computer seat on a fixed
//! priority ladder and plays the first ordinal reaching the highest
//! score. One ply, no lookahead; the ladder order and the
//! first-ordinal tie-break are part of the observable contract.

use thiserror::Error;
use tracing::error;

use crate::board::{PieceId, Roster, Seat, Sector, Square, FINISH};

/// The seat the computer always plays.
pub const AI_SEAT: Seat = Seat::Player2;

/// The piece cannot move at all with this roll.
const SCORE_ILLEGAL: i32 = -1;
/// Lands exactly on the finish.
const SCORE_FINISH: i32 = 100;
/// Claims the unoccupied safe spot.
const SCORE_SAFE_SPOT: i32 = 50;
/// Captures on an ordinary combat square.
const SCORE_CAPTURE: i32 = 40;
/// Lands on a bonus-turn square.
const SCORE_BONUS_TURN: i32 = 30;
/// Lands outside the combat lane.
const SCORE_SAFE_LANE: i32 = 20;
/// Any other legal move.
const SCORE_FALLBACK: i32 = 10;

/// Computer-opponent failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    /// Scoring found no playable piece even though [`can_move`]
    /// reported one; the two have diverged.
    #[error("no legal move found for the computer seat")]
    NoMoveFound,
}

/// Whether the computer can move anything at all with this roll.
///
/// A zero roll is always a skip.
pub fn can_move(pieces: &Roster, roll: u8) -> bool {
    if roll == 0 {
        return false;
    }
    pieces
        .iter()
        .filter(|p| p.seat() == AI_SEAT)
        .any(|p| piece_can_move(p.position(), pieces, roll))
}

/// Picks the ordinal of the best-scoring computer piece for `roll`.
///
/// Strictly the highest score wins; on ties the lowest ordinal is
/// kept. Callers are expected to consult [`can_move`] first, so the
/// error branch signals a broken invariant rather than a normal
/// "nothing to do" turn.
pub fn best_ordinal(pieces: &Roster, roll: u8) -> Result<u8, AiError> {
    let mut best_ordinal = None;
    let mut best_score = 0;
    for ordinal in 1..=pieces.max_ordinal() {
        let score = score_move(PieceId::new(AI_SEAT, ordinal), pieces, roll);
        if score > best_score {
            best_score = score;
            best_ordinal = Some(ordinal);
        }
    }
    best_ordinal.ok_or_else(|| {
        error!(roll, "computer found no piece to move after can_move said it could");
        AiError::NoMoveFound
    })
}

/// Scores moving `id` by `roll` on the priority ladder.
pub fn score_move(id: PieceId, pieces: &Roster, roll: u8) -> i32 {
    let piece = match pieces.get(id) {
        Some(piece) => piece,
        None => return SCORE_ILLEGAL,
    };
    if !piece_can_move(piece.position(), pieces, roll) {
        return SCORE_ILLEGAL;
    }

    let destination = piece.position() + roll;
    let square = Square::at(destination, Sector::of(destination, AI_SEAT));
    let own_blocked = pieces.seat_occupies(AI_SEAT, destination);
    let enemy_there = pieces.seat_occupies(AI_SEAT.opponent(), destination);

    if square.is_end() {
        return SCORE_FINISH;
    }
    if square.is_safe_spot() && !enemy_there && !own_blocked {
        return SCORE_SAFE_SPOT;
    }
    if square.is_combat() && !square.is_safe_spot() && enemy_there && !own_blocked {
        return SCORE_CAPTURE;
    }
    if square.is_bonus_turn() && !own_blocked {
        return SCORE_BONUS_TURN;
    }
    if !square.is_combat() && !own_blocked {
        return SCORE_SAFE_LANE;
    }
    SCORE_FALLBACK
}

/// Whether a computer piece at `position` can advance by `roll`.
fn piece_can_move(position: u8, pieces: &Roster, roll: u8) -> bool {
    let destination = position + roll;
    if destination == FINISH {
        return true;
    }
    if destination > FINISH {
        return false;
    }
    if pieces.seat_occupies(AI_SEAT, destination) {
        return false;
    }
    let square = Square::at(destination, Sector::of(destination, AI_SEAT));
    if pieces.seat_occupies(AI_SEAT.opponent(), destination) && square.is_safe_spot() {
        return false;
    }
    true
}
