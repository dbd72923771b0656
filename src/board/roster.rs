//! The piece store.
//!
//! Keyed by [`PieceId`] with deterministic iteration order (player1
//! pieces by ordinal, then player2's), which the capture loop and the
//! computer opponent both rely on.

use std::collections::BTreeMap;

use super::piece::{Piece, PieceId, PieceState, Seat};
use super::square::{FINISH, SPAWN};

/// Default number of pieces each seat plays with.
pub const PIECES_PER_SEAT: u8 = 7;

/// Every piece in the match, both seats.
#[derive(Debug, Clone)]
pub struct Roster {
    pieces: BTreeMap<PieceId, Piece>,
}

impl Roster {
    /// A fresh roster with the classic seven pieces per seat.
    pub fn new() -> Roster {
        Roster::with_count(PIECES_PER_SEAT)
    }

    /// A roster with `count` pieces per seat, all at spawn.
    pub fn with_count(count: u8) -> Roster {
        let mut pieces = BTreeMap::new();
        for seat in [Seat::Player1, Seat::Player2] {
            for ordinal in 1..=count {
                let piece = Piece::new(seat, ordinal);
                pieces.insert(piece.id(), piece);
            }
        }
        Roster { pieces }
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.values_mut()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Highest ordinal present for either seat.
    pub fn max_ordinal(&self) -> u8 {
        self.pieces.keys().map(|id| id.ordinal).max().unwrap_or(0)
    }

    /// Number of pieces a single seat plays with.
    pub fn per_seat(&self) -> usize {
        self.pieces.len() / 2
    }

    /// Whether `seat` has a piece standing on `position`.
    pub fn seat_occupies(&self, seat: Seat, position: u8) -> bool {
        self.iter()
            .any(|p| p.seat() == seat && p.position() == position)
    }

    /// The seat with every piece finished, if there is one.
    pub fn winning_seat(&self) -> Option<Seat> {
        if self.pieces.is_empty() {
            return None;
        }
        for seat in [Seat::Player1, Seat::Player2] {
            let finished = self
                .iter()
                .filter(|p| p.seat() == seat && p.state() == PieceState::Finished)
                .count();
            if finished == self.per_seat() {
                return Some(seat);
            }
        }
        None
    }

    /// Sends every piece back to spawn.
    pub fn reset(&mut self) {
        for piece in self.pieces.values_mut() {
            piece.set_position(SPAWN);
        }
    }

    /// Teleports every piece of `seat` to the finish.
    pub fn force_finish(&mut self, seat: Seat) {
        for piece in self.pieces.values_mut() {
            if piece.seat() == seat {
                piece.set_position(FINISH);
            }
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}
