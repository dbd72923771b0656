//! Seats, piece identity, and piece lifecycle.
//!
//! A piece is identified by its owning seat and a 1-based ordinal
//! within that seat's set. Its lifecycle state is derived from its
//! position and recomputed on every move.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout::BoardError;
use super::square::{FINISH, SPAWN};

/// One of the two competing sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    /// The other seat.
    pub const fn opponent(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    /// The seat number, 1 or 2.
    pub const fn number(self) -> u8 {
        match self {
            Seat::Player1 => 1,
            Seat::Player2 => 2,
        }
    }

    /// Parses a seat number as supplied by a host.
    pub fn from_number(number: u8) -> Result<Seat, BoardError> {
        match number {
            1 => Ok(Seat::Player1),
            2 => Ok(Seat::Player2),
            n => Err(BoardError::InvalidSeat(n)),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player1 => write!(f, "player1"),
            Seat::Player2 => write!(f, "player2"),
        }
    }
}

/// Composite piece key: owning seat plus 1-based ordinal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PieceId {
    pub seat: Seat,
    pub ordinal: u8,
}

impl PieceId {
    pub const fn new(seat: Seat, ordinal: u8) -> PieceId {
        PieceId { seat, ordinal }
    }
}

/// Lifecycle state, derived from position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    /// Waiting at position 0.
    Spawned,
    /// Somewhere on the track.
    Active,
    /// Reached position 15.
    Finished,
}

impl PieceState {
    /// The state a piece at `position` is in.
    pub const fn for_position(position: u8) -> PieceState {
        match position {
            SPAWN => PieceState::Spawned,
            FINISH => PieceState::Finished,
            _ => PieceState::Active,
        }
    }
}

/// A movable token on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    position: u8,
    state: PieceState,
}

impl Piece {
    /// Creates a piece at spawn.
    pub fn new(seat: Seat, ordinal: u8) -> Piece {
        Piece {
            id: PieceId::new(seat, ordinal),
            position: SPAWN,
            state: PieceState::Spawned,
        }
    }

    pub const fn id(&self) -> PieceId {
        self.id
    }

    pub const fn seat(&self) -> Seat {
        self.id.seat
    }

    pub const fn ordinal(&self) -> u8 {
        self.id.ordinal
    }

    pub const fn position(&self) -> u8 {
        self.position
    }

    pub const fn state(&self) -> PieceState {
        self.state
    }

    /// Moves the piece, recomputing its lifecycle state.
    pub fn set_position(&mut self, position: u8) {
        self.position = position;
        self.state = PieceState::for_position(position);
    }
}
