//! Track squares and sectors.
//!
//! Each player's track runs 16 positions from spawn (0) to finish
//! (15). Positions 1..=4 and 13..=14 lie in that player's private
//! safe lane, 5..=12 in the shared combat lane where captures happen.
//! Square flags are derived from the index once at construction.

use serde::{Deserialize, Serialize};

use super::piece::Seat;

/// Number of positions on a player's track, spawn and finish included.
pub const TRACK_LEN: u8 = 16;

/// Pieces wait here before entering the track.
pub const SPAWN: u8 = 0;

/// Pieces here have completed the course.
pub const FINISH: u8 = 15;

/// The combat-lane square that is immune to capture.
pub const SAFE_SPOT: u8 = 8;

/// First position of the shared combat lane.
pub const COMBAT_FIRST: u8 = 5;

/// Last position of the shared combat lane.
pub const COMBAT_LAST: u8 = 12;

/// The lane a square belongs to.
///
/// Both players traverse indices 0..=15, but only the combat lane is
/// shared board territory; safe-lane squares exist once per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Player1Safe,
    Player2Safe,
    Combat,
}

impl Sector {
    /// Returns the sector holding `position` on `seat`'s track.
    pub const fn of(position: u8, seat: Seat) -> Sector {
        if position >= COMBAT_FIRST && position <= COMBAT_LAST {
            Sector::Combat
        } else {
            Sector::safe_for(seat)
        }
    }

    /// The private safe sector of a seat.
    pub const fn safe_for(seat: Seat) -> Sector {
        match seat {
            Seat::Player1 => Sector::Player1Safe,
            Seat::Player2 => Sector::Player2Safe,
        }
    }
}

/// A single square, identified by `(index, sector)`.
///
/// Immutable after creation; the flags never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    index: u8,
    sector: Sector,
    is_start: bool,
    is_end: bool,
    is_safe_spot: bool,
    is_combat: bool,
    is_bonus_turn: bool,
}

impl Square {
    /// Builds the square at `index` in `sector`, deriving its flags.
    pub const fn at(index: u8, sector: Sector) -> Square {
        Square {
            index,
            sector,
            is_start: index == SPAWN,
            is_end: index == FINISH,
            is_safe_spot: index == SAFE_SPOT,
            is_combat: index >= COMBAT_FIRST && index <= COMBAT_LAST,
            is_bonus_turn: index == 4 || index == SAFE_SPOT || index == 14,
        }
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    pub const fn sector(self) -> Sector {
        self.sector
    }

    /// Spawn square (index 0).
    pub const fn is_start(self) -> bool {
        self.is_start
    }

    /// Finish square (index 15).
    pub const fn is_end(self) -> bool {
        self.is_end
    }

    /// Capture-immune combat square (index 8).
    pub const fn is_safe_spot(self) -> bool {
        self.is_safe_spot
    }

    /// Shared combat-lane square (indices 5..=12).
    pub const fn is_combat(self) -> bool {
        self.is_combat
    }

    /// Landing here exactly grants the mover another roll.
    pub const fn is_bonus_turn(self) -> bool {
        self.is_bonus_turn
    }
}
