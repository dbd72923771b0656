//! Board topology and piece state.
//!
//! Contains the track squares and sectors, piece identity and
//! lifecycle, the keyed piece store, and the display-offset mapping
//! used by presentation layers.

pub mod layout;
pub mod piece;
pub mod roster;
pub mod square;

pub use layout::{piece_offset, BoardError};
pub use piece::{Piece, PieceId, PieceState, Seat};
pub use roster::{Roster, PIECES_PER_SEAT};
pub use square::{
    Sector, Square, COMBAT_FIRST, COMBAT_LAST, FINISH, SAFE_SPOT, SPAWN, TRACK_LEN,
};
