//! Players and the seat registry.
//!
//! A small entity store for display names, seats, and win counts.
//! The computer opponent is always present: it idles on seat 0 and
//! takes seat 2 when a human starts a match against it. Seats 1 and 2
//! are the competing sides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// The reserved id of the computer opponent.
    pub const COMPUTER: PlayerId = PlayerId(0);

    pub const fn new(raw: u64) -> PlayerId {
        PlayerId(raw)
    }
}

/// Invalid display names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("player name cannot be empty")]
    Empty,

    #[error("player name contains banned character {0:?}")]
    BannedChar(char),
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    seat: u8,
    wins: u32,
}

impl Player {
    /// Creates a player after validating the display name: non-empty,
    /// and every character alphanumeric, space, hyphen, or apostrophe.
    pub fn new(id: PlayerId, name: &str, seat: u8) -> Result<Player, NameError> {
        if name.trim().is_empty() {
            return Err(NameError::Empty);
        }
        for c in name.chars() {
            if !(c.is_alphanumeric() || c == ' ' || c == '-' || c == '\'') {
                return Err(NameError::BannedChar(c));
            }
        }
        Ok(Player {
            id,
            name: name.to_string(),
            seat,
            wins: 0,
        })
    }

    pub const fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seat number: 0 when not in a match, 1 or 2 when seated.
    pub const fn seat(&self) -> u8 {
        self.seat
    }

    pub fn set_seat(&mut self, seat: u8) {
        self.seat = seat;
    }

    /// Cumulative victories, a leaderboard hook.
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }
}

/// The player store.
#[derive(Debug, Clone)]
pub struct Registry {
    players: HashMap<PlayerId, Player>,
}

impl Registry {
    /// Creates a registry holding only the benched computer player.
    pub fn new() -> Registry {
        let computer = Player {
            id: PlayerId::COMPUTER,
            name: "computer".to_string(),
            seat: 0,
            wins: 0,
        };
        let mut players = HashMap::new();
        players.insert(PlayerId::COMPUTER, computer);
        Registry { players }
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.id(), player);
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn computer_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(&PlayerId::COMPUTER)
    }

    /// Whether any registered player already uses this exact name.
    pub fn name_taken(&self, name: &str) -> bool {
        self.players.values().any(|p| p.name == name)
    }

    pub fn name_for_seat(&self, seat: u8) -> Option<&str> {
        self.players
            .values()
            .find(|p| p.seat == seat)
            .map(|p| p.name.as_str())
    }

    pub fn player_for_seat_mut(&mut self, seat: u8) -> Option<&mut Player> {
        self.players.values_mut().find(|p| p.seat == seat)
    }

    /// Removes every player except the computer.
    pub fn remove_humans(&mut self) {
        self.players.retain(|id, _| *id == PlayerId::COMPUTER);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
