//! The turn engine.
//!
//! Central state machine for a match: owns the pieces and the player
//! registry, rolls dice, applies moves, resolves captures, grants
//! bonus turns, and detects wins. Presentation layers mutate state
//! only through the commands here and read it back through the query
//! methods; every failure is a typed [`EngineError`] they can display
//! and retry.

use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::{self, AiError};
use crate::board::{
    piece_offset, BoardError, Piece, PieceId, Roster, Seat, Sector, Square, FINISH, SPAWN,
    TRACK_LEN,
};
use crate::player::{NameError, Player, PlayerId, Registry};
use crate::rules::{self, RuleError};

/// Number of binary dice thrown per roll.
const DICE_COUNT: u8 = 4;

/// Seat number the computer takes when activated.
const AI_SEAT_NUMBER: u8 = 2;

/// Errors surfaced by engine commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Ai(#[from] AiError),

    /// Registering this name fully reset the engine as a recovery.
    #[error("a player named '{0}' is already seated")]
    DuplicateName(String),
}

/// The turn-engine state machine.
///
/// Exclusively owns and mutates piece positions and turn state; board
/// topology and the rule validator are stateless collaborators.
pub struct Engine {
    pieces: Roster,
    players: Registry,
    current_seat: Seat,
    current_player_name: String,
    winner_name: Option<String>,
    rolled: u8,
    pve: bool,
    ai_delay: Duration,
    rng: SmallRng,
}

impl Engine {
    /// Creates an engine with a fresh match and an entropy-seeded RNG.
    pub fn new() -> Engine {
        Engine::with_rng(SmallRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and replays.
    pub fn with_seed(seed: u64) -> Engine {
        Engine::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Engine {
        Engine {
            pieces: Roster::new(),
            players: Registry::new(),
            current_seat: Seat::Player1,
            current_player_name: String::new(),
            winner_name: None,
            rolled: 0,
            pve: false,
            ai_delay: Duration::ZERO,
            rng,
        }
    }

    // ------------------------------------------------------------------
    // Command surface
    // ------------------------------------------------------------------

    /// Registers a player.
    ///
    /// A non-human registration activates the computer opponent on
    /// seat 2 instead of storing a new entry. A duplicate display
    /// name fails with [`EngineError::DuplicateName`] and fully
    /// resets the engine as a defensive recovery.
    pub fn add_player(
        &mut self,
        name: &str,
        seat_number: u8,
        is_human: bool,
    ) -> Result<(), EngineError> {
        if !is_human {
            self.pve = true;
            if let Some(computer) = self.players.computer_mut() {
                computer.set_seat(AI_SEAT_NUMBER);
            }
            return Ok(());
        }

        if self.players.name_taken(name) {
            warn!(name, "duplicate player name, resetting the match");
            self.reset();
            return Err(EngineError::DuplicateName(name.to_string()));
        }

        let id = self.fresh_player_id();
        let player = Player::new(id, name, seat_number)?;
        if seat_number == 1 {
            self.current_player_name = player.name().to_string();
        }
        self.players.insert(player);
        Ok(())
    }

    fn fresh_player_id(&mut self) -> PlayerId {
        loop {
            let id = PlayerId::new(self.rng.gen());
            if !self.players.contains(id) {
                return id;
            }
        }
    }

    /// Rolls the four binary dice; each contributes one step with
    /// probability 1/2. Clears any previous roll first and leaves
    /// turn ownership untouched.
    pub fn roll_dice(&mut self) -> u8 {
        self.rolled = 0;
        for _ in 0..DICE_COUNT {
            if self.rng.gen_bool(0.5) {
                self.rolled += 1;
            }
        }
        self.rolled
    }

    /// Advances the current seat's piece `ordinal` by the rolled value.
    ///
    /// Reaching the finish never grants a bonus turn. Landing on an
    /// occupied combat square sends the occupants back to spawn.
    /// Landing on a bonus-turn square keeps the turn; anything else
    /// passes it.
    pub fn move_piece(&mut self, ordinal: u8) -> Result<(), EngineError> {
        rules::check_movable(ordinal, &self.pieces, self.current_seat, self.rolled)?;

        let id = PieceId::new(self.current_seat, ordinal);
        // check_movable guarantees the piece exists
        let destination = match self.pieces.get(id) {
            Some(piece) => piece.position() + self.rolled,
            None => {
                return Err(RuleError::NoSuchPiece {
                    seat: self.current_seat,
                    ordinal,
                }
                .into())
            }
        };

        if destination == FINISH {
            if let Some(piece) = self.pieces.get_mut(id) {
                piece.set_position(destination);
            }
            self.switch_turn();
            return Ok(());
        }

        let square = Square::at(destination, Sector::of(destination, self.current_seat));
        if square.is_combat() {
            // The validator already ruled out the safe spot and own
            // pieces, so anything standing here belongs to the enemy.
            for other in self.pieces.iter_mut() {
                if other.position() == destination {
                    debug!(seat = %other.seat(), ordinal = other.ordinal(), "captured");
                    other.set_position(SPAWN);
                }
            }
        }
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.set_position(destination);
        }

        if !square.is_bonus_turn() {
            self.switch_turn();
        }
        Ok(())
    }

    /// Passes the turn to the other seat and refreshes the cached
    /// display name.
    pub fn switch_turn(&mut self) {
        self.current_seat = self.current_seat.opponent();
        self.current_player_name = self
            .players
            .name_for_seat(self.current_seat.number())
            .unwrap_or_default()
            .to_string();
    }

    /// Reports the winner, if the current position has one.
    ///
    /// On a win: increments the winner's counter, caches the name for
    /// the [`Engine::winner_name`] query, and resets the whole
    /// engine. Each win is reported exactly once; the next call finds
    /// a fresh board and clears the cache again.
    pub fn detect_winner(&mut self) -> Option<String> {
        self.winner_name = self.crown_winner();
        self.winner_name.clone()
    }

    fn crown_winner(&mut self) -> Option<String> {
        let seat = self.pieces.winning_seat()?;
        let player = self.players.player_for_seat_mut(seat.number())?;
        player.record_win();
        let name = player.name().to_string();
        info!(winner = %name, %seat, "match won");
        self.reset();
        Some(name)
    }

    /// Returns the engine to its initial state: every piece to spawn,
    /// humans removed, the computer benched, dice cleared, seat 1 to
    /// move.
    pub fn reset(&mut self) {
        self.pve = false;
        if let Some(computer) = self.players.computer_mut() {
            computer.set_seat(0);
        }
        self.pieces.reset();
        self.players.remove_humans();
        self.rolled = 0;
        self.current_seat = Seat::Player1;
        self.current_player_name = String::new();
    }

    /// Teleports every piece of `seat` to the finish. Debug hook for
    /// exercising the win path.
    pub fn force_win(&mut self, seat: Seat) {
        self.pieces.force_finish(seat);
    }

    /// Plays the computer's whole turn: the optional pacing pause, a
    /// dice roll, then either the best-scoring move or a skip.
    pub fn ai_take_turn(&mut self) -> Result<(), EngineError> {
        if !self.ai_delay.is_zero() {
            thread::sleep(self.ai_delay);
        }
        self.roll_dice();
        if !ai::can_move(&self.pieces, self.rolled) {
            self.switch_turn();
            return Ok(());
        }
        let ordinal = ai::best_ordinal(&self.pieces, self.rolled)?;
        self.move_piece(ordinal)
    }

    /// Sets the cosmetic pause taken before the computer acts.
    pub fn set_ai_delay(&mut self, delay: Duration) {
        self.ai_delay = delay;
    }

    // ------------------------------------------------------------------
    // Setup hooks
    // ------------------------------------------------------------------

    /// Places a piece directly, for scripted scenarios and tests.
    pub fn place_piece(
        &mut self,
        seat: Seat,
        ordinal: u8,
        position: u8,
    ) -> Result<(), EngineError> {
        if position >= TRACK_LEN {
            return Err(BoardError::InvalidPosition(position).into());
        }
        match self.pieces.get_mut(PieceId::new(seat, ordinal)) {
            Some(piece) => {
                piece.set_position(position);
                Ok(())
            }
            None => Err(RuleError::NoSuchPiece { seat, ordinal }.into()),
        }
    }

    /// Forces the rolled dice value, for scripted scenarios and tests.
    pub fn set_rolled(&mut self, value: u8) {
        self.rolled = value;
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    /// Seat to move.
    pub fn current_seat(&self) -> Seat {
        self.current_seat
    }

    /// Display name of the seat to move; empty until known.
    pub fn current_player_name(&self) -> &str {
        &self.current_player_name
    }

    /// The last dice roll.
    pub fn rolled(&self) -> u8 {
        self.rolled
    }

    /// Name cached by the last winning [`Engine::detect_winner`] call.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner_name.as_deref()
    }

    pub fn has_winner(&self) -> bool {
        self.winner_name.is_some()
    }

    /// Whether a human-vs-computer match is active.
    pub fn is_pve(&self) -> bool {
        self.pve
    }

    /// A piece by seat and ordinal.
    pub fn piece(&self, seat: Seat, ordinal: u8) -> Option<&Piece> {
        self.pieces.get(PieceId::new(seat, ordinal))
    }

    /// The whole roster, for board-drawing collaborators.
    pub fn pieces(&self) -> &Roster {
        &self.pieces
    }

    /// Display name registered for a seat number.
    pub fn name_for_seat(&self, seat_number: u8) -> Option<&str> {
        self.players.name_for_seat(seat_number)
    }

    /// Registered players, the computer included.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Display cell for a piece, for presentation layers.
    pub fn offset_for(&self, seat: Seat, ordinal: u8) -> Result<(u8, u8), EngineError> {
        let piece = self
            .pieces
            .get(PieceId::new(seat, ordinal))
            .ok_or(RuleError::NoSuchPiece { seat, ordinal })?;
        Ok(piece_offset(piece.position(), piece.ordinal(), piece.seat())?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_engine() -> Engine {
        let mut engine = Engine::with_seed(7);
        engine.add_player("steve roger", 1, true).unwrap();
        engine.add_player("jane doe", 2, true).unwrap();
        engine
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut engine = Engine::with_seed(1);
        for _ in 0..200 {
            let roll = engine.roll_dice();
            assert!(roll <= 4);
            assert_eq!(roll, engine.rolled());
        }
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let mut a = Engine::with_seed(42);
        let mut b = Engine::with_seed(42);
        let rolls_a: Vec<u8> = (0..32).map(|_| a.roll_dice()).collect();
        let rolls_b: Vec<u8> = (0..32).map(|_| b.roll_dice()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn moving_advances_and_passes_the_turn() {
        let mut engine = two_player_engine();
        engine.set_rolled(2);
        engine.move_piece(1).unwrap();

        assert_eq!(engine.piece(Seat::Player1, 1).unwrap().position(), 2);
        assert_eq!(engine.current_seat(), Seat::Player2);
        assert_eq!(engine.current_player_name(), "jane doe");
    }

    #[test]
    fn bonus_square_keeps_the_turn() {
        let mut engine = two_player_engine();
        engine.place_piece(Seat::Player1, 1, 3).unwrap();
        engine.set_rolled(1);
        engine.move_piece(1).unwrap();

        assert_eq!(engine.piece(Seat::Player1, 1).unwrap().position(), 4);
        assert_eq!(engine.current_seat(), Seat::Player1);
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let mut engine = two_player_engine();
        engine.set_rolled(0);
        let err = engine.move_piece(1).unwrap_err();
        assert!(matches!(err, EngineError::Rule(_)));
        assert_eq!(engine.current_seat(), Seat::Player1);
        assert_eq!(engine.piece(Seat::Player1, 1).unwrap().position(), 0);
    }

    #[test]
    fn switch_turn_updates_the_cached_name() {
        let mut engine = two_player_engine();
        assert_eq!(engine.current_player_name(), "steve roger");
        engine.switch_turn();
        assert_eq!(engine.current_player_name(), "jane doe");
        engine.switch_turn();
        assert_eq!(engine.current_player_name(), "steve roger");
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut engine = two_player_engine();
        engine.add_player("", 0, false).unwrap();
        engine.place_piece(Seat::Player2, 3, 9).unwrap();
        engine.set_rolled(3);
        engine.switch_turn();

        engine.reset();
        assert!(!engine.is_pve());
        assert_eq!(engine.rolled(), 0);
        assert_eq!(engine.current_seat(), Seat::Player1);
        assert_eq!(engine.piece(Seat::Player2, 3).unwrap().position(), 0);
        assert_eq!(engine.name_for_seat(1), None);
        assert_eq!(engine.name_for_seat(2), None);
    }

    #[test]
    fn place_piece_rejects_off_track_positions() {
        let mut engine = two_player_engine();
        assert_eq!(
            engine.place_piece(Seat::Player1, 1, 16),
            Err(EngineError::Board(BoardError::InvalidPosition(16)))
        );
    }
}
