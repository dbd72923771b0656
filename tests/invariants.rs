//! Property tests driving the engine with arbitrary command traffic.
//!
//! Whatever sequence of rolls and move attempts a host throws at the
//! engine, the board invariants must hold after every command:
//! positions stay on the track, own pieces never stack on the open
//! track, the safe spot holds at most one piece, and bonus squares
//! are the only way to keep the turn.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use royal_ur::board::{PieceState, Seat, FINISH, SAFE_SPOT, SPAWN};
use royal_ur::engine::Engine;

fn seated_engine(seed: u64) -> Engine {
    let mut engine = Engine::with_seed(seed);
    engine.add_player("alice", 1, true).unwrap();
    engine.add_player("bob", 2, true).unwrap();
    engine
}

fn check_board(engine: &Engine) -> Result<(), TestCaseError> {
    let pieces: Vec<_> = engine.pieces().iter().collect();

    for piece in &pieces {
        prop_assert!(piece.position() <= FINISH);
        let expected = match piece.position() {
            SPAWN => PieceState::Spawned,
            FINISH => PieceState::Finished,
            _ => PieceState::Active,
        };
        prop_assert_eq!(piece.state(), expected);
    }

    for a in &pieces {
        for b in &pieces {
            if a.id() != b.id() && a.seat() == b.seat() && a.position() == b.position() {
                prop_assert!(
                    a.position() == SPAWN || a.position() == FINISH,
                    "own pieces stacked on {}",
                    a.position()
                );
            }
        }
    }

    let on_safe_spot = pieces.iter().filter(|p| p.position() == SAFE_SPOT).count();
    prop_assert!(on_safe_spot <= 1, "{} pieces on the safe spot", on_safe_spot);
    Ok(())
}

proptest! {
    #[test]
    fn random_traffic_preserves_board_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec((0u8..=4, 1u8..=7), 1..150),
    ) {
        let mut engine = seated_engine(seed);

        for (roll, ordinal) in commands {
            engine.set_rolled(roll);
            let seat_before = engine.current_seat();
            let destination = engine
                .piece(seat_before, ordinal)
                .map(|p| p.position() + roll);

            let moved = engine.move_piece(ordinal).is_ok();
            check_board(&engine)?;

            if moved {
                let destination = destination.expect("moved piece exists");
                let keeps_turn = destination != FINISH
                    && (destination == 4 || destination == SAFE_SPOT || destination == 14);
                if keeps_turn {
                    prop_assert_eq!(engine.current_seat(), seat_before);
                } else {
                    prop_assert_eq!(engine.current_seat(), seat_before.opponent());
                }
            } else {
                prop_assert_eq!(engine.current_seat(), seat_before);
            }

            if engine.detect_winner().is_some() {
                // The engine reset itself; seat the players again.
                engine.add_player("alice", 1, true).unwrap();
                engine.add_player("bob", 2, true).unwrap();
                check_board(&engine)?;
            }
        }
    }

    #[test]
    fn capture_always_returns_the_victim_to_spawn(
        position in 5u8..=12,
        roll in 1u8..=4,
    ) {
        prop_assume!(position != SAFE_SPOT);
        prop_assume!(position >= roll);

        let mut engine = seated_engine(0);
        engine.place_piece(Seat::Player2, 1, position).unwrap();
        engine.place_piece(Seat::Player1, 1, position - roll).unwrap();
        engine.set_rolled(roll);

        engine.move_piece(1).unwrap();

        prop_assert_eq!(
            engine.piece(Seat::Player2, 1).unwrap().state(),
            PieceState::Spawned
        );
        prop_assert_eq!(engine.piece(Seat::Player1, 1).unwrap().position(), position);
    }

    #[test]
    fn dice_rolls_never_leave_the_range(seed in any::<u64>()) {
        let mut engine = Engine::with_seed(seed);
        for _ in 0..64 {
            let roll = engine.roll_dice();
            prop_assert!(roll <= 4);
        }
    }
}
