#![cfg(not(target_arch = "wasm32"))]

//! Invariants that must hold for any sequence of moves on any variant.

use codecraft_core::*;
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Right),
        Just(Direction::Left),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

fn script_line() -> impl Strategy<Value = String> {
    prop_oneof![
        direction().prop_map(|direction| direction.token().to_string()),
        direction().prop_map(|direction| format!("    {}  # step", direction.token())),
        Just(String::new()),
        Just("# thinking".to_string()),
        "[a-z_() ]{0,16}",
    ]
}

fn assert_position_invariants(engine: &PuzzleEngine) {
    let variant = engine.variant();
    let (x, y) = engine.player();

    assert!(x < GRID_SIZE && y < GRID_SIZE);
    assert_eq!(variant.obstacle_at(engine.player()), None);
    assert!(engine.moves_used() <= variant.max_moves);
    assert_eq!(
        engine.status() == RunStatus::Succeeded,
        engine.player() == variant.target
    );
}

proptest! {
    #[test]
    fn random_moves_respect_engine_invariants(
        index in 0..CATALOG.len(),
        moves in prop::collection::vec(direction(), 0..64),
    ) {
        let mut engine = PuzzleEngine::new().unwrap();
        engine.select_variant(index).unwrap();
        let start = engine.variant().start;

        for direction in moves {
            let before = engine.snapshot();
            let outcome = engine.attempt_move(direction);
            assert_position_invariants(&engine);

            match outcome {
                MoveOutcome::Accepted => {
                    prop_assert_eq!(engine.moves_used(), before.moves_used + 1);
                }
                MoveOutcome::Reset => {
                    prop_assert_eq!(engine.player(), start);
                    prop_assert_eq!(engine.moves_used(), before.moves_used);
                }
                MoveOutcome::Rejected => {
                    prop_assert_eq!(&engine.snapshot(), &before);
                }
                MoveOutcome::Blocked => {
                    prop_assert_eq!(engine.player(), before.player);
                    prop_assert_eq!(engine.moves_used(), before.moves_used);
                    prop_assert!(engine.status().is_finished());
                }
            }

            if before.status.is_finished() {
                prop_assert_eq!(outcome, MoveOutcome::Blocked);
                prop_assert_eq!(&engine.snapshot(), &before);
            }
        }
    }

    #[test]
    fn reset_after_any_moves_is_idempotent(
        index in 0..CATALOG.len(),
        moves in prop::collection::vec(direction(), 0..32),
    ) {
        let mut engine = PuzzleEngine::new().unwrap();
        engine.select_variant(index).unwrap();
        let fresh = engine.snapshot();

        for direction in moves {
            engine.attempt_move(direction);
        }

        engine.reset();
        let once = engine.snapshot();
        engine.reset();

        prop_assert_eq!(&engine.snapshot(), &once);
        prop_assert_eq!(once, fresh);
    }

    #[test]
    fn score_never_increases_with_more_moves(
        index in 0..CATALOG.len(),
        moves in 0u16..200,
    ) {
        let score = score_for(moves, index);

        prop_assert!(score >= 100);
        prop_assert!(score_for(moves + 1, index) <= score);
    }

    #[test]
    fn scripts_always_end_in_a_settled_state(
        index in 0..CATALOG.len(),
        lines in prop::collection::vec(script_line(), 0..40),
    ) {
        let mut engine = PuzzleEngine::new().unwrap();
        engine.select_variant(index).unwrap();
        let script = lines.join("\n");

        let end = run_to_end(&mut engine, &script).unwrap();

        prop_assert_ne!(end, RunEnd::Abandoned);
        prop_assert_ne!(engine.status(), RunStatus::Running);
        assert_position_invariants(&engine);
    }
}
