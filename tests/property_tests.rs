//! Property tests for generation, path finding, removal and round ending.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use pairlink::board::{Board, Cell};
use pairlink::core::{Direction, GameConfig, GameRng, Mode, PlayerId, Pos};
use pairlink::game::{FinishReason, GameBuilder, MoveOutcome};
use pairlink::path::{find_connectable_pair, find_path, Path};
use pairlink::props::PropKind;

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        4 => Just(Cell::Empty),
        3 => (0u8..3).prop_map(Cell::Block),
        1 => Just(Cell::Prop(PropKind::Shuffle)),
    ]
}

/// A bordered board with a random interior.
fn board_strategy() -> impl Strategy<Value = Board> {
    (3usize..=9, 3usize..=9).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(cell_strategy(), (rows - 2) * (cols - 2)).prop_map(move |interior| {
            let mut board = Board::new(rows, cols);
            for (i, cell) in interior.into_iter().enumerate() {
                let pos = Pos::new(1 + i / (cols - 2), 1 + i % (cols - 2));
                board.set(pos, cell).unwrap();
            }
            board
        })
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn assert_valid_path(board: &Board, a: Pos, b: Pos, path: &Path) {
    let cells = path.cells();
    assert_eq!(cells.first(), Some(&a));
    assert_eq!(cells.last(), Some(&b));
    assert!(path.turns() <= 2, "{} turns", path.turns());
    for w in cells.windows(2) {
        assert!(w[0].direction_to(w[1]).is_some());
    }
    for &pos in &cells[1..cells.len() - 1] {
        assert!(board.is_open(pos), "path crosses {}", pos);
    }
}

proptest! {
    /// Every generated block type appears an even number of times.
    #[test]
    fn prop_generation_pairs_types(
        seed in any::<u64>(),
        rows in 3usize..=15,
        cols in 3usize..=15,
        two in any::<bool>(),
    ) {
        let config = GameConfig::default()
            .with_size(rows, cols)
            .with_mode(Mode::from_two_player(two));
        let board = Board::generate(&config, &mut GameRng::new(seed));

        let mut counts: FxHashMap<u8, usize> = FxHashMap::default();
        for (_, t) in board.blocks() {
            *counts.entry(t).or_insert(0) += 1;
        }
        for (t, count) in counts {
            prop_assert_eq!(count % 2, 0, "type {} x{}", t, count);
        }
        for prop in board.props() {
            prop_assert!(prop.kind.is_active_in(config.mode));
        }
    }

    /// Paths have at most two turns and cross only open cells; mismatched
    /// types never connect.
    #[test]
    fn prop_find_path_respects_rules(board in board_strategy()) {
        let blocks: Vec<(Pos, u8)> = board.blocks().collect();
        for &(a, ta) in &blocks {
            for &(b, tb) in &blocks {
                let found = find_path(&board, a, b);
                if ta != tb || a == b {
                    prop_assert!(found.is_none());
                } else if let Some(path) = found {
                    assert_valid_path(&board, a, b, &path);
                }
            }
        }
    }

    /// Removing a connectable pair drops the block count by two, and the
    /// board reports cleared exactly when no block is left.
    #[test]
    fn prop_removal_counts(seed in any::<u64>()) {
        let config = GameConfig::default().with_size(8, 8);
        let mut rng = GameRng::new(seed);
        let mut board = Board::generate(&config, &mut rng);

        while let Some((a, b, path)) = find_connectable_pair(&board) {
            assert_valid_path(&board, a, b, &path);
            let before = board.block_count();
            board.remove_pair(a, b).unwrap();
            prop_assert_eq!(board.block_count(), before - 2);
            prop_assert_eq!(board.is_cleared(), board.block_count() == 0);
        }
        prop_assert_eq!(board.is_cleared(), board.block_count() == 0);
    }

    /// Random play never leaves a player on a block, and a match ends the
    /// round exactly when the board is cleared or no pair type remains.
    #[test]
    fn prop_random_play(
        seed in any::<u64>(),
        moves in prop::collection::vec((any::<bool>(), direction_strategy()), 1..200),
    ) {
        let mut game = GameBuilder::new()
            .config(GameConfig::two_player().with_size(7, 7))
            .build(seed)
            .unwrap();

        for (second, dir) in moves {
            let player = if second { PlayerId::TWO } else { PlayerId::ONE };
            let outcome = match game.move_player(player, dir) {
                Ok(outcome) => outcome,
                Err(_) => break,
            };
            game.tick();

            for (_, state) in game.players() {
                prop_assert!(game.board().block_at(state.pos).is_none());
            }
            if let MoveOutcome::Matched { .. } = outcome {
                let ended = game.board().is_cleared() || !game.board().has_any_matchable_pair();
                let reason = game.outcome().map(|o| o.reason);
                prop_assert_eq!(ended, matches!(
                    reason,
                    Some(FinishReason::BoardCleared | FinishReason::NoPairsLeft)
                ));
            }
            if game.is_finished() {
                break;
            }
        }
    }
}
