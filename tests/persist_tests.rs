//! Save file tests: round trips through real files and rejected loads.

use std::collections::HashSet;
use std::path::PathBuf;

use pairlink::core::{Direction, GameConfig, GameError, PlayerId, Pos};
use pairlink::game::Game;
use pairlink::persist::{encode, SaveRecord};
use pairlink::props::Prop;

/// A unique path under the system temp directory.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pairlink-{}-{}.sav", name, std::process::id()))
}

fn props(game: &Game) -> HashSet<Prop> {
    game.board().props().collect()
}

/// Saving then loading reproduces board, scores, positions, time and props.
#[test]
fn test_save_load_round_trip() {
    let mut game = Game::new(GameConfig::two_player(), 21).unwrap();
    game.move_player(PlayerId::ONE, Direction::Right).unwrap();
    game.move_player(PlayerId::TWO, Direction::Up).unwrap();
    for _ in 0..35 {
        game.tick();
    }

    let path = temp_path("round-trip");
    game.save(&path).unwrap();

    let mut restored = Game::new(GameConfig::default(), 99).unwrap();
    restored.load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.mode(), game.mode());
    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.remaining_time(), game.remaining_time());
    assert_eq!(props(&restored), props(&game));
    for (id, player) in game.players() {
        let other = restored.player(id).unwrap();
        assert_eq!(other.pos, player.pos);
        assert_eq!(other.score, player.score);
    }
}

/// The saved bytes are stable: saving a restored game gives the same file.
#[test]
fn test_resave_is_identical() {
    let game = Game::new(GameConfig::default().with_size(9, 11), 4).unwrap();
    let bytes = game.to_bytes().unwrap();

    let mut restored = Game::new(GameConfig::default(), 0).unwrap();
    restored.load_bytes(&bytes).unwrap();
    assert_eq!(restored.to_bytes().unwrap(), bytes);
}

/// A 20-row save is rejected and the current game is left as it was.
#[test]
fn test_oversized_save_rejected() {
    let mut record = SaveRecord::from_game(&Game::new(GameConfig::default(), 1).unwrap());
    record.rows = 20;
    record.cells.resize(20 * 14, -1);
    let path = temp_path("oversized");
    std::fs::write(&path, encode(&record).unwrap()).unwrap();

    let mut game = Game::new(GameConfig::default(), 2).unwrap();
    game.move_player(PlayerId::ONE, Direction::Down).unwrap();
    let before = game.snapshot();

    let err = game.load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, GameError::LoadFormat(_)), "{}", err);
    assert_eq!(game.snapshot(), before);
}

/// A player position outside the board aborts the whole load.
#[test]
fn test_player_off_board_rejected() {
    let mut game = Game::new(GameConfig::default(), 3).unwrap();
    let mut record = SaveRecord::from_game(&game);
    record.positions[0] = (0, 14);
    let before = game.snapshot();

    let err = game.load_bytes(&encode(&record).unwrap()).unwrap_err();
    assert!(matches!(err, GameError::LoadFormat(_)));
    assert_eq!(game.snapshot(), before);
}

/// Prop records off the board are dropped without failing the load.
#[test]
fn test_out_of_bounds_props_dropped() {
    let source = Game::new(GameConfig::default(), 8).unwrap();
    let mut record = SaveRecord::from_game(&source);
    let kept = record.props.len();
    record.props.push(pairlink::persist::PropRecord { kind: 1, row: 40, col: 2 });

    let mut game = Game::new(GameConfig::default(), 0).unwrap();
    game.load_bytes(&encode(&record).unwrap()).unwrap();
    assert_eq!(game.board().props().count(), kept);
    assert_eq!(props(&game), props(&source));
}

/// A missing file is an I/O error and changes nothing.
#[test]
fn test_missing_file() {
    let mut game = Game::new(GameConfig::default(), 1).unwrap();
    let before = game.snapshot();
    let err = game.load(temp_path("does-not-exist")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
    assert_eq!(game.snapshot(), before);
}

/// Loading a single-player save into a two-player game drops player 2.
#[test]
fn test_load_switches_mode() {
    let single = Game::new(GameConfig::default(), 6).unwrap();
    let mut game = Game::new(GameConfig::two_player(), 6).unwrap();
    game.load_bytes(&single.to_bytes().unwrap()).unwrap();

    assert_eq!(game.player_count(), 1);
    assert!(game.player(PlayerId::TWO).is_none());
    assert_eq!(game.player(PlayerId::ONE).unwrap().pos, Pos::new(0, 0));
    assert!(matches!(
        game.move_player(PlayerId::TWO, Direction::Left),
        Err(GameError::NoSuchPlayer(_))
    ));
}

/// Game configuration serializes for hosts that store settings as JSON.
#[test]
fn test_config_json() {
    let config = GameConfig::two_player().with_size(10, 12);
    let json = serde_json::to_string(&config).unwrap();
    let back: GameConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(json.contains("\"mode\":\"Two\""));
}
