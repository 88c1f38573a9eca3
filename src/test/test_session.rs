use crate::core::*;
use crate::session::{GameSession, SessionEvent, SessionSettings};
use crate::snapshot::SessionSnapshot;
use crate::test::test_util::{grid, seeded, session_on, session_with, tile_count};

const TERMINAL: &str = r#"
2 4 2 4
4 2 4 2
2 4 2 4
4 2 4 2
"#;

#[test]
fn new_session_starts_with_two_small_tiles() {
    let session = GameSession::new(SessionSettings::default(), seeded(1)).unwrap();

    assert_eq!(tile_count(session.grid()), 2);
    for row in session.grid().rows() {
        for &v in row {
            assert!(v == 0 || v == 2 || v == 4, "unexpected tile {v}");
        }
    }
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), 0);
    assert!(!session.game_over());
}

#[test]
fn new_session_rejects_bad_settings() {
    let tiny = SessionSettings { size: 1, four_probability: 0.5 };
    assert!(matches!(
        GameSession::new(tiny, seeded(1)),
        Err(EngineError::InvalidArgument(_))
    ));

    let odds = SessionSettings { size: 4, four_probability: 2.0 };
    assert!(matches!(
        GameSession::new(odds, seeded(1)),
        Err(EngineError::InvalidArgument(_))
    ));
}

#[test]
fn attempt_move_commits_grid_and_score_without_spawning() {
    let mut session = session_on(r#"
2 2 . 4
. . . .
. . . .
. . . .
"#, 10, 10);

    assert!(session.attempt_move(Direction::Left));

    assert_eq!(session.grid(), &grid(r#"
4 4 . .
. . . .
. . . .
. . . .
"#));
    assert_eq!(session.score(), 14);
    assert_eq!(session.best_score(), 14);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::MoveCommitted { direction: Direction::Left, score_delta: 4 }]
    );
}

#[test]
fn best_score_is_kept_when_higher() {
    let mut session = session_on(r#"
2 2 . .
. . . .
. . . .
. . . .
"#, 0, 500);

    assert!(session.attempt_move(Direction::Right));
    assert_eq!(session.score(), 4);
    assert_eq!(session.best_score(), 500);
}

#[test]
fn noop_move_changes_nothing() {
    let mut session = session_on(r#"
4 2 8 16
. . . .
. . . .
. . . .
"#, 3, 3);
    let before = session.grid().clone();

    assert!(!session.attempt_move(Direction::Left));
    assert!(!session.attempt_move(Direction::Up));

    assert_eq!(session.grid(), &before);
    assert_eq!(session.score(), 3);
    assert!(session.drain_events().is_empty());
}

#[test]
fn spawn_fills_the_only_empty_cell() {
    let mut session = session_on(r#"
2 4 8 16
32 64 . 128
256 512 1024 2048
4 8 16 32
"#, 0, 0);

    let spawn = session.spawn_random_tile().unwrap();

    assert_eq!((spawn.row, spawn.col), (1, 2));
    assert!(spawn.value == 2 || spawn.value == 4);
    assert_eq!(session.grid()[(1, 2)], spawn.value);
    assert_eq!(session.drain_events(), vec![SessionEvent::TileSpawned(spawn)]);
}

#[test]
fn spawn_on_full_board_reports_no_empty_cell() {
    let mut session = session_on(TERMINAL, 0, 0);
    let before = session.grid().clone();

    assert_eq!(session.spawn_random_tile(), Err(EngineError::NoEmptyCell));
    assert_eq!(session.grid(), &before);
    assert!(session.drain_events().is_empty());
}

#[test]
fn spawn_weight_controls_tile_value() {
    let empty_board = r#"
. . . .
. . . .
. . . .
. . . .
"#;
    let mut twos = session_with(empty_board, 0, 0, 0.0);
    let mut fours = session_with(empty_board, 0, 0, 1.0);
    for _ in 0..8 {
        assert_eq!(twos.spawn_random_tile().unwrap().value, 2);
        assert_eq!(fours.spawn_random_tile().unwrap().value, 4);
    }
}

#[test]
fn spawns_only_land_on_empty_cells() {
    let mut session = session_with(r#"
. . . .
. . . .
. . . .
. . . .
"#, 0, 0, 0.0);
    for placed in 1..=16 {
        session.spawn_random_tile().unwrap();
        assert_eq!(tile_count(session.grid()), placed);
    }
    assert_eq!(session.spawn_random_tile(), Err(EngineError::NoEmptyCell));
}

#[test]
fn terminal_board_is_game_over_and_probe_leaves_it_alone() {
    let session = session_on(TERMINAL, 64, 64);
    let before = session.grid().clone();

    assert!(session.is_game_over());
    assert_eq!(session.grid(), &before);
    assert_eq!(session.score(), 64);
}

#[test]
fn restored_terminal_board_is_latched_over() {
    let mut session = session_on(TERMINAL, 64, 64);
    assert!(session.game_over());

    for dir in Direction::all() {
        assert!(!session.attempt_move(dir));
    }
    assert!(session.game_over());
}

#[test]
fn full_board_with_a_pair_is_not_over() {
    let session = session_on(r#"
2 2 4 8
4 8 16 32
8 16 32 64
16 32 64 128
"#, 0, 0);
    assert!(!session.is_game_over());
}

#[test]
fn spawn_into_last_cell_can_end_the_game() {
    let mut session = session_with(r#"
2 4 2 4
4 2 4 2
2 4 2 4
4 2 4 .
"#, 0, 0, 0.0);
    assert!(!session.game_over());

    session.spawn_random_tile().unwrap();

    assert!(session.is_game_over());
    assert!(session.game_over());
    assert!(!session.attempt_move(Direction::Left));
}

#[test]
fn reset_clears_score_keeps_best_and_reseeds() {
    let mut session = session_on(TERMINAL, 120, 300);
    assert!(session.game_over());

    session.reset();

    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), 300);
    assert_eq!(tile_count(session.grid()), 2);
}

#[test]
fn snapshot_round_trips_through_restore() {
    let session = session_on(r#"
2 . . 4
. 8 . .
. . 16 .
32 . . .
"#, 44, 90);

    let snapshot = session.snapshot();
    let restored = GameSession::restore(session.settings(), &snapshot, seeded(3)).unwrap();

    assert_eq!(restored.grid(), session.grid());
    assert_eq!(restored.score(), 44);
    assert_eq!(restored.best_score(), 90);
}

#[test]
fn restore_rejects_grid_of_wrong_size() {
    let snapshot = SessionSnapshot {
        grid: Some(vec![vec![2, 0, 0], vec![0, 0, 0], vec![0, 0, 4]]),
        score: 0,
        best_score: 0,
    };
    let result = GameSession::restore(SessionSettings::default(), &snapshot, seeded(1));
    assert!(matches!(result, Err(EngineError::MalformedState(_))));
}

#[test]
fn restore_rejects_ragged_grid() {
    let snapshot = SessionSnapshot {
        grid: Some(vec![vec![2, 0, 0, 0], vec![0, 0, 0], vec![0; 4], vec![0; 4]]),
        score: 0,
        best_score: 0,
    };
    let result = GameSession::restore(SessionSettings::default(), &snapshot, seeded(1));
    assert!(matches!(result, Err(EngineError::MalformedState(_))));
}

#[test]
fn restore_without_grid_starts_fresh_with_best_score() {
    let snapshot = SessionSnapshot::best_only(2048);
    let session = GameSession::restore(SessionSettings::default(), &snapshot, seeded(1)).unwrap();

    assert_eq!(tile_count(session.grid()), 2);
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), 2048);
}

#[test]
fn changed_cells_lists_what_a_move_touched() {
    let mut session = session_on(r#"
. . . 2
. . . .
. . . .
. . . .
"#, 0, 0);
    let before = session.grid().clone();
    assert!(session.attempt_move(Direction::Left));

    assert_eq!(
        session.changed_cells(&before),
        vec![
            ChangedCell { row: 0, col: 0, value: 2 },
            ChangedCell { row: 0, col: 3, value: 0 },
        ]
    );
}

#[test]
fn seeded_sessions_are_reproducible() {
    let a = GameSession::new(SessionSettings::default(), seeded(99)).unwrap();
    let b = GameSession::new(SessionSettings::default(), seeded(99)).unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn restored_tiles_too_large_to_combine_stay_put() {
    let big = 1u32 << 31;
    let snapshot = SessionSnapshot {
        grid: Some(vec![vec![big, big], vec![0, 0]]),
        score: 0,
        best_score: 0,
    };
    let settings = SessionSettings { size: 2, four_probability: 0.5 };
    let mut session = GameSession::restore(settings, &snapshot, seeded(1)).unwrap();

    assert!(!session.game_over());
    assert!(!session.attempt_move(Direction::Left));
    assert_eq!(session.grid().to_rows(), vec![vec![big, big], vec![0, 0]]);
    assert_eq!(session.score(), 0);

    assert!(session.attempt_move(Direction::Down));
    assert_eq!(session.grid().to_rows(), vec![vec![0, 0], vec![big, big]]);
}
