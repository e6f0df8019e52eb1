mod common;

use common::{AI, PLAYER, Scenario, ai, player};
use tactics_core::{AiConfig, Battlefield, Outcome, Position, UnitId};
use tactics_runtime::{AiDriver, GridMap, RuntimeConfig, RuntimeError, TickAction};

#[test]
fn attacks_when_target_in_range() {
    let mut scenario = Scenario::new(
        GridMap::open(5, 5),
        AiConfig::default(),
        &[ai(0, 0, 3), player(1, 1)],
    );

    let report = scenario.tick();
    assert_eq!(report.unit, UnitId(AI));
    assert_eq!(report.action, TickAction::Attacked(UnitId(PLAYER)));
    assert!(report.turn_ended);
    assert_eq!(scenario.board.attacks().len(), 1);
    assert_eq!(scenario.board.active_unit(), Some(UnitId(PLAYER)));
    assert_eq!(scenario.position(AI), Position::new(0, 0));
}

#[test]
fn units_without_tier_end_their_turn() {
    let mut scenario = Scenario::new(
        GridMap::open(5, 5),
        AiConfig::default(),
        &[ai(0, 0, 101), player(4, 4)],
    );

    let report = scenario.tick();
    assert_eq!(report.action, TickAction::Idle);
    assert!(report.turn_ended);
    assert!(scenario.driver.registry().is_empty());
}

#[test]
fn units_without_tier_still_attack() {
    let mut scenario = Scenario::new(
        GridMap::open(5, 5),
        AiConfig::default(),
        &[ai(0, 0, 500), player(0, 1)],
    );
    assert_eq!(
        scenario.tick().action,
        TickAction::Attacked(UnitId(PLAYER))
    );
}

#[test]
fn missing_brain_is_reported() {
    let map = std::sync::Arc::new(GridMap::open(4, 4));
    let mut board = tactics_runtime::Skirmish::new(map.clone());
    board.spawn(ai(0, 0, 2)).expect("spawn");
    board.spawn(player(3, 3)).expect("spawn");

    let mut driver = AiDriver::new(RuntimeConfig::default());
    let err = driver
        .process_tick(map.as_ref(), &mut board)
        .expect_err("no brain created");
    assert!(matches!(err, RuntimeError::MissingBrain(UnitId(AI))));
}

#[test]
fn empty_board_has_no_active_unit() {
    let map = GridMap::open(2, 2);
    let mut board = tactics_runtime::Skirmish::new(std::sync::Arc::new(map.clone()));
    let mut driver = AiDriver::new(RuntimeConfig::default());
    assert!(matches!(
        driver.process_tick(&map, &mut board),
        Err(RuntimeError::NoActiveUnit)
    ));
}

#[test]
fn low_tier_closes_in_along_a_line() {
    let mut scenario = Scenario::new(
        GridMap::open(8, 3),
        AiConfig::default(),
        &[ai(0, 0, 1), player(6, 0)],
    );

    for step in 1..=5 {
        let report = scenario.tick();
        assert_eq!(
            report.action,
            TickAction::Navigated(Outcome::Moved { dx: 1, dy: 0 }),
            "step {step}"
        );
        assert!(!report.turn_ended);
        assert_eq!(scenario.position(AI), Position::new(step, 0));
    }

    assert_eq!(
        scenario.tick().action,
        TickAction::Attacked(UnitId(PLAYER))
    );
}

#[test]
fn low_tier_evades_around_a_wall() {
    let map = GridMap::from_rows(&[
        ".....", //
        "..#..", //
        ".....",
    ])
    .expect("map");
    let mut scenario = Scenario::new(map, AiConfig::default(), &[ai(1, 1, 1), player(4, 1)]);

    let report = scenario.tick();
    let TickAction::Navigated(Outcome::Moved { dx, dy }) = report.action else {
        panic!("expected an evasive move, got {:?}", report.action);
    };
    assert_ne!((dx, dy), (1, 0));
    assert_ne!(scenario.position(AI), Position::new(1, 1));

    // The cell fled from now carries heat
    let brain = scenario.driver.registry().get(UnitId(AI)).expect("brain");
    assert_eq!(brain.field().get(Position::new(1, 1)), 1);
}

#[test]
fn move_allowance_ends_the_turn() {
    let mut scenario = Scenario::new(
        GridMap::open(10, 3),
        AiConfig::default(),
        &[ai(0, 1, 1).with_move_limit(2), player(9, 1)],
    );

    let first = scenario.tick();
    assert!(first.action == TickAction::Navigated(Outcome::Moved { dx: 1, dy: 0 }));
    assert!(!first.turn_ended);

    let second = scenario.tick();
    assert!(second.turn_ended);
    assert_eq!(scenario.board.active_unit(), Some(UnitId(PLAYER)));

    scenario.skip_player();
    assert_eq!(scenario.board.moves_remaining(), Some(2));
}

#[test]
fn mid_tier_scouts_before_committing() {
    let config = AiConfig::default();
    let cycle = config.moves_per_cycle;
    let mut scenario = Scenario::new(GridMap::open(10, 10), config, &[ai(0, 0, 8), player(9, 9)]);

    for _ in 0..cycle {
        let report = scenario.tick();
        assert_eq!(report.action, TickAction::Navigated(Outcome::Scouting));
        assert!(!report.turn_ended);
        assert_eq!(scenario.position(AI), Position::new(0, 0));
    }

    let commit = scenario.tick();
    assert!(matches!(
        commit.action,
        TickAction::Navigated(Outcome::Moved { .. } | Outcome::Rejected { .. })
    ));
}

#[test]
fn play_turn_stops_when_the_turn_ends() {
    let mut scenario = Scenario::new(
        GridMap::open(6, 6),
        AiConfig::default(),
        &[ai(0, 0, 1).with_move_limit(3), player(5, 0)],
    );
    let reports = scenario
        .driver
        .play_turn(scenario.map.as_ref(), &mut scenario.board, 20)
        .expect("turn");
    assert_eq!(reports.len(), 3);
    assert!(reports.last().is_some_and(|report| report.turn_ended));
}

#[test]
fn player_turns_are_left_to_the_host() {
    let mut scenario = Scenario::new(
        GridMap::open(8, 3),
        AiConfig::default(),
        &[player(0, 0), ai(6, 0, 1)],
    );
    assert!(!scenario.driver.registry().contains(UnitId(PLAYER)));
    assert!(scenario.driver.registry().contains(UnitId(AI)));
    assert_eq!(scenario.board.active_unit(), Some(UnitId(PLAYER)));

    let err = scenario
        .driver
        .process_tick(scenario.map.as_ref(), &mut scenario.board)
        .expect_err("player turn");
    assert!(matches!(err, RuntimeError::PlayerControlled(UnitId(PLAYER))));
    assert_eq!(scenario.position(PLAYER), Position::new(0, 0));
    assert_eq!(scenario.board.active_unit(), Some(UnitId(PLAYER)));
}
