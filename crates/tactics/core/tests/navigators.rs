mod common;

use common::{AI, Ascii, Board};
use tactics_core::graph::INITIAL_EDGE_COST;
use tactics_core::{
    AiConfig, Battlefield, CostField, Direction, EdgeWeight, GraphTrainer, LineStepNavigator,
    Outcome, PcgRng, Position, Side, SwarmNavigator, TerrainGraph, TerrainOracle, TickContext,
    TrainingPhase, UnitId, UnitSnapshot,
};

#[test]
fn boxed_in_unit_forgets_oldest_memory() {
    let terrain = Ascii::new(&["###", "#.#", "###"]);
    let mut board = Board::new(terrain.clone(), Position::new(1, 1), Position::new(6, 6));
    let mut field = CostField::zeroed(terrain.dimensions(), 5);
    let mut navigator = LineStepNavigator::new();
    let mut rng = PcgRng::new(5);

    navigator.remember(&mut field, Position::new(1, 1));
    assert_eq!(field.get(Position::new(1, 1)), 1);

    let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    assert_eq!(navigator.step(&mut field, &mut ctx, &mut rng), Outcome::Stuck);
    assert!(navigator.is_forgetting());
    assert_eq!(navigator.memory().len(), 1);

    assert_eq!(navigator.step(&mut field, &mut ctx, &mut rng), Outcome::Stuck);
    assert!(navigator.memory().is_empty());
    assert_eq!(field.get(Position::new(1, 1)), 0);
    assert!(board.moves.is_empty());
}

#[test]
fn forgetting_every_evasion_restores_the_field() {
    let terrain = Ascii::new(&["...", ".#.", "..."]);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(2, 2));
    let mut field = CostField::zeroed(terrain.dimensions(), 5);
    let baseline = field.clone();
    let mut navigator = LineStepNavigator::new();
    let mut rng = PcgRng::new(8);

    {
        let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
        for _ in 0..4 {
            navigator.step(&mut field, &mut ctx, &mut rng);
        }
    }
    let evasions = navigator.memory().len();
    assert!(evasions >= 1);
    assert_ne!(field, baseline);

    // Wall the unit in with friendly units
    let here = board.position();
    for (index, direction) in Direction::ALL.into_iter().enumerate() {
        let cell = here.step(direction);
        if terrain.is_walkable(cell) && !board.is_occupied(cell) {
            board.units.push(UnitSnapshot {
                id: UnitId(10 + index as u32),
                position: cell,
                side: Side::Ai,
                range: 1,
                intelligence: 0,
            });
        }
    }

    let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    for _ in 0..=evasions {
        assert_eq!(navigator.step(&mut field, &mut ctx, &mut rng), Outcome::Stuck);
    }
    assert!(navigator.memory().is_empty());
    assert_eq!(field, baseline);
}

#[test]
fn evasion_heats_the_cell_left_behind() {
    let terrain = Ascii::new(&["...", ".#.", "..."]);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(2, 2));
    let mut field = CostField::zeroed(terrain.dimensions(), 5);
    let mut navigator = LineStepNavigator::new();
    let mut rng = PcgRng::new(8);

    let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    let outcome = navigator.step(&mut field, &mut ctx, &mut rng);
    assert!(outcome.moved());
    assert_eq!(field.get(Position::ORIGIN), 1);
    assert_eq!(
        navigator.memory().positions().collect::<Vec<_>>(),
        vec![Position::ORIGIN]
    );
    assert!(field.is_bounded());
}

#[test]
fn blocked_scouts_cool_contested_cells() {
    let terrain = Ascii::new(&["###", "#.#", "###"]);
    let mut board = Board::new(terrain.clone(), Position::new(1, 1), Position::new(6, 6));
    let mut field = CostField::zeroed(terrain.dimensions(), 10);
    for position in terrain.dimensions().positions() {
        field.set(position, 10);
    }
    let mut swarm = SwarmNavigator::new(Position::new(1, 1), 5, 5);
    let mut rng = PcgRng::new(1);

    let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    assert_eq!(swarm.step(&mut field, &mut ctx, &mut rng), Outcome::Scouting);
    assert_eq!(swarm.moves(), 1);

    for direction in Direction::ALL {
        let wall = Position::new(1, 1).step(direction);
        assert_eq!(field.get(wall), 5, "{wall}");
    }
    assert_eq!(field.get(Position::new(1, 1)), 10);
    assert!(swarm.scouts().iter().all(|scout| scout.position == Position::new(1, 1)));
}

#[test]
fn swarm_commits_after_a_full_cycle() {
    let terrain = Ascii::open(6, 6);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(5, 5));
    let mut field = CostField::radial(terrain.dimensions(), 10, Position::new(5, 5));
    let mut swarm = SwarmNavigator::new(Position::new(0, 0), 5, 3);
    let mut rng = PcgRng::new(21);

    let mut ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    for _ in 0..3 {
        assert_eq!(swarm.step(&mut field, &mut ctx, &mut rng), Outcome::Scouting);
    }
    let origin = ctx.position();
    let best = swarm.scouts()[swarm.best_scout(&field)].position;
    let expected = origin.delta_to(best);

    let outcome = swarm.step(&mut field, &mut ctx, &mut rng);
    match outcome {
        Outcome::Moved { dx, dy } | Outcome::Rejected { dx, dy } => {
            assert_eq!((dx, dy), expected, "best scout at {best}");
        }
        other => panic!("expected a commit, got {other:?}"),
    }
    assert_eq!(swarm.moves(), 0);
    let here = ctx.position();
    assert!(swarm.scouts().iter().all(|scout| scout.position == here));
}

#[test]
fn first_episode_leaves_weights_untouched() {
    let terrain = Ascii::open(5, 5);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(4, 4));
    let mut graph = TerrainGraph::build(&terrain);
    let mut markers = CostField::zeroed(terrain.dimensions(), 1);
    let mut trainer = GraphTrainer::new(Position::new(0, 0), 1, 100);
    let mut rng = PcgRng::new(99);

    let ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    let phase = trainer.run(&mut graph, &mut markers, &ctx, &mut rng, 10_000);
    assert_eq!(phase, TrainingPhase::Navigating);
    assert_eq!(trainer.iterations(), 1);

    if trainer.stats().episodes() == 1 {
        assert_eq!(trainer.stats().min(), trainer.stats().max());
    }
    for position in terrain.dimensions().positions() {
        for direction in Direction::ALL {
            let weight = graph.edge(position, direction);
            assert!(matches!(weight, EdgeWeight::Impassable | EdgeWeight::Cost(INITIAL_EDGE_COST)));
        }
    }
    assert_eq!(trainer.position(), Position::new(0, 0));
    assert!(trainer.path().is_empty());
}

#[test]
fn nearby_target_completes_episodes() {
    let terrain = Ascii::open(5, 5);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(3, 0));
    let mut graph = TerrainGraph::build(&terrain);
    let mut markers = CostField::zeroed(terrain.dimensions(), 1);
    let cap = AiConfig::default().episode_cap(5, 5);
    let mut trainer = GraphTrainer::new(Position::new(0, 0), 50, cap);
    let mut rng = PcgRng::new(13);

    let ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    let phase = trainer.run(&mut graph, &mut markers, &ctx, &mut rng, 1_000_000);
    assert_eq!(phase, TrainingPhase::Navigating);
    assert_eq!(trainer.iterations(), 50);
    assert!(trainer.stats().episodes() >= 1);
    assert!(trainer.stats().is_consistent());
}

#[test]
fn enclosed_unit_exhausts_its_training_budget() {
    let terrain = Ascii::new(&["#####", "#.#..", "#####"]);
    let mut board = Board::new(terrain.clone(), Position::new(1, 1), Position::new(4, 1));
    let mut graph = TerrainGraph::build(&terrain);
    let mut markers = CostField::zeroed(terrain.dimensions(), 1);
    let mut trainer = GraphTrainer::new(Position::new(1, 1), 3, 8);
    let mut rng = PcgRng::new(6);

    let ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
    let phase = trainer.run(&mut graph, &mut markers, &ctx, &mut rng, 1_000_000);
    assert_eq!(phase, TrainingPhase::Navigating);
    assert_eq!(trainer.iterations(), 3);
    assert_eq!(trainer.abandoned(), 3);
    assert_eq!(graph.visited_count(), 0);
}

#[test]
fn training_walk_never_moves_the_unit() {
    let terrain = Ascii::open(5, 5);
    let mut board = Board::new(terrain.clone(), Position::new(0, 0), Position::new(4, 4));
    let mut graph = TerrainGraph::build(&terrain);
    let mut markers = CostField::zeroed(terrain.dimensions(), 1);
    let mut trainer = GraphTrainer::new(Position::new(0, 0), 50, 100);
    let mut rng = PcgRng::new(4);

    {
        let ctx = TickContext::new(AI, &terrain, &mut board).expect("unit on board");
        while !trainer.is_finished() {
            trainer.run(&mut graph, &mut markers, &ctx, &mut rng, 7);
            assert!(trainer.stats().is_consistent());
            assert!(markers.iter().all(|(_, marker)| marker == 0 || marker == 1));
        }
    }
    assert_eq!(trainer.iterations(), 50);
    assert!(board.moves.is_empty());
    assert_eq!(board.position(), Position::new(0, 0));
}
