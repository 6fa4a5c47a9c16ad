//! Integration tests for gc-sim.

use gc_behavior::{ChasePlayer, FixedTarget, TargetContext, TargetModel};
use gc_core::{AgentId, Cell, Direction, SimConfig, Tick};
use gc_spatial::{AStarPathfinder, GridMap, GridMapBuilder, SpatialError, TerrainMap};

use crate::{Frame, FrameSink, Markers, NoopSink, RunOutcome, SimBuilder, SimError, SimEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed:                 42,
        frame_interval_ticks: 1,
        tick_rate_hz:         10,
    }
}

fn reference_map() -> GridMap {
    GridMap::from_table(&[
        [0u8, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        [0, 1, 0, 1, 1, 0, 1, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 1, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 1, 0, 1, 0],
        [0, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 1, 1, 0],
        [1, 1, 1, 0, 1, 0, 1, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 0, 0, 0, 1],
    ])
    .unwrap()
}

/// 5×5 field with a full wall down column 2.
fn split_map() -> GridMap {
    let mut b = GridMapBuilder::new(5, 5);
    b.block_all((0..5).map(|r| Cell::new(r, 2)));
    b.build().unwrap()
}

/// Records everything the sim reports.
#[derive(Default)]
struct Recorder {
    starts:  Vec<Tick>,
    frames:  Vec<(Tick, Cell, Vec<(AgentId, Cell)>, usize)>,
    markers: Vec<Option<Markers>>,
    ended:   Option<Tick>,
}

impl FrameSink for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_frame(&mut self, frame: &Frame<'_>) {
        let agents = frame.agents.iter().map(|a| (a.agent, a.cell)).collect();
        self.frames.push((frame.tick, frame.player, agents, frame.replans));
        self.markers.push(frame.markers);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

impl Recorder {
    fn frame_ticks(&self) -> Vec<u64> {
        self.frames.iter().map(|f| f.0 .0).collect()
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn player_defaults_to_centre() {
        let sim = SimBuilder::new(test_config(10), GridMap::open(3, 5).unwrap(), ChasePlayer, AStarPathfinder)
            .build()
            .unwrap();
        assert_eq!(sim.player(), Cell::new(1, 2));
        assert!(sim.mobility.is_empty());
    }

    #[test]
    fn invalid_config_errors() {
        let config = SimConfig { frame_interval_ticks: 0, ..test_config(10) };
        let result = SimBuilder::new(config, GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn off_map_positions_error() {
        let result = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(3, 0))
            .build();
        assert!(matches!(result, Err(SimError::Spatial(_))));

        let result = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .agents([Cell::new(0, 0), Cell::new(0, -1)])
            .build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }

    #[test]
    fn fixed_agents_register_in_order() {
        let sim = SimBuilder::new(test_config(10), reference_map(), ChasePlayer, AStarPathfinder)
            .agent(Cell::new(1, 0))
            .agent(Cell::new(8, 0))
            .build()
            .unwrap();
        assert_eq!(
            sim.positions(),
            vec![(AgentId(0), Cell::new(1, 0)), (AgentId(1), Cell::new(8, 0))]
        );
    }

    #[test]
    fn random_spawns_avoid_player_and_each_other() {
        let build = || {
            SimBuilder::new(test_config(10), reference_map(), ChasePlayer, AStarPathfinder)
                .player(Cell::new(0, 0))
                .agent(Cell::new(0, 1))
                .spawn_random(5)
                .build()
                .unwrap()
        };
        let sim = build();
        let cells: Vec<Cell> = sim.positions().into_iter().map(|(_, c)| c).collect();
        assert_eq!(cells.len(), 6);
        for (i, &c) in cells.iter().enumerate() {
            assert!(sim.map.is_passable(c));
            assert_ne!(c, sim.player());
            assert!(!cells[i + 1..].contains(&c), "duplicate spawn {c}");
        }
        // Same seed, same placement.
        assert_eq!(build().positions(), sim.positions());
    }

    #[test]
    fn random_spawns_exhaust_free_cells() {
        let result = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .spawn_random(9)
            .build();
        assert!(matches!(result, Err(SimError::NoSpawnCell { requested: 9, placed: 8 })));
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod player_tests {
    use super::*;

    #[test]
    fn moves_only_onto_passable_cells() {
        let mut b = GridMapBuilder::new(3, 3);
        b.block(Cell::new(0, 1));
        let mut sim = SimBuilder::new(test_config(10), b.build().unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(0, 0))
            .build()
            .unwrap();

        assert!(!sim.move_player(Direction::Up));
        assert!(!sim.move_player(Direction::Left));
        assert!(!sim.move_player(Direction::Right));
        assert_eq!(sim.player(), Cell::new(0, 0));
        assert!(sim.move_player(Direction::Down));
        assert_eq!(sim.player(), Cell::new(1, 0));
    }

    #[test]
    fn set_player_rejects_off_map() {
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .build()
            .unwrap();
        assert!(matches!(sim.set_player(Cell::new(-1, 1)), Err(SimError::Spatial(_))));
        sim.set_player(Cell::new(2, 2)).unwrap();
        assert_eq!(sim.player(), Cell::new(2, 2));
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn reference_pursuit_is_caught_after_shortest_path() {
        let mut sim = SimBuilder::new(test_config(100), reference_map(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(9, 8))
            .agent(Cell::new(1, 0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();

        // 16 moves, one per tick, the first on tick 0.
        assert_eq!(outcome, RunOutcome::Caught { tick: Tick(15), agent: AgentId(0) });
        assert_eq!(sim.clock.current_tick, Tick(16));
        assert_eq!(rec.ended, Some(Tick(16)));
        assert_eq!(rec.frames.len(), 16);
        assert_eq!(rec.starts.len(), 16);
        // Stationary player: one search in total.
        assert_eq!(sim.mobility.total_replans(), 1);
        let replans: usize = rec.frames.iter().map(|f| f.3).sum();
        assert_eq!(replans, 1);
        assert_eq!(rec.frames.last().unwrap().2, vec![(AgentId(0), Cell::new(9, 8))]);
    }

    #[test]
    fn unreachable_player_runs_to_completion() {
        let mut sim = SimBuilder::new(test_config(5), split_map(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(2, 4))
            .agent(Cell::new(2, 0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();

        assert_eq!(outcome, RunOutcome::Completed { ticks: 5 });
        assert_eq!(rec.ended, Some(Tick(5)));
        assert_eq!(sim.positions(), vec![(AgentId(0), Cell::new(2, 0))]);
        // Retried every tick.
        assert_eq!(sim.mobility.total_replans(), 5);
        assert!(sim.is_finished());
    }

    #[test]
    fn frames_follow_interval_and_terminal_tick() {
        let config = SimConfig { frame_interval_ticks: 4, ..test_config(100) };
        let mut sim = SimBuilder::new(config, GridMap::open(1, 30).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(0, 20))
            .agent(Cell::new(0, 0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();
        assert_eq!(outcome, RunOutcome::Caught { tick: Tick(19), agent: AgentId(0) });
        assert_eq!(rec.frame_ticks(), vec![0, 4, 8, 12, 16, 19]);
    }

    #[test]
    fn simultaneous_catch_reports_every_agent() {
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(1, 5).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(0, 2))
            .agents([Cell::new(0, 0), Cell::new(0, 4)])
            .build()
            .unwrap();
        let events = sim.run_ticks(2, &mut NoopSink).unwrap();
        assert_eq!(
            events,
            vec![
                SimEvent::TargetReached { tick: Tick(1), agent: AgentId(0), cell: Cell::new(0, 2) },
                SimEvent::TargetReached { tick: Tick(1), agent: AgentId(1), cell: Cell::new(0, 2) },
            ]
        );
    }

    #[test]
    fn moving_player_forces_replan_each_tick() {
        let mut sim = SimBuilder::new(test_config(100), GridMap::open(8, 8).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(7, 0))
            .agent(Cell::new(0, 7))
            .build()
            .unwrap();
        for _ in 0..3 {
            sim.move_player(Direction::Right);
            let report = sim.step(&mut NoopSink).unwrap();
            assert_eq!(report.replans, 1);
            assert_eq!(report.moved, 1);
            assert!(!report.is_terminal());
        }
        sim.step(&mut NoopSink).unwrap();
        assert_eq!(sim.mobility.total_replans(), 3);
    }

    #[test]
    fn fixed_target_ignores_player() {
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), FixedTarget(Cell::new(0, 2)), AStarPathfinder)
            .player(Cell::new(2, 2))
            .agent(Cell::new(0, 0))
            .build()
            .unwrap();
        let outcome = sim.run(&mut NoopSink).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { ticks: 10 });
        assert_eq!(sim.positions(), vec![(AgentId(0), Cell::new(0, 2))]);
        assert_eq!(sim.mobility.total_replans(), 1);
    }

    #[test]
    fn markers_ride_along_on_frames() {
        let mut sim = SimBuilder::new(test_config(3), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .markers(Cell::new(0, 0), Cell::new(2, 2))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.markers.len(), 3);
        assert!(rec.markers.iter().all(|m| *m == Some(Markers { start: Cell::new(0, 0), goal: Cell::new(2, 2) })));
    }

    #[test]
    fn off_map_target_surfaces_as_error() {
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), FixedTarget(Cell::new(5, 5)), AStarPathfinder)
            .agent(Cell::new(0, 0))
            .build()
            .unwrap();
        assert!(matches!(
            sim.step(&mut NoopSink),
            Err(SimError::Spatial(SpatialError::OutOfBounds { .. }))
        ));
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    /// Agent 0 gets a valid target, agent 1 one off the map.
    struct OneBadTarget;

    impl TargetModel for OneBadTarget {
        fn target(&self, agent: AgentId, _ctx: &TargetContext<'_>) -> Option<Cell> {
            Some(if agent.0 == 0 { Cell::new(2, 2) } else { Cell::new(9, 9) })
        }
    }

    #[test]
    fn failed_step_leaves_every_agent_untouched() {
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(3, 3).unwrap(), OneBadTarget, AStarPathfinder)
            .player(Cell::new(1, 1))
            .agent(Cell::new(0, 0))
            .agent(Cell::new(0, 2))
            .build()
            .unwrap();
        let before = sim.positions();
        let mut rec = Recorder::default();

        for _ in 0..2 {
            assert!(sim.step(&mut rec).is_err());
        }
        assert_eq!(sim.positions(), before);
        assert_eq!(sim.mobility.total_replans(), 0);
        assert_eq!(sim.clock.current_tick, Tick(0));
        assert!(rec.starts.is_empty());
        assert!(rec.frames.is_empty());
    }
}

// ── Independence of agents ────────────────────────────────────────────────────

#[cfg(test)]
mod swap_tests {
    use super::*;

    /// Agent 0 heads left and agent 1 right for two ticks, then they swap.
    struct SwapAfterTwo {
        left:  Cell,
        right: Cell,
    }

    impl TargetModel for SwapAfterTwo {
        fn target(&self, agent: AgentId, ctx: &TargetContext<'_>) -> Option<Cell> {
            let first_half = ctx.tick.0 < 2;
            Some(if (agent.0 == 0) == first_half { self.left } else { self.right })
        }
    }

    #[test]
    fn swapped_targets_replan_once_per_change() {
        let model = SwapAfterTwo { left: Cell::new(4, 0), right: Cell::new(4, 6) };
        let mut sim = SimBuilder::new(test_config(10), GridMap::open(5, 7).unwrap(), model, AStarPathfinder)
            .player(Cell::new(0, 3))
            .agents([Cell::new(0, 0), Cell::new(0, 6)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let events = sim.run_ticks(4, &mut rec).unwrap();
        assert!(events.is_empty());

        let per_tick: Vec<usize> = rec.frames.iter().map(|f| f.3).collect();
        assert_eq!(per_tick, vec![2, 0, 2, 0]);
        for (id, c) in sim.mobility.iter() {
            assert_eq!(c.replans(), 2, "{id}");
        }
        assert_eq!(sim.mobility.get(AgentId(0)).unwrap().cached_goal(), Some(Cell::new(4, 6)));
        assert_eq!(sim.mobility.get(AgentId(1)).unwrap().cached_goal(), Some(Cell::new(4, 0)));
    }
}
