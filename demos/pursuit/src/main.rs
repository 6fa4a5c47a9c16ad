//! pursuit: headless demo for the gridchase engine.
//!
//! 1. Prints the shortest path on the two fixed maps (10×10 obstacle table,
//!    20×15 corridor field).
//! 2. Runs a pursuit on seeded terrain: the player starts near the centre
//!    and wanders at random, enemies spawn on random land cells and chase
//!    it until one catches it or the tick budget runs out.
//!
//! Usage: `pursuit [config.json]`.  The optional JSON file holds a
//! `SimConfig`; missing fields take their defaults.  Frames are written to
//! `output/pursuit/` as CSV.  Set `RUST_LOG=debug` to see every replan.

mod maps;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use gc_behavior::ChasePlayer;
use gc_core::{Cell, Direction, SimConfig, SimRng};
use gc_output::{CsvWriter, FrameRecorder};
use gc_sim::{FrameSink, RunOutcome, SimBuilder, SimEvent};
use gc_spatial::{find_path, AStarPathfinder, GridMap};

use maps::Overlay;

// ── Constants ─────────────────────────────────────────────────────────────────

const ENEMY_COUNT:   usize = 4;
const TERRAIN_ROWS:  usize = 30;
const TERRAIN_COLS:  usize = 40;
const WATER_LEVEL:   f32   = -0.08;
const PLAYER_ACTIVE: f64   = 0.75; // chance the player moves on a given tick
const OUTPUT_DIR:    &str  = "output/pursuit";

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: SimConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(config)
}

// ── Static paths ──────────────────────────────────────────────────────────────

fn show_static_path(name: &str, map: &GridMap, start: Cell, goal: Cell) -> Result<()> {
    let path = find_path(map, start, goal)?;
    if path.is_reachable() {
        println!(
            "{name}: {start} -> {goal}: {} moves ({} cells expanded)",
            path.moves(),
            path.expanded()
        );
    } else {
        println!("{name}: {start} -> {goal}: unreachable");
    }
    let overlay = Overlay {
        path:    Some(&path),
        markers: Some((start, goal)),
        ..Overlay::default()
    };
    println!("{}\n", maps::render(map, &overlay));
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    println!("=== pursuit - gridchase ===");
    println!(
        "Ticks: {}  |  Seed: {}  |  Enemies: {ENEMY_COUNT}",
        config.total_ticks, config.seed
    );
    println!();

    // 1. Fixed maps.
    show_static_path("reference 10x10", &maps::reference()?, maps::REFERENCE_START, maps::REFERENCE_GOAL)?;
    show_static_path("corridor 20x15", &maps::corridor()?, maps::CORRIDOR_START, maps::CORRIDOR_GOAL)?;

    // 2. Terrain and player placement.
    let terrain = maps::terrain(TERRAIN_ROWS, TERRAIN_COLS, config.seed, WATER_LEVEL)?;
    let centre = Cell::new(TERRAIN_ROWS as i32 / 2, TERRAIN_COLS as i32 / 2);
    let player = terrain
        .nearest_passable(centre)
        .context("terrain has no land")?;
    println!(
        "Terrain: {TERRAIN_ROWS}x{TERRAIN_COLS}, {} land cells, player at {player}",
        terrain.passable_count()
    );

    // 3. Build sim.
    let mut sim = SimBuilder::new(config.clone(), terrain, ChasePlayer, AStarPathfinder)
        .player(player)
        .spawn_random(ENEMY_COUNT)
        .build()?;
    for (id, cell) in sim.positions() {
        info!("{id} spawned at {cell}");
    }

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut rec = FrameRecorder::new(writer);

    // 5. Run with a wandering player.  Independent stream from the spawns.
    let mut walk = SimRng::new(config.seed).child(1);
    let t0 = Instant::now();
    let outcome = loop {
        if sim.is_finished() {
            break RunOutcome::Completed { ticks: sim.clock.current_tick.0 };
        }
        if walk.gen_bool(PLAYER_ACTIVE) {
            if let Some(&dir) = walk.choose(&Direction::ALL) {
                sim.move_player(dir);
            }
        }
        let report = sim.step(&mut rec)?;
        if let Some(&SimEvent::TargetReached { tick, agent, .. }) = report.events.first() {
            break RunOutcome::Caught { tick, agent };
        }
    };
    rec.on_run_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = rec.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    match outcome {
        RunOutcome::Caught { tick, agent } => println!("Caught by {agent} at {tick}"),
        RunOutcome::Completed { ticks } => println!("Player survived all {ticks} ticks"),
    }
    println!(
        "Run complete in {:.3} s ({}), {} frames written to {OUTPUT_DIR}",
        elapsed.as_secs_f64(),
        sim.clock,
        rec.frames_recorded()
    );
    println!();

    println!("{:<10} {:<10} {:<8}", "Agent", "Cell", "Replans");
    println!("{}", "-".repeat(30));
    for (id, c) in sim.mobility.iter() {
        println!("{:<10} {:<10} {:<8}", id.to_string(), c.position().to_string(), c.replans());
    }
    println!();

    let agents: Vec<Cell> = sim.positions().into_iter().map(|(_, c)| c).collect();
    let overlay = Overlay {
        agents: &agents,
        player: Some(sim.player()),
        ..Overlay::default()
    };
    println!("{}", maps::render(&sim.map, &overlay));

    Ok(())
}
