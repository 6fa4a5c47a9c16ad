//! Demo maps and a plain-text board renderer.

use gc_core::{Cell, SimRng};
use gc_spatial::{GridMap, GridMapBuilder, Path, SpatialResult, TerrainMap};

// ── Static path maps ──────────────────────────────────────────────────────────

/// 10×10 obstacle table; 1 = wall.
pub const REFERENCE_TABLE: [[u8; 10]; 10] = [
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [0, 1, 0, 1, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 1, 1, 0],
    [1, 1, 1, 0, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 0, 0, 0, 1],
];
pub const REFERENCE_START: Cell = Cell::new(1, 0);
pub const REFERENCE_GOAL: Cell = Cell::new(9, 8);

/// Obstacles of the 20×15 corridor field as (x, y) screen coordinates.
const CORRIDOR_XY: [(i32, i32); 33] = [
    (5, 6), (5, 7), (5, 8), (5, 9), (6, 9), (7, 9), (8, 9), (9, 9),
    (11, 3), (10, 9), (10, 8), (10, 7), (10, 6), (10, 5), (10, 4),
    (9, 4), (8, 4), (7, 4), (6, 4), (12, 3), (13, 3), (14, 3), (15, 3),
    (16, 3), (16, 4), (16, 5), (16, 6), (16, 7), (16, 8), (15, 8),
    (14, 8), (13, 8), (12, 8),
];
pub const CORRIDOR_START: Cell = Cell::new(6, 7);
pub const CORRIDOR_GOAL: Cell = Cell::new(5, 14);

pub fn reference() -> SpatialResult<GridMap> {
    GridMap::from_table(&REFERENCE_TABLE)
}

/// 15 rows × 20 columns.
pub fn corridor() -> SpatialResult<GridMap> {
    let mut b = GridMapBuilder::new(15, 20);
    b.block_all(CORRIDOR_XY.iter().map(|&(x, y)| Cell::new(y, x)));
    b.build()
}

// ── Pursuit terrain ───────────────────────────────────────────────────────────

/// Seeded terrain: uniform noise smoothed by two 3×3 box blurs, then every
/// cell below `water_level` becomes water (impassable).
pub fn terrain(rows: usize, cols: usize, seed: u64, water_level: f32) -> SpatialResult<GridMap> {
    let mut rng = SimRng::new(seed);
    let mut heights: Vec<Vec<f32>> = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(-1.0_f32..1.0)).collect())
        .collect();
    for _ in 0..2 {
        heights = box_blur(&heights);
    }
    GridMap::from_heights(&heights, water_level)
}

fn box_blur(src: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let rows = src.len() as i64;
    let cols = src.first().map_or(0, Vec::len) as i64;
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let mut sum = 0.0;
                    let mut n = 0.0;
                    for dr in -1..=1 {
                        for dc in -1..=1 {
                            let (rr, cc) = (r + dr, c + dc);
                            if (0..rows).contains(&rr) && (0..cols).contains(&cc) {
                                sum += src[rr as usize][cc as usize];
                                n += 1.0;
                            }
                        }
                    }
                    sum / n
                })
                .collect()
        })
        .collect()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// What to draw on top of the terrain.  Later layers win.
#[derive(Default)]
pub struct Overlay<'a> {
    pub path:    Option<&'a Path>,
    pub markers: Option<(Cell, Cell)>,
    pub agents:  &'a [Cell],
    pub player:  Option<Cell>,
}

/// `#` wall, `.` floor, `*` path, `S`/`G` markers, `E` agent, `P` player.
pub fn render<M: TerrainMap>(map: &M, overlay: &Overlay<'_>) -> String {
    let cols = map.cols();
    let mut board: Vec<Vec<char>> = (0..map.rows())
        .map(|r| {
            (0..cols)
                .map(|c| if map.is_passable(Cell::new(r as i32, c as i32)) { '.' } else { '#' })
                .collect()
        })
        .collect();

    let mut paint = |cell: Cell, ch: char| {
        if let Some(i) = map.index_of(cell) {
            board[i / cols][i % cols] = ch;
        }
    };
    if let Some(path) = overlay.path {
        for &cell in path.cells() {
            paint(cell, '*');
        }
    }
    if let Some((start, goal)) = overlay.markers {
        paint(start, 'S');
        paint(goal, 'G');
    }
    for &cell in overlay.agents {
        paint(cell, 'E');
    }
    if let Some(player) = overlay.player {
        paint(player, 'P');
    }

    board
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
