//! March a unit across a random map, one tile per tick.
//!
//! Halfway through, a crate drops onto the unit's route; the unit notices the
//! blocked tile and asks for a new route.
//!
//! Run: cargo run --bin march [seed]

use rand::SeedableRng;
use rand::rngs::StdRng;
use squadpath_core::Point;
use squadpath_grid::{ScatterConfig, TileGrid, render_route, scatter_obstacles};
use squadpath_paths::{GridPathfinder, Waypoints};

const WIDTH: i32 = 24;
const HEIGHT: i32 = 12;
const MAX_TICKS: usize = 200;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Point::new(0, 0);
    let goal = Point::new(WIDTH - 1, HEIGHT - 1);
    let mut grid = TileGrid::new(WIDTH, HEIGHT);
    let cfg = ScatterConfig {
        density: 0.22,
        keep_clear: vec![start, goal],
    };
    scatter_obstacles(&mut grid, &mut rng, &cfg);

    let mut pathfinder = GridPathfinder::new();
    let mut pos = start;
    let mut route = match pathfinder.route(&grid, pos, goal) {
        Ok(path) => Waypoints::new(path),
        Err(e) => {
            println!("{}", render_route(&grid, pos, &[]));
            println!("seed {seed}: {e}");
            return;
        }
    };
    println!("{}\n", render_route(&grid, pos, route.remaining()));

    let drop_tick = route.remaining().len() / 2;
    for tick in 1..=MAX_TICKS {
        if tick == drop_tick {
            if let Some(&p) = route.remaining().get(1).filter(|&&p| p != goal) {
                grid.set_occupied(p);
                println!("tick {tick}: a crate drops on {p}");
            }
        }

        if route.is_blocked(&grid) {
            match pathfinder.route(&grid, pos, goal) {
                Ok(path) => {
                    println!("tick {tick}: route blocked, replanned {} steps", path.len());
                    route = Waypoints::new(path);
                }
                Err(e) => {
                    println!("tick {tick}: holding at {pos}: {e}");
                    continue;
                }
            }
        }

        let Some(next) = route.next_step() else {
            break;
        };
        pos = next;
        if route.is_finished() {
            println!("tick {tick}: arrived at {pos}");
            break;
        }
    }
    println!("\n{}", render_route(&grid, start, &[pos]));
}
