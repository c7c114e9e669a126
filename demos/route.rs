//! Route a unit across a hand-drawn map and print the result.
//!
//! Run: cargo run --bin route [max_radius]

use squadpath_grid::{Layout, render_route};
use squadpath_paths::{GridPathfinder, SearchConfig, UNBOUNDED};

const MAP: &str = "\
..........#.....
.######...#..G..
.#....#...#.....
.#.S..#...####..
.#....#.........
.##.###...####..
..........#.....
..........#.....";

fn main() {
    let max_radius = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<i32>() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: invalid radius {arg:?}: {e}");
                std::process::exit(2);
            }
        },
        None => UNBOUNDED,
    };

    let layout = match Layout::parse(MAP) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let (Some(start), Some(goal)) = (layout.start, layout.goal) else {
        eprintln!("Error: map needs an S and a G marker");
        std::process::exit(1);
    };

    let mut pathfinder =
        GridPathfinder::with_config(SearchConfig::default().with_max_radius(max_radius));
    match pathfinder.route(&layout.grid, start, goal) {
        Ok(path) => {
            println!("{}", render_route(&layout.grid, start, &path));
            println!("{} steps from {start} to {goal}", path.len());
        }
        Err(e) => {
            println!("{}", render_route(&layout.grid, start, &[]));
            println!("{e}");
        }
    }
    let stats = pathfinder.last_stats();
    println!(
        "expanded {} nodes, discovered {}, reopened {}",
        stats.expanded, stats.discovered, stats.reopened
    );
}
