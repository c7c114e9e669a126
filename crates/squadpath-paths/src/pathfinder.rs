use std::collections::{BinaryHeap, HashMap};

use squadpath_core::{Point, TileState, TileStateProvider};

use crate::config::{SearchConfig, UNBOUNDED};
use crate::distance::manhattan;
use crate::error::NoPath;
use crate::node::{self, FrontierRef, MAX_COST, NodeId, SearchNode, Slot};

/// Counters describing the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Search nodes created, including relaxations and reopenings.
    pub discovered: usize,
    /// Resolved nodes moved back into the frontier after a cheaper route.
    pub reopened: usize,
}

// ---------------------------------------------------------------------------
// GridPathfinder
// ---------------------------------------------------------------------------

/// Single-agent route search over a tile map.
///
/// Each `GridPathfinder` owns its frontier, resolved set and node arena and
/// reuses their allocations between calls; nothing carries over from one
/// search to the next. Searches take `&mut self`, so run independent
/// instances to route several units in parallel.
#[derive(Debug, Default)]
pub struct GridPathfinder {
    config: SearchConfig,
    nodes: Vec<SearchNode>,
    slots: HashMap<Point, Slot>,
    frontier: BinaryHeap<FrontierRef>,
    next_seq: u64,
    stats: SearchStats,
}

impl GridPathfinder {
    /// Create a pathfinder with an unbounded search radius.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pathfinder with the given configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration used by [`route`](Self::route) and
    /// [`find_path`](Self::find_path).
    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Find the steps leading from `start` to `goal`, if any.
    ///
    /// The returned path excludes `start` and ends with `goal`; it is never
    /// empty. `None` means "hold position", see [`route`](Self::route) for
    /// the reason.
    pub fn find_path<P>(&mut self, tiles: &P, start: Point, goal: Point) -> Option<Vec<Point>>
    where
        P: TileStateProvider + ?Sized,
    {
        self.route(tiles, start, goal).ok()
    }

    /// Like [`find_path`](Self::find_path) with an explicit search radius.
    pub fn find_path_within<P>(
        &mut self,
        tiles: &P,
        start: Point,
        goal: Point,
        max_radius: i32,
    ) -> Option<Vec<Point>>
    where
        P: TileStateProvider + ?Sized,
    {
        self.route_within(tiles, start, goal, max_radius).ok()
    }

    /// Compute the cheapest route from `start` to `goal` using the configured
    /// search radius.
    pub fn route<P>(&mut self, tiles: &P, start: Point, goal: Point) -> Result<Vec<Point>, NoPath>
    where
        P: TileStateProvider + ?Sized,
    {
        self.route_within(tiles, start, goal, self.config.max_radius)
    }

    /// Compute the cheapest route from `start` to `goal`, visiting no tile
    /// whose Manhattan distance from `start` exceeds `max_radius`.
    ///
    /// Free tiles cost one step. Occupied tiles are kept as candidates at
    /// [`MAX_COST`] but never expanded, so a route never passes through them.
    /// Among equally cheap routes the one reached through the earliest
    /// discovered tile wins, with neighbours discovered in the order up,
    /// down, left, right.
    pub fn route_within<P>(
        &mut self,
        tiles: &P,
        start: Point,
        goal: Point,
        max_radius: i32,
    ) -> Result<Vec<Point>, NoPath>
    where
        P: TileStateProvider + ?Sized,
    {
        self.reset();

        if tiles.tile_state(goal) == TileState::OutOfBounds {
            log::debug!("route {start} -> {goal}: goal out of bounds");
            return Err(NoPath::GoalOutOfBounds { goal });
        }
        let max_radius = max_radius.max(0);
        if manhattan(start, goal) > max_radius {
            log::debug!("route {start} -> {goal}: goal beyond radius {max_radius}");
            return Err(NoPath::OutsideRadius { goal, max_radius });
        }

        let final_node = self.search(tiles, start, goal, max_radius)?;
        let path = self.reconstruct(final_node);
        if path.is_empty() {
            return Err(NoPath::SameTile { at: start });
        }
        log::debug!(
            "route {start} -> {goal}: {} steps, {} nodes expanded",
            path.len(),
            self.stats.expanded
        );
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Search internals
    // -----------------------------------------------------------------------

    fn reset(&mut self) {
        self.nodes.clear();
        self.slots.clear();
        self.frontier.clear();
        self.next_seq = 0;
        self.stats = SearchStats::default();
    }

    /// Run the search loop, returning the id of the resolved goal node.
    fn search<P>(
        &mut self,
        tiles: &P,
        start: Point,
        goal: Point,
        max_radius: i32,
    ) -> Result<NodeId, NoPath>
    where
        P: TileStateProvider + ?Sized,
    {
        let bounded = max_radius != UNBOUNDED;
        self.open(start, 0, None);

        'search: loop {
            let Some(current) = self.frontier.pop() else {
                log::warn!("route {start} -> {goal}: no path");
                break 'search Err(NoPath::Unreachable { goal });
            };

            let ci = current.node;
            let cur = self.nodes[ci];

            // Skip entries superseded by a cheaper route.
            if self.slots.get(&cur.coords) != Some(&Slot::Open(ci)) {
                continue;
            }

            // Saturated entries are never selected, and the heap holds
            // nothing cheaper.
            if cur.cost >= MAX_COST {
                log::warn!("route {start} -> {goal}: only occupied tiles left to explore");
                break 'search Err(NoPath::FrontierExhausted { goal });
            }

            if cur.coords == goal {
                self.slots.insert(goal, Slot::Resolved(ci));
                break 'search Ok(ci);
            }

            self.stats.expanded += 1;

            for np in cur.coords.neighbors_4() {
                if bounded && manhattan(start, np) > max_radius {
                    continue;
                }
                let new_cost = match tiles.tile_state(np) {
                    TileState::OutOfBounds => continue,
                    TileState::Free => node::step_cost(cur.cost, true),
                    TileState::Occupied => node::step_cost(cur.cost, false),
                };

                if let Some(slot) = self.slots.get(&np).copied() {
                    if !node::improves(self.nodes[slot.node()].cost, new_cost) {
                        continue;
                    }
                    if let Slot::Resolved(_) = slot {
                        log::trace!("reopening {np} at cost {new_cost}");
                        self.stats.reopened += 1;
                    }
                }
                self.open(np, new_cost, Some(ci));
            }

            self.slots.insert(cur.coords, Slot::Resolved(ci));
        }
    }

    /// Put `coords` at the back of the frontier with a fresh node, replacing
    /// whatever slot it had.
    fn open(&mut self, coords: Point, cost: i32, parent: Option<NodeId>) {
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            coords,
            cost,
            parent,
        });
        self.slots.insert(coords, Slot::Open(id));
        self.frontier.push(FrontierRef {
            cost,
            seq: self.next_seq,
            node: id,
        });
        self.next_seq += 1;
        self.stats.discovered += 1;
    }

    /// Walk parents back from `final_node`, excluding the start node.
    fn reconstruct(&self, final_node: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = final_node;
        while let Some(parent) = self.nodes[ci].parent {
            path.push(self.nodes[ci].coords);
            ci = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use squadpath_grid::{ScatterConfig, TileGrid, scatter_obstacles};
    use std::cell::Cell;
    use std::collections::VecDeque;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| p(x, y)).collect()
    }

    /// Counts every tile query it answers.
    struct Spy<'a> {
        grid: &'a TileGrid,
        calls: Cell<usize>,
    }

    impl TileStateProvider for Spy<'_> {
        fn tile_state(&self, p: Point) -> TileState {
            self.calls.set(self.calls.get() + 1);
            self.grid.tile_state(p)
        }
    }

    /// Checks a found path: starts next to `start`, moves one tile at a
    /// time, only on free tiles, and ends at `goal`.
    fn assert_walkable(grid: &TileGrid, start: Point, goal: Point, path: &[Point]) {
        assert_eq!(path.last(), Some(&goal));
        let mut prev = start;
        for &step in path {
            assert!(prev.is_adjacent_4(step), "{prev} -> {step} is not a single step");
            assert_eq!(grid.tile_state(step), TileState::Free, "{step} is not free");
            prev = step;
        }
        assert!(!path.contains(&start));
    }

    /// Shortest number of steps over free tiles, by plain BFS.
    fn bfs_steps(grid: &TileGrid, start: Point, goal: Point) -> Option<usize> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start, 0usize);
        queue.push_back(start);
        while let Some(cp) = queue.pop_front() {
            let d = dist[&cp];
            if cp == goal {
                return Some(d);
            }
            for np in cp.neighbors_4() {
                if grid.tile_state(np) == TileState::Free && !dist.contains_key(&np) {
                    dist.insert(np, d + 1);
                    queue.push_back(np);
                }
            }
        }
        None
    }

    #[test]
    fn straight_line_on_open_grid() {
        let grid = TileGrid::new(5, 5);
        let mut pf = GridPathfinder::new();
        let path = pf.find_path(&grid, p(0, 0), p(0, 4));
        assert_eq!(path, Some(pts(&[(0, 1), (0, 2), (0, 3), (0, 4)])));
    }

    #[test]
    fn blocked_row_has_no_path() {
        let mut grid = TileGrid::new(5, 5);
        for x in 0..5 {
            grid.set_occupied(p(x, 2));
        }
        let mut pf = GridPathfinder::new();
        assert_eq!(pf.find_path(&grid, p(0, 0), p(0, 4)), None);
        assert_eq!(
            pf.route(&grid, p(0, 0), p(0, 4)),
            Err(NoPath::FrontierExhausted { goal: p(0, 4) })
        );
    }

    #[test]
    fn detours_around_an_occupied_tile() {
        let mut grid = TileGrid::new(5, 5);
        grid.set_occupied(p(0, 2));
        let mut pf = GridPathfinder::new();
        let path = pf.find_path(&grid, p(0, 0), p(0, 4)).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(
            path,
            pts(&[(0, 1), (1, 1), (1, 2), (1, 3), (1, 4), (0, 4)])
        );
        assert_walkable(&grid, p(0, 0), p(0, 4), &path);
    }

    #[test]
    fn detours_through_a_single_gap() {
        let mut grid = TileGrid::new(5, 5);
        for x in [0, 2, 3, 4] {
            grid.set_occupied(p(x, 2));
        }
        let mut pf = GridPathfinder::new();
        let path = pf.find_path(&grid, p(0, 0), p(0, 4)).unwrap();
        assert_eq!(
            path,
            pts(&[(0, 1), (1, 1), (1, 2), (1, 3), (1, 4), (0, 4)])
        );
    }

    #[test]
    fn same_tile_is_not_a_path() {
        let grid = TileGrid::new(5, 5);
        let mut pf = GridPathfinder::new();
        for c in grid.bounds() {
            assert_eq!(pf.find_path(&grid, c, c), None);
        }
        assert_eq!(
            pf.route(&grid, p(2, 2), p(2, 2)),
            Err(NoPath::SameTile { at: p(2, 2) })
        );
    }

    #[test]
    fn out_of_bounds_goal_is_rejected_without_exploring() {
        let grid = TileGrid::new(5, 5);
        let spy = Spy {
            grid: &grid,
            calls: Cell::new(0),
        };
        let mut pf = GridPathfinder::new();
        assert_eq!(
            pf.route(&spy, p(0, 0), p(5, 0)),
            Err(NoPath::GoalOutOfBounds { goal: p(5, 0) })
        );
        assert_eq!(spy.calls.get(), 1);
        assert_eq!(pf.last_stats().expanded, 0);

        spy.calls.set(0);
        assert_eq!(pf.find_path(&spy, p(0, 0), p(-1, -1)), None);
        assert_eq!(spy.calls.get(), 1);
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let mut grid = TileGrid::new(5, 5);
        for c in p(2, 2).neighbors_4() {
            grid.set_occupied(c);
        }
        let mut pf = GridPathfinder::new();
        assert_eq!(pf.find_path(&grid, p(0, 0), p(2, 2)), None);
    }

    #[test]
    fn occupied_goal_is_never_reached() {
        let mut grid = TileGrid::new(3, 3);
        grid.set_occupied(p(0, 1));
        let mut pf = GridPathfinder::new();
        assert_eq!(
            pf.route(&grid, p(0, 0), p(0, 1)),
            Err(NoPath::FrontierExhausted { goal: p(0, 1) })
        );
    }

    #[test]
    fn exhausted_map_without_obstacles_is_unreachable() {
        // A corridor along y = 0 and an island at (5, 0).
        let tiles = |q: Point| {
            if q.y == 0 && ((0..4).contains(&q.x) || q.x == 5) {
                TileState::Free
            } else {
                TileState::OutOfBounds
            }
        };
        let mut pf = GridPathfinder::new();
        assert_eq!(
            pf.route(&tiles, p(0, 0), p(5, 0)),
            Err(NoPath::Unreachable { goal: p(5, 0) })
        );
        assert_eq!(pf.last_stats().expanded, 4);
    }

    #[test]
    fn occupied_start_still_routes() {
        let mut grid = TileGrid::new(3, 1);
        grid.set_occupied(p(0, 0));
        let mut pf = GridPathfinder::new();
        assert_eq!(pf.find_path(&grid, p(0, 0), p(2, 0)), Some(pts(&[(1, 0), (2, 0)])));
    }

    #[test]
    fn routes_along_the_edge_of_the_coordinate_space() {
        let open = |_: Point| TileState::Free;
        let mut pf = GridPathfinder::new();
        assert_eq!(
            pf.find_path(&open, p(0, i32::MAX), p(1, i32::MAX)),
            Some(pts(&[(1, i32::MAX)]))
        );
        assert_eq!(
            pf.find_path(&open, p(i32::MIN, i32::MIN), p(i32::MIN, i32::MIN + 2)),
            Some(pts(&[(i32::MIN, i32::MIN + 1), (i32::MIN, i32::MIN + 2)]))
        );

        // A strip along the top edge: the only way round is along the edge.
        let strip = |q: Point| {
            if q.y < i32::MAX - 1 || q.x < 0 || q.x > 2 {
                TileState::OutOfBounds
            } else if q == p(1, i32::MAX - 1) {
                TileState::Occupied
            } else {
                TileState::Free
            }
        };
        assert_eq!(
            pf.find_path(&strip, p(0, i32::MAX - 1), p(2, i32::MAX - 1)),
            Some(pts(&[
                (0, i32::MAX),
                (1, i32::MAX),
                (2, i32::MAX),
                (2, i32::MAX - 1),
            ]))
        );
    }

    #[test]
    fn ties_go_to_the_first_discovered_tile() {
        let grid = TileGrid::new(3, 3);
        let mut pf = GridPathfinder::new();
        // Up is discovered before right.
        assert_eq!(pf.find_path(&grid, p(0, 0), p(1, 1)), Some(pts(&[(0, 1), (1, 1)])));
        // Down before left.
        assert_eq!(
            pf.find_path(&grid, p(2, 2), p(0, 0)),
            Some(pts(&[(2, 1), (2, 0), (1, 0), (0, 0)]))
        );

        let pillar = TileGrid::from_ascii(
            "...\n\
             .#.\n\
             ...",
        )
        .unwrap();
        // Both sides of the pillar cost 4; the upper side is found first.
        assert_eq!(
            pf.find_path(&pillar, p(0, 1), p(2, 1)),
            Some(pts(&[(0, 2), (1, 2), (2, 2), (2, 1)]))
        );
        assert_eq!(
            pf.find_path(&pillar, p(0, 0), p(2, 2)),
            Some(pts(&[(0, 1), (0, 2), (1, 2), (2, 2)]))
        );
    }

    #[test]
    fn repeated_calls_give_identical_results() {
        let mut grid = TileGrid::new(8, 8);
        for y in 1..7 {
            grid.set_occupied(p(3, y));
        }
        let mut pf = GridPathfinder::new();
        let first = pf.route(&grid, p(0, 4), p(7, 4));
        let stats = pf.last_stats();
        let second = pf.route(&grid, p(0, 4), p(7, 4));
        assert_eq!(first, second);
        assert_eq!(stats, pf.last_stats());
        assert_eq!(first, GridPathfinder::new().route(&grid, p(0, 4), p(7, 4)));

        // An unrelated search in between leaves nothing behind.
        let _ = pf.route(&grid, p(7, 7), p(0, 0));
        assert_eq!(first, pf.route(&grid, p(0, 4), p(7, 4)));
    }

    #[test]
    fn tile_state_is_queried_fresh_each_call() {
        let mut grid = TileGrid::new(3, 1);
        let mut pf = GridPathfinder::new();
        assert!(pf.find_path(&grid, p(0, 0), p(2, 0)).is_some());
        grid.set_occupied(p(1, 0));
        assert_eq!(pf.find_path(&grid, p(0, 0), p(2, 0)), None);
        grid.set_free(p(1, 0));
        assert!(pf.find_path(&grid, p(0, 0), p(2, 0)).is_some());
    }

    #[test]
    fn radius_rejects_far_goals_early() {
        let grid = TileGrid::new(5, 5);
        let spy = Spy {
            grid: &grid,
            calls: Cell::new(0),
        };
        let mut pf = GridPathfinder::new();
        assert_eq!(
            pf.route_within(&spy, p(0, 0), p(0, 4), 3),
            Err(NoPath::OutsideRadius {
                goal: p(0, 4),
                max_radius: 3
            })
        );
        assert_eq!(spy.calls.get(), 1);
        assert_eq!(
            pf.route_within(&grid, p(1, 1), p(1, 2), -5),
            Err(NoPath::OutsideRadius {
                goal: p(1, 2),
                max_radius: 0
            })
        );
    }

    #[test]
    fn radius_limits_the_detour() {
        let mut grid = TileGrid::new(5, 5);
        grid.set_occupied(p(0, 2));
        let mut pf = GridPathfinder::new();
        // (1, 4) is 5 away from the start, so the detour has to come back
        // through (0, 3).
        assert_eq!(
            pf.find_path_within(&grid, p(0, 0), p(0, 4), 4),
            Some(pts(&[(0, 1), (1, 1), (1, 2), (1, 3), (0, 3), (0, 4)]))
        );
        assert_eq!(
            pf.find_path_within(&grid, p(0, 0), p(0, 4), 5),
            pf.find_path(&grid, p(0, 0), p(0, 4))
        );
    }

    #[test]
    fn radius_can_cut_off_the_only_route() {
        let mut grid = TileGrid::new(5, 5);
        for x in 0..4 {
            grid.set_occupied(p(x, 2));
        }
        let mut pf = GridPathfinder::new();
        let full = pf.find_path(&grid, p(0, 0), p(0, 4)).unwrap();
        assert_eq!(full.len(), 12);
        assert_walkable(&grid, p(0, 0), p(0, 4), &full);
        assert_eq!(pf.find_path_within(&grid, p(0, 0), p(0, 4), 6), None);
    }

    #[test]
    fn configured_radius_applies_to_route() {
        let mut grid = TileGrid::new(5, 5);
        grid.set_occupied(p(0, 2));
        let mut pf = GridPathfinder::with_config(SearchConfig::default().with_max_radius(4));
        assert_eq!(pf.config().max_radius, 4);
        assert_eq!(
            pf.find_path(&grid, p(0, 0), p(0, 4)),
            pf.find_path_within(&grid, p(0, 0), p(0, 4), 4)
        );
        assert!(pf.route_within(&grid, p(0, 0), p(4, 4), UNBOUNDED).is_ok());
        assert!(pf.route(&grid, p(0, 0), p(4, 4)).is_err());
    }

    #[test]
    fn open_grid_paths_have_manhattan_length() {
        let grid = TileGrid::new(9, 7);
        let mut rng = StdRng::seed_from_u64(7);
        let mut pf = GridPathfinder::new();
        for _ in 0..200 {
            let start = p(rng.random_range(0..9), rng.random_range(0..7));
            let goal = p(rng.random_range(0..9), rng.random_range(0..7));
            let Some(path) = pf.find_path(&grid, start, goal) else {
                assert_eq!(start, goal);
                continue;
            };
            assert_eq!(path.len() as i32, manhattan(start, goal));
            assert_walkable(&grid, start, goal, &path);
        }
    }

    #[test]
    fn scattered_maps_match_breadth_first_distances() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pf = GridPathfinder::new();
        for round in 0..40 {
            let mut grid = TileGrid::new(12, 10);
            let cfg = ScatterConfig {
                density: 0.3,
                keep_clear: Vec::new(),
            };
            scatter_obstacles(&mut grid, &mut rng, &cfg);
            for _ in 0..10 {
                let start = p(rng.random_range(0..12), rng.random_range(0..10));
                let goal = p(rng.random_range(0..12), rng.random_range(0..10));
                let found = pf.find_path(&grid, start, goal);
                let expected = if start == goal {
                    None
                } else {
                    bfs_steps(&grid, start, goal)
                };
                assert_eq!(
                    found.as_ref().map(Vec::len),
                    expected,
                    "round {round}: {start} -> {goal}"
                );
                if let Some(path) = found {
                    assert_walkable(&grid, start, goal, &path);
                }
            }
        }
    }

    #[test]
    fn independent_pathfinders_share_a_grid_across_threads() {
        let mut grid = TileGrid::new(16, 16);
        for y in 0..12 {
            grid.set_occupied(p(8, y));
        }
        let grid = &grid;
        let expected = GridPathfinder::new().find_path(grid, p(0, 0), p(15, 0));
        assert!(expected.is_some());
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || GridPathfinder::new().find_path(grid, p(0, 0), p(15, 0))))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
