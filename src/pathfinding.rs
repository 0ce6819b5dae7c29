use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::PathError;
use crate::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Node {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    node: Node,
    f_score: i32, // g_score + heuristic
    /// Insertion sequence; equal f-scores pop in strict FIFO order so
    /// the chosen path among equal-cost alternatives is deterministic.
    order: u64,
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path from start to goal using A* over four-directional
/// moves with unit cost and a Manhattan heuristic.
///
/// Returns the path as (x, y) positions from the tile after start up to
/// and including goal. `Ok(Some(vec![]))` means start equals goal;
/// `Ok(None)` means no walkable route exists. An out-of-bounds start or
/// goal is an error, never clamped.
///
/// Each call is self-contained: all search bookkeeping is allocated here
/// and dropped on return, so repeated calls against the same grid are
/// independent.
pub fn find_path(
    grid: &Grid,
    start: (i32, i32),
    goal: (i32, i32),
) -> Result<Option<Vec<(i32, i32)>>, PathError> {
    let start_tile = grid
        .get(start.0, start.1)
        .ok_or(PathError::OutOfBounds { x: start.0, y: start.1 })?;
    let goal_tile = grid
        .get(goal.0, goal.1)
        .ok_or(PathError::OutOfBounds { x: goal.0, y: goal.1 })?;

    if start == goal {
        return Ok(Some(Vec::new()));
    }
    if !start_tile.is_walkable() || !goal_tile.is_walkable() {
        return Ok(None);
    }

    let start_node = Node { x: start.0, y: start.1 };
    let goal_node = Node { x: goal.0, y: goal.1 };

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Node, Node> = HashMap::new();
    let mut g_score: HashMap<Node, i32> = HashMap::new();
    let mut closed: HashSet<Node> = HashSet::new();
    let mut order = 0u64;

    g_score.insert(start_node, 0);
    open_set.push(ScoredNode {
        node: start_node,
        f_score: heuristic(start, goal),
        order,
    });

    while let Some(current) = open_set.pop() {
        if current.node == goal_node {
            // The heuristic is admissible and consistent, so the first
            // expansion of the goal is an optimal path.
            return Ok(Some(reconstruct_path(&came_from, current.node)));
        }

        // Stale frontier entry for a node already finalized with a
        // better cost; skipped lazily rather than removed on re-insert.
        if !closed.insert(current.node) {
            continue;
        }

        let current_g = *g_score.get(&current.node).unwrap_or(&i32::MAX);

        // Check all 4 neighbors
        for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
            let nx = current.node.x + dx;
            let ny = current.node.y + dy;
            let neighbor = Node { x: nx, y: ny };

            let walkable = match grid.get(nx, ny) {
                Some(tile) => tile.is_walkable(),
                None => false,
            };
            if !walkable || closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.node);
                g_score.insert(neighbor, tentative_g);
                order += 1;
                open_set.push(ScoredNode {
                    node: neighbor,
                    f_score: tentative_g + heuristic((nx, ny), goal),
                    order,
                });
            }
        }
    }

    Ok(None) // No path found
}

/// Get just the next step toward a goal.
/// Returns `Ok(None)` if no path exists or already at goal.
pub fn next_step(
    grid: &Grid,
    start: (i32, i32),
    goal: (i32, i32),
) -> Result<Option<(i32, i32)>, PathError> {
    Ok(find_path(grid, start, goal)?.and_then(|path| path.first().copied()))
}

/// Manhattan distance heuristic
fn heuristic(from: (i32, i32), to: (i32, i32)) -> i32 {
    (from.0 - to.0).abs() + (from.1 - to.1).abs()
}

/// Reconstruct the path from came_from map
fn reconstruct_path(came_from: &HashMap<Node, Node>, mut current: Node) -> Vec<(i32, i32)> {
    let mut path = vec![(current.x, current.y)];

    while let Some(&prev) = came_from.get(&current) {
        path.push((prev.x, prev.y));
        current = prev;
    }

    path.reverse();
    // Remove the start position
    if !path.is_empty() {
        path.remove(0);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType;

    /// An open `width` x `height` interior surrounded by a one-tile wall
    /// ring.
    fn walled_room(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                grid.set(x, y, TileType::Floor);
            }
        }
        grid
    }

    #[test]
    fn start_equals_goal_is_empty_path() {
        let grid = walled_room(5, 5);
        let path = find_path(&grid, (2, 2), (2, 2)).unwrap();
        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn wall_endpoints_are_unreachable() {
        let grid = walled_room(5, 5);
        assert_eq!(find_path(&grid, (0, 0), (2, 2)).unwrap(), None);
        assert_eq!(find_path(&grid, (2, 2), (0, 0)).unwrap(), None);
    }

    #[test]
    fn out_of_bounds_endpoint_is_an_error() {
        let grid = walled_room(5, 5);
        assert_eq!(
            find_path(&grid, (-1, 2), (2, 2)),
            Err(PathError::OutOfBounds { x: -1, y: 2 })
        );
        assert_eq!(
            find_path(&grid, (2, 2), (2, 5)),
            Err(PathError::OutOfBounds { x: 2, y: 5 })
        );
    }

    #[test]
    fn open_interior_path_has_manhattan_length() {
        let grid = walled_room(10, 10);
        let path = find_path(&grid, (1, 1), (8, 8)).unwrap().unwrap();
        assert_eq!(path.len(), 14);
        assert_eq!(*path.last().unwrap(), (8, 8));
    }

    #[test]
    fn path_excludes_start_and_steps_are_unit_moves() {
        let grid = walled_room(10, 10);
        let start = (1, 1);
        let path = find_path(&grid, start, (8, 4)).unwrap().unwrap();
        assert!(!path.contains(&start));

        let mut prev = start;
        for &(x, y) in &path {
            assert_eq!((x - prev.0).abs() + (y - prev.1).abs(), 1);
            assert!(grid.get(x, y).unwrap().is_walkable());
            prev = (x, y);
        }
    }

    #[test]
    fn path_routes_around_obstacles() {
        let mut grid = walled_room(7, 7);
        // Wall spur closing off the straight line between (1, 3) and (5, 3).
        for y in 1..=5 {
            grid.set(3, y, TileType::Wall);
        }
        grid.set(3, 5, TileType::Floor);
        let path = find_path(&grid, (1, 3), (5, 3)).unwrap().unwrap();
        assert_eq!(*path.last().unwrap(), (5, 3));
        assert!(path.iter().all(|&(x, y)| grid.get(x, y).unwrap().is_walkable()));
        // Detour through (3, 5) adds four steps over the direct line.
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn separated_regions_are_unreachable() {
        let mut grid = walled_room(9, 5);
        // A full-height wall splitting the interior into two islands.
        for y in 0..5 {
            grid.set(4, y, TileType::Wall);
        }
        assert_eq!(find_path(&grid, (1, 2), (7, 2)).unwrap(), None);
    }

    #[test]
    fn equal_cost_paths_resolve_deterministically() {
        let grid = walled_room(8, 8);
        let a = find_path(&grid, (1, 1), (6, 6)).unwrap().unwrap();
        let b = find_path(&grid, (1, 1), (6, 6)).unwrap().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stairs_tiles_are_traversable() {
        let mut grid = walled_room(5, 5);
        grid.set(2, 2, TileType::Stairs);
        let path = find_path(&grid, (1, 2), (3, 2)).unwrap().unwrap();
        assert_eq!(path, vec![(2, 2), (3, 2)]);
    }

    #[test]
    fn next_step_returns_first_hop_only() {
        let grid = walled_room(6, 6);
        let step = next_step(&grid, (1, 1), (4, 1)).unwrap().unwrap();
        assert_eq!((step.0 - 1).abs() + (step.1 - 1).abs(), 1);

        assert_eq!(next_step(&grid, (2, 2), (2, 2)).unwrap(), None);

        let mut blocked = walled_room(6, 6);
        for y in 0..6 {
            blocked.set(3, y, TileType::Wall);
        }
        assert_eq!(next_step(&blocked, (1, 1), (4, 1)).unwrap(), None);
    }
}
