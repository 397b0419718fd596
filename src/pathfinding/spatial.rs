//! Spatial A*: shortest route between two cells, ignoring time.

use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{reconstruct, OpenEntry};
use crate::models::{Grid, Position};

/// Finds the lowest-cost route from `start` to `goal`.
///
/// Cells in `obstacles` are never entered. Returns the route with both
/// endpoints included, or `None` when the goal is unreachable.
///
/// # Algorithm
/// A* with a closed set. A neighbor's g-score is relaxed whenever a strictly
/// cheaper route to it is found; a cell is pushed onto the open list only
/// while it is not already queued.
pub fn find_path(
    grid: &Grid,
    start: Position,
    goal: Position,
    obstacles: Option<&HashSet<Position>>,
) -> Option<Vec<Position>> {
    if !grid.is_valid(start) || !grid.is_valid(goal) {
        return None;
    }
    let blocked = |p: &Position| obstacles.is_some_and(|o| o.contains(p));
    let costs = grid.move_costs();

    let mut counter: u64 = 0;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        f_score: 0.0,
        order: counter,
        node: start,
    });
    counter += 1;

    let mut queued: HashSet<Position> = HashSet::from([start]);
    let mut closed: HashSet<Position> = HashSet::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, f64> = HashMap::from([(start, 0.0)]);

    while let Some(OpenEntry { node: current, .. }) = open.pop() {
        if closed.contains(&current) {
            continue;
        }
        if current == goal {
            return Some(reconstruct(&came_from, current));
        }

        queued.remove(&current);
        closed.insert(current);
        let g_current = g_score[&current];

        for neighbor in grid.neighbors(current) {
            if closed.contains(&neighbor) || blocked(&neighbor) {
                continue;
            }

            let tentative = g_current + costs.between(current, neighbor);
            if g_score.get(&neighbor).map_or(true, |&g| tentative < g) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);

                if queued.insert(neighbor) {
                    let f_score = tentative + grid.euclidean_distance(neighbor, goal);
                    open.push(OpenEntry {
                        f_score,
                        order: counter,
                        node: neighbor,
                    });
                    counter += 1;
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_connected(route: &[Position]) {
        assert!(route.windows(2).all(|w| w[0].is_adjacent_to(w[1])));
    }

    #[test]
    fn test_octile_route_three_four() {
        let grid = Grid::new(10);
        let route = find_path(&grid, Position::new(0, 0), Position::new(3, 4), None).unwrap();
        assert_eq!(route.first(), Some(&Position::new(0, 0)));
        assert_eq!(route.last(), Some(&Position::new(3, 4)));
        assert_connected(&route);
        // 3 diagonal + 1 orthogonal moves
        assert_eq!(route.len(), 5);
        let cost = grid.move_costs().route_cost(&route);
        assert!((cost - (3.0 * 1.414 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_octile_route_four_diagonals_one_straight() {
        let grid = Grid::new(10);
        let route = find_path(&grid, Position::new(0, 0), Position::new(4, 5), None).unwrap();
        assert_eq!(route.len(), 6);
        let cost = grid.move_costs().route_cost(&route);
        assert!((cost - 6.656).abs() < 1e-9);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::new(3);
        let p = Position::new(1, 1);
        assert_eq!(find_path(&grid, p, p, None), Some(vec![p]));
    }

    #[test]
    fn test_detours_around_wall() {
        let grid = Grid::new(5);
        // Wall on column 2 except the bottom row.
        let wall: HashSet<Position> = (0..4).map(|r| Position::new(r, 2)).collect();
        let route = find_path(&grid, Position::new(0, 0), Position::new(0, 4), Some(&wall)).unwrap();
        assert_connected(&route);
        assert!(route.iter().all(|p| !wall.contains(p)));
        assert!(route.contains(&Position::new(4, 2)));
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = Grid::new(5);
        let goal = Position::new(4, 4);
        let ring: HashSet<Position> = grid.neighbors(goal).collect();
        assert_eq!(find_path(&grid, Position::new(0, 0), goal, Some(&ring)), None);
    }

    #[test]
    fn test_out_of_grid_endpoints() {
        let grid = Grid::new(5);
        assert_eq!(find_path(&grid, Position::new(0, 0), Position::new(5, 5), None), None);
    }

    #[test]
    fn test_deterministic() {
        let grid = Grid::new(12);
        let a = find_path(&grid, Position::new(1, 0), Position::new(9, 3), None);
        let b = find_path(&grid, Position::new(1, 0), Position::new(9, 3), None);
        assert_eq!(a, b);
    }
}
