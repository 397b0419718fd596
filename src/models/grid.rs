//! Square grid geometry.
//!
//! The grid is stateless apart from its size and movement costs. It has no
//! internal obstacles; pathfinders accept an external obstacle set instead.

use serde::{Deserialize, Serialize};

use super::{Direction, Position};

/// Cost of a single orthogonal or diagonal move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveCosts {
    /// Cost of a north/east/south/west move.
    pub orthogonal: f64,
    /// Cost of a diagonal move.
    pub diagonal: f64,
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self {
            orthogonal: 1.0,
            diagonal: 1.414,
        }
    }
}

impl MoveCosts {
    /// Cost of moving from `from` to the adjacent cell `to`.
    #[inline]
    pub fn between(&self, from: Position, to: Position) -> f64 {
        if from.is_diagonal_to(to) {
            self.diagonal
        } else {
            self.orthogonal
        }
    }

    /// Total cost of walking `route` step by step.
    pub fn route_cost(&self, route: &[Position]) -> f64 {
        route.windows(2).map(|w| self.between(w[0], w[1])).sum()
    }
}

/// A `size × size` grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    costs: MoveCosts,
}

impl Grid {
    /// Creates a grid with the default move costs.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            costs: MoveCosts::default(),
        }
    }

    /// Overrides the move costs.
    pub fn with_move_costs(mut self, costs: MoveCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Move costs used by pathfinders on this grid.
    #[inline]
    pub fn move_costs(&self) -> &MoveCosts {
        &self.costs
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.size
            && (pos.col as usize) < self.size
    }

    /// In-bounds neighbors of `pos`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| pos.step(d))
            .filter(move |p| self.is_valid(*p))
    }

    /// Manhattan (L1) distance.
    #[inline]
    pub fn manhattan_distance(&self, a: Position, b: Position) -> u32 {
        (a.row - b.row).unsigned_abs() + (a.col - b.col).unsigned_abs()
    }

    /// Straight-line (L2) distance.
    #[inline]
    pub fn euclidean_distance(&self, a: Position, b: Position) -> f64 {
        let dr = (a.row - b.row) as f64;
        let dc = (a.col - b.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(5);
        assert!(grid.is_valid(Position::new(0, 0)));
        assert!(grid.is_valid(Position::new(4, 4)));
        assert!(!grid.is_valid(Position::new(5, 0)));
        assert!(!grid.is_valid(Position::new(0, -1)));
    }

    #[test]
    fn test_neighbors_corner_and_center() {
        let grid = Grid::new(5);
        assert_eq!(grid.neighbors(Position::new(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(Position::new(2, 2)).count(), 8);
        assert_eq!(grid.neighbors(Position::new(0, 2)).count(), 5);
    }

    #[test]
    fn test_neighbor_order_starts_north() {
        let grid = Grid::new(5);
        let first = grid.neighbors(Position::new(2, 2)).next();
        assert_eq!(first, Some(Position::new(1, 2)));
    }

    #[test]
    fn test_distances() {
        let grid = Grid::new(10);
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(grid.manhattan_distance(a, b), 7);
        assert!((grid.euclidean_distance(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_route_cost() {
        let costs = MoveCosts::default();
        let route = [Position::new(0, 0), Position::new(1, 1), Position::new(1, 2)];
        assert!((costs.route_cost(&route) - 2.414).abs() < 1e-9);
        assert_eq!(costs.route_cost(&route[..1]), 0.0);
    }
}
