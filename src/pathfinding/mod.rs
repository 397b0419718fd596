//! Single-agent grid search.
//!
//! Two A* variants share the same expansion discipline:
//!
//! - [`find_path`]: spatial search over cells, ignoring time and other agents.
//! - [`find_path_spacetime`]: search over `(cell, tick)` states that never
//!   lands on a cell reserved by another agent at that tick.
//!
//! Both use edge cost [`MoveCosts`](crate::models::MoveCosts) (orthogonal vs.
//! diagonal) and the straight-line distance to the goal as heuristic. The
//! open list is ordered by `(f, insertion counter)`, so expansion order and
//! the returned route are deterministic when costs tie.
//!
//! "No route" is a normal outcome and is reported as `None`.
//!
//! # Reference
//! Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//! Determination of Minimum Cost Paths"; Silver (2005), "Cooperative
//! Pathfinding" (space-time A* with reservation tables)

mod reservation;
mod spacetime;
mod spatial;

pub use reservation::{ReservationTable, SpaceTimeCell};
pub use spacetime::{find_path_spacetime, SpaceTimeRequest};
pub use spatial::find_path;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Open-list entry, ordered so that `BinaryHeap` pops the lowest
/// `(f_score, order)` first.
#[derive(Debug, Clone, Copy)]
struct OpenEntry<N> {
    f_score: f64,
    order: u64,
    node: N,
}

impl<N> PartialEq for OpenEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for OpenEntry<N> {}

impl<N> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smaller f (then earlier insertion) is "greater".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Walks `came_from` back from `current` and returns the path start-first.
fn reconstruct<N: Copy + Eq + Hash>(came_from: &HashMap<N, N>, mut current: N) -> Vec<N> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_open_entry_pops_lowest_f_then_earliest() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f_score: 2.0, order: 0, node: 'a' });
        heap.push(OpenEntry { f_score: 1.0, order: 2, node: 'b' });
        heap.push(OpenEntry { f_score: 1.0, order: 1, node: 'c' });
        let popped: Vec<char> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(popped, vec!['c', 'b', 'a']);
    }

    #[test]
    fn test_reconstruct() {
        let came_from: HashMap<u8, u8> = [(2, 1), (3, 2)].into_iter().collect();
        assert_eq!(reconstruct(&came_from, 3), vec![1, 2, 3]);
        assert_eq!(reconstruct(&came_from, 7), vec![7]);
    }
}
