//! Space-time A*: shortest route that avoids reserved `(cell, tick)` pairs.
//!
//! Every move advances time by exactly one tick and there is no wait action,
//! so an agent cannot hold position to let another pass. The goal test is
//! on position only: among equal-cost routes with different arrival ticks,
//! the deterministic tie-break decides which one is returned.

use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{reconstruct, OpenEntry, ReservationTable};
use crate::models::{Grid, Position, Tick};

/// Parameters of a space-time search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceTimeRequest {
    /// Cell occupied at `departure`.
    pub start: Position,
    /// Target cell.
    pub goal: Position,
    /// Tick at which the agent is at `start`.
    pub departure: Tick,
    /// Latest tick a route may reach. `None` leaves the search unbounded,
    /// which may not terminate if the goal is permanently blocked.
    pub max_tick: Option<Tick>,
}

impl SpaceTimeRequest {
    /// Creates an unbounded request.
    pub fn new(start: Position, goal: Position, departure: Tick) -> Self {
        Self {
            start,
            goal,
            departure,
            max_tick: None,
        }
    }

    /// Bounds the search to routes ending no later than `max_tick`.
    pub fn with_max_tick(mut self, max_tick: Tick) -> Self {
        self.max_tick = Some(max_tick);
        self
    }
}

type State = (Position, Tick);

/// Finds the lowest-cost route for `request` that never enters a reserved
/// `(cell, tick)`.
///
/// The start state itself is not checked against `reservations`. Returns the
/// spatial route (ticks stripped) or `None` if no route exists within the
/// tick bound.
pub fn find_path_spacetime(
    grid: &Grid,
    request: &SpaceTimeRequest,
    reservations: &ReservationTable,
    obstacles: Option<&HashSet<Position>>,
) -> Option<Vec<Position>> {
    let SpaceTimeRequest {
        start,
        goal,
        departure,
        max_tick,
    } = *request;
    if !grid.is_valid(start) || !grid.is_valid(goal) {
        return None;
    }
    let blocked = |p: &Position| obstacles.is_some_and(|o| o.contains(p));
    let costs = grid.move_costs();
    let start_state: State = (start, departure);

    let mut counter: u64 = 0;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        f_score: 0.0,
        order: counter,
        node: start_state,
    });
    counter += 1;

    let mut queued: HashSet<State> = HashSet::from([start_state]);
    let mut closed: HashSet<State> = HashSet::new();
    let mut came_from: HashMap<State, State> = HashMap::new();
    let mut g_score: HashMap<State, f64> = HashMap::from([(start_state, 0.0)]);

    while let Some(OpenEntry { node: current, .. }) = open.pop() {
        if closed.contains(&current) {
            continue;
        }
        let (position, tick) = current;
        if position == goal {
            let states = reconstruct(&came_from, current);
            return Some(states.into_iter().map(|(p, _)| p).collect());
        }

        queued.remove(&current);
        closed.insert(current);

        let next_tick = tick + 1;
        if max_tick.is_some_and(|limit| next_tick > limit) {
            continue;
        }
        let g_current = g_score[&current];

        for neighbor in grid.neighbors(position) {
            let next: State = (neighbor, next_tick);
            if blocked(&neighbor)
                || reservations.is_reserved(neighbor, next_tick)
                || closed.contains(&next)
            {
                continue;
            }

            let tentative = g_current + costs.between(position, neighbor);
            if g_score.get(&next).map_or(true, |&g| tentative < g) {
                came_from.insert(next, current);
                g_score.insert(next, tentative);

                if queued.insert(next) {
                    let f_score = tentative + grid.euclidean_distance(neighbor, goal);
                    open.push(OpenEntry {
                        f_score,
                        order: counter,
                        node: next,
                    });
                    counter += 1;
                }
            }
        }
    }

    None
}
