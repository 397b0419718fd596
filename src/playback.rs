//! Read-only replay of a stored solution.
//!
//! Collisions are computed once up front and grouped by tick; the cursor
//! runs from tick 0 to [`Playback::last_tick`], a few ticks past the final
//! arrival and never beyond the horizon.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SnapshotError;
use crate::evaluation::{detect_collisions, Collision};
use crate::models::{AgentId, Position, Solution, Tick};
use crate::snapshot::SimulationRecord;

/// Ticks shown after the last arrival.
pub const ARRIVAL_TAIL: Tick = 10;

/// Tick cursor over one solution.
#[derive(Debug, Clone)]
pub struct Playback {
    solution: Solution,
    collisions: BTreeMap<Tick, Vec<Collision>>,
    last_tick: Tick,
    tick: Tick,
}

impl Playback {
    /// Prepares playback of `solution` within `horizon` ticks.
    pub fn new(solution: Solution, horizon: Tick) -> Self {
        let mut collisions: BTreeMap<Tick, Vec<Collision>> = BTreeMap::new();
        for collision in detect_collisions(&solution, horizon).into_collisions() {
            collisions.entry(collision.tick).or_default().push(collision);
        }
        let last_tick = solution
            .makespan()
            .saturating_add(ARRIVAL_TAIL)
            .min(horizon);
        Self {
            solution,
            collisions,
            last_tick,
            tick: 0,
        }
    }

    /// Prepares playback of a stored generation.
    pub fn from_record(
        record: &SimulationRecord,
        generation: usize,
        horizon: Tick,
    ) -> Result<Self, SnapshotError> {
        Ok(Self::new(record.solution(generation)?, horizon))
    }

    /// The replayed solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Position of every agent at `tick` (`None` while grounded).
    pub fn positions_at(&self, tick: Tick) -> Vec<(AgentId, Option<Position>)> {
        self.solution
            .plans()
            .iter()
            .map(|plan| (plan.agent_id, plan.position_at(tick)))
            .collect()
    }

    /// Number of agents airborne at `tick`.
    pub fn active_count(&self, tick: Tick) -> usize {
        self.solution
            .plans()
            .iter()
            .filter(|plan| plan.position_at(tick).is_some())
            .count()
    }

    /// Collisions at `tick`.
    pub fn collisions_at(&self, tick: Tick) -> &[Collision] {
        self.collisions.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Agents involved in a collision at `tick`.
    pub fn agents_in_collision(&self, tick: Tick) -> BTreeSet<AgentId> {
        self.collisions_at(tick)
            .iter()
            .flat_map(|c| [c.first, c.second])
            .collect()
    }

    /// Whether any collision occurs.
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Total colliding pair-ticks.
    pub fn total_collisions(&self) -> usize {
        self.collisions.values().map(Vec::len).sum()
    }

    /// Last tick the cursor can reach.
    pub fn last_tick(&self) -> Tick {
        self.last_tick
    }

    /// Current cursor tick.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Advances one tick (stops at [`last_tick`](Self::last_tick)). Returns
    /// whether the cursor moved.
    pub fn next_tick(&mut self) -> bool {
        if self.tick < self.last_tick {
            self.tick += 1;
            true
        } else {
            false
        }
    }

    /// Steps back one tick (stops at 0). Returns whether the cursor moved.
    pub fn previous_tick(&mut self) -> bool {
        if self.tick > 0 {
            self.tick -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor, clamped to `[0, last_tick]`.
    pub fn seek(&mut self, tick: Tick) {
        self.tick = tick.min(self.last_tick);
    }

    /// Rewinds to tick 0.
    pub fn reset(&mut self) {
        self.tick = 0;
    }
}
