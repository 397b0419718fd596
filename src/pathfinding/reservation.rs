//! Space-time reservation table.
//!
//! A frozen snapshot of which agent occupies which cell at which tick,
//! keyed by a dedicated composite key. Only occupied cells are stored, so
//! the table stays proportional to the fleet's total route length rather
//! than to `cells × horizon`.

use std::collections::HashMap;

use crate::models::{AgentId, Position, Solution, Tick};

/// Composite `(cell, tick)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceTimeCell {
    pub position: Position,
    pub tick: Tick,
}

impl SpaceTimeCell {
    #[inline]
    pub fn new(position: Position, tick: Tick) -> Self {
        Self { position, tick }
    }
}

/// Map from `(cell, tick)` to the occupying agent.
#[derive(Debug, Clone, Default)]
pub struct ReservationTable {
    cells: HashMap<SpaceTimeCell, AgentId>,
}

impl ReservationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves every cell of every plan in `solution` except `excluded`'s,
    /// from each plan's departure tick onward.
    pub fn from_solution_excluding(solution: &Solution, excluded: AgentId) -> Self {
        let mut table = Self::new();
        for plan in solution.plans().iter().filter(|p| p.agent_id != excluded) {
            for (tick, position) in plan.occupancy() {
                table.reserve(position, tick, plan.agent_id);
            }
        }
        table
    }

    /// Marks `(position, tick)` as occupied by `agent`. Later reservations
    /// of the same key overwrite earlier ones.
    pub fn reserve(&mut self, position: Position, tick: Tick, agent: AgentId) {
        self.cells.insert(SpaceTimeCell::new(position, tick), agent);
    }

    /// Whether `(position, tick)` is occupied.
    #[inline]
    pub fn is_reserved(&self, position: Position, tick: Tick) -> bool {
        self.cells.contains_key(&SpaceTimeCell::new(position, tick))
    }

    /// Agent occupying `(position, tick)`, if any.
    #[inline]
    pub fn occupant(&self, position: Position, tick: Tick) -> Option<AgentId> {
        self.cells.get(&SpaceTimeCell::new(position, tick)).copied()
    }

    /// Number of reserved `(cell, tick)` pairs.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
