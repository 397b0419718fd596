//! Collision detection.
//!
//! Scans a solution tick by tick, buckets present agents by cell and reports
//! every unordered pair sharing a cell. Only exact same-cell-same-tick
//! occupancy is detected: two agents swapping adjacent cells between ticks
//! pass through each other without being reported.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{AgentId, Position, Solution, Tick};

/// Two agents occupying the same cell at the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// Tick of the collision.
    pub tick: Tick,
    /// Lower agent id of the pair.
    pub first: AgentId,
    /// Higher agent id of the pair.
    pub second: AgentId,
}

/// All collisions of a solution, ordered by tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    collisions: Vec<Collision>,
}

impl ConflictReport {
    /// Total number of colliding pair-ticks.
    #[inline]
    pub fn count(&self) -> usize {
        self.collisions.len()
    }

    /// Whether the solution is collision-free within the horizon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Collisions in detection order.
    #[inline]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Consumes the report, returning the collisions.
    pub fn into_collisions(self) -> Vec<Collision> {
        self.collisions
    }

    /// Every agent involved in at least one collision, ascending.
    pub fn involved_agents(&self) -> BTreeSet<AgentId> {
        self.collisions
            .iter()
            .flat_map(|c| [c.first, c.second])
            .collect()
    }
}

/// Detects collisions for ticks `0..horizon`.
pub fn detect_collisions(solution: &Solution, horizon: Tick) -> ConflictReport {
    let end = horizon.min(solution.makespan().saturating_add(1));
    let mut buckets = TickBuckets::default();
    let mut collisions = Vec::new();
    for tick in 0..end {
        buckets.fill(solution, tick);
        buckets.emit_pairs(tick, &mut collisions);
    }
    ConflictReport { collisions }
}

/// Collisions at a single tick.
pub fn collisions_at(solution: &Solution, tick: Tick) -> Vec<Collision> {
    let mut buckets = TickBuckets::default();
    let mut collisions = Vec::new();
    buckets.fill(solution, tick);
    buckets.emit_pairs(tick, &mut collisions);
    collisions
}

/// Per-tick cell buckets, reused across ticks. Cells keep first-seen order
/// so pair emission is deterministic.
#[derive(Default)]
struct TickBuckets {
    index: HashMap<Position, usize>,
    occupants: Vec<Vec<AgentId>>,
    used: usize,
}

impl TickBuckets {
    fn fill(&mut self, solution: &Solution, tick: Tick) {
        self.index.clear();
        for bucket in &mut self.occupants[..self.used] {
            bucket.clear();
        }
        self.used = 0;

        for plan in solution.plans() {
            let Some(pos) = plan.position_at(tick) else {
                continue;
            };
            let slot = match self.index.get(&pos) {
                Some(&slot) => slot,
                None => {
                    let slot = self.used;
                    if self.occupants.len() == slot {
                        self.occupants.push(Vec::new());
                    }
                    self.used += 1;
                    self.index.insert(pos, slot);
                    slot
                }
            };
            self.occupants[slot].push(plan.agent_id);
        }
    }

    fn emit_pairs(&self, tick: Tick, out: &mut Vec<Collision>) {
        for ids in self.occupants[..self.used].iter().filter(|b| b.len() > 1) {
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    out.push(Collision {
                        tick,
                        first: a.min(b),
                        second: a.max(b),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;

    fn p(r: i32, c: i32) -> Position {
        Position::new(r, c)
    }

    #[test]
    fn test_no_collisions_when_staggered() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(0, 1), p(0, 2)], 0),
            Plan::new(1, vec![p(0, 0), p(0, 1), p(0, 2)], 1),
        ]);
        assert!(detect_collisions(&s, 100).is_empty());
    }

    #[test]
    fn test_same_cell_same_tick() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(1, 1), p(2, 2)], 0),
            Plan::new(1, vec![p(2, 0), p(1, 1), p(0, 2)], 0),
        ]);
        let report = detect_collisions(&s, 100);
        assert_eq!(report.count(), 1);
        assert_eq!(
            report.collisions()[0],
            Collision { tick: 1, first: 0, second: 1 }
        );
    }

    #[test]
    fn test_three_way_emits_all_pairs() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(1, 1)], 0),
            Plan::new(1, vec![p(2, 2), p(1, 1)], 0),
            Plan::new(2, vec![p(0, 2), p(1, 1)], 0),
        ]);
        let report = detect_collisions(&s, 100);
        assert_eq!(report.count(), 3);
        let pairs: Vec<(AgentId, AgentId)> =
            report.collisions().iter().map(|c| (c.first, c.second)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert!(report.collisions().iter().all(|c| c.first < c.second));
    }

    #[test]
    fn test_swap_not_detected() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(0, 1)], 0),
            Plan::new(1, vec![p(0, 1), p(0, 0)], 0),
        ]);
        assert!(detect_collisions(&s, 100).is_empty());
    }

    #[test]
    fn test_absent_agents_never_collide() {
        // Agent 1 departs after agent 0 has landed on the same cell.
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(0, 1)], 0),
            Plan::new(1, vec![p(0, 1), p(0, 2)], 2),
        ]);
        assert!(detect_collisions(&s, 100).is_empty());
    }

    #[test]
    fn test_horizon_limits_scan() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(1, 1)], 5),
            Plan::new(1, vec![p(2, 2), p(1, 1)], 5),
        ]);
        assert_eq!(detect_collisions(&s, 6).count(), 0);
        assert_eq!(detect_collisions(&s, 7).count(), 1);
    }

    #[test]
    fn test_repeated_pair_counted_per_tick() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(0, 1), p(0, 2)], 0),
            Plan::new(1, vec![p(0, 0), p(0, 1), p(0, 2)], 0),
        ]);
        let report = detect_collisions(&s, 100);
        assert_eq!(report.count(), 3);
        assert_eq!(report.involved_agents().into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_collisions_at_single_tick() {
        let s = Solution::new(vec![
            Plan::new(0, vec![p(0, 0), p(1, 1)], 0),
            Plan::new(1, vec![p(2, 2), p(1, 1)], 0),
        ]);
        assert!(collisions_at(&s, 0).is_empty());
        assert_eq!(collisions_at(&s, 1).len(), 1);
    }
}
