//! Fleet crossover and mutation operators.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::evaluation::detect_collisions;
use crate::metaheur::Individual;
use crate::models::{AgentDemand, AgentId, Grid, Solution, Tick};
use crate::pathfinding::{find_path_spacetime, ReservationTable, SpaceTimeRequest};

// ======================== Crossover ========================

/// Single-point crossover on the agent index.
///
/// Picks a cut `k` in `[1, fleet - 1]` and swaps route and departure of
/// every agent `>= k` between the two children. Each child's plan at every
/// index is therefore identical to one of the parents' plans at that index.
/// Fleets of one agent (or none) are returned unchanged.
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &Solution,
    parent2: &Solution,
    rng: &mut R,
) -> (Solution, Solution) {
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    child1.set_fitness(f64::NEG_INFINITY);
    child2.set_fitness(f64::NEG_INFINITY);

    let len = child1.len().min(child2.len());
    if len <= 1 {
        return (child1, child2);
    }

    let cut = rng.random_range(1..len);
    let (plans1, plans2) = (child1.plans_mut(), child2.plans_mut());
    for (a, b) in plans1[cut..len].iter_mut().zip(&mut plans2[cut..len]) {
        std::mem::swap(&mut a.route, &mut b.route);
        std::mem::swap(&mut a.departure, &mut b.departure);
    }
    (child1, child2)
}

// ======================== Mutation ========================

/// Timing mutation: each agent independently, with probability `rate`,
/// gets a uniformly random departure in `[0, max_departure]`.
///
/// Returns how many agents were re-timed.
pub fn mutate_departure_times<R: Rng + ?Sized>(
    solution: &mut Solution,
    rate: f64,
    max_departure: Tick,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for plan in solution.plans_mut() {
        if rng.random::<f64>() < rate {
            plan.departure = rng.random_range(0..=max_departure);
            mutated += 1;
        }
    }
    mutated
}

/// Result of a conflict-repair attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The solution had no collisions within the horizon.
    NoConflicts,
    /// The agent received a new route (departure unchanged).
    Rerouted { agent_id: AgentId },
    /// No conflict-free route exists for the agent; it was left unchanged.
    NoRoute { agent_id: AgentId },
}

/// Conflict-repair mutation.
///
/// Picks one agent uniformly among those involved in any collision, freezes
/// every other agent's occupancy into a [`ReservationTable`] and re-plans
/// the chosen agent with space-time A* from its current departure tick. The
/// search is cut off `horizon` ticks after departure.
///
/// Best effort: a single pass does not guarantee a collision-free solution.
pub fn repair_conflicts<R: Rng + ?Sized>(
    solution: &mut Solution,
    demands: &[AgentDemand],
    grid: &Grid,
    horizon: Tick,
    rng: &mut R,
) -> RepairOutcome {
    let report = detect_collisions(solution, horizon);
    if report.is_empty() {
        return RepairOutcome::NoConflicts;
    }

    let involved: Vec<AgentId> = report.involved_agents().into_iter().collect();
    let Some(&agent_id) = involved.choose(rng) else {
        return RepairOutcome::NoConflicts;
    };
    let (Some(demand), Some(plan)) = (demands.get(agent_id), solution.plan(agent_id)) else {
        return RepairOutcome::NoRoute { agent_id };
    };

    let table = ReservationTable::from_solution_excluding(solution, agent_id);
    let request = SpaceTimeRequest::new(demand.origin, demand.destination, plan.departure)
        .with_max_tick(plan.departure.saturating_add(horizon));

    match find_path_spacetime(grid, &request, &table, None) {
        Some(route) => {
            if let Some(plan) = solution.plan_mut(agent_id) {
                plan.route = route;
            }
            tracing::trace!(agent_id, collisions = report.count(), "rerouted colliding agent");
            RepairOutcome::Rerouted { agent_id }
        }
        None => {
            tracing::trace!(agent_id, "no conflict-free route; agent unchanged");
            RepairOutcome::NoRoute { agent_id }
        }
    }
}
