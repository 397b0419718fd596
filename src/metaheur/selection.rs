//! Selection operators.

use rand::seq::index;
use rand::Rng;

use super::Individual;

/// Tournament selection.
///
/// Draws `size` distinct members uniformly at random and returns the
/// fittest; ties go to the earliest draw. Separate tournaments sample
/// independently, so the same member may win several. Returns `None` for an
/// empty population or a zero-size tournament.
///
/// # Panics
/// If `size` exceeds the population length.
pub fn tournament_select<'a, I: Individual, R: Rng + ?Sized>(
    population: &'a [I],
    size: usize,
    rng: &mut R,
) -> Option<&'a I> {
    if population.is_empty() || size == 0 {
        return None;
    }
    index::sample(rng, population.len(), size)
        .iter()
        .map(|i| &population[i])
        .reduce(|best, candidate| {
            if candidate.fitness() > best.fitness() {
                candidate
            } else {
                best
            }
        })
}

/// Number of elites carried over unchanged: `ceil(population / 10)`, at
/// least one.
#[inline]
pub fn elite_count(population_size: usize) -> usize {
    population_size.div_ceil(10).max(1)
}

/// Deep copies of the `count` fittest members, best first. Members with
/// equal fitness keep their population order.
pub fn select_elite<I: Individual>(population: &[I], count: usize) -> Vec<I> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| population[b].fitness().total_cmp(&population[a].fitness()));
    order
        .into_iter()
        .take(count)
        .map(|i| population[i].clone())
        .collect()
}

/// Index of the fittest member (first on ties). 0 for an empty slice.
pub fn best_index<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, member) in population.iter().enumerate().skip(1) {
        if member.fitness() > population[best].fitness() {
            best = i;
        }
    }
    best
}
