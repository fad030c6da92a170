//! Breeding pool for evolved network genomes.
//!
//! Maintains a bounded pool of scored networks sorted by fitness and spawns
//! children by crossover of two fit parents, or by cloning with mutation
//! when only one genome is available.

use rand::Rng;

use super::error::NetError;
use super::network::Network;

/// Bounds for the log-uniform mutation-rate sample.
const MIN_MUTATION_RATE: f64 = 0.001;
const MAX_MUTATION_RATE: f64 = 0.1;

/// Fraction of the pool eligible as breeding parents.
const PARENT_FRACTION: f64 = 0.15;

/// A network genome together with the fitness an external evaluator
/// assigned to it.
#[derive(Debug, Clone)]
pub struct Scored {
    /// The evolved network.
    pub network: Network,
    /// Fitness score, higher is better.
    pub fitness: f64,
}

/// Fitness-sorted bounded pool of genomes for breeding selection.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    /// Pool of scored genomes, fittest first.
    pool: Vec<Scored>,
    /// Maximum pool size; recording past this drops the least fit.
    capacity: usize,
}

impl EvolutionEngine {
    /// Creates an empty pool with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a scored genome, keeping the pool sorted by fitness and
    /// bounded by its capacity.
    ///
    /// Every genome in the pool must share one topology; a network whose
    /// layer stack differs from the pool's is rejected so that breeding
    /// can never pair incompatible parents.
    pub fn record(&mut self, network: Network, fitness: f64) -> Result<(), NetError> {
        if let Some(existing) = self.pool.first() {
            check_topology(&existing.network, &network)?;
        }
        self.pool.push(Scored { network, fitness });
        self.pool
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        self.pool.truncate(self.capacity);
        Ok(())
    }

    /// Breeds a new genome from the pool.
    ///
    /// With two or more genomes, picks two distinct parents from the top
    /// 15% (at least two candidates) and crosses them over; with exactly
    /// one, clones it. Either way the child is mutated with a rate sampled
    /// log-uniformly from [0.001, 0.1]. Returns `None` on an empty pool.
    pub fn breed<R: Rng>(&self, rng: &mut R) -> Option<Network> {
        let mutation_rate = sample_mutation_rate(rng);
        let mut child = match self.pool.len() {
            0 => return None,
            1 => self.pool[0].network.clone(),
            len => {
                let top_count = ((len as f64 * PARENT_FRACTION).max(2.0) as usize).min(len);
                let first = rng.random_range(0..top_count);
                let mut second = rng.random_range(0..top_count);
                // Ensure parents are different
                while second == first && top_count > 1 {
                    second = rng.random_range(0..top_count);
                }
                log::debug!(
                    "breeding pool ranks {} and {} at mutation rate {:.4}",
                    first,
                    second,
                    mutation_rate
                );
                self.pool[first]
                    .network
                    .crossover(&self.pool[second].network, rng)
                    .ok()?
            }
        };
        child.mutate(mutation_rate, rng);
        Some(child)
    }

    /// The fittest recorded genome, if any.
    pub fn fittest(&self) -> Option<&Scored> {
        self.pool.first()
    }

    /// The current pool, fittest first.
    pub fn pool(&self) -> &[Scored] {
        &self.pool
    }
}

fn check_topology(existing: &Network, candidate: &Network) -> Result<(), NetError> {
    if existing.layers().len() != candidate.layers().len() {
        return Err(NetError::LengthMismatch {
            expected: existing.layers().len(),
            found: candidate.layers().len(),
        });
    }
    for (own, other) in existing.layers().iter().zip(candidate.layers()) {
        if own.input_count() != other.input_count() || own.output_count() != other.output_count() {
            return Err(NetError::DimensionMismatch {
                left: (own.output_count(), own.input_count() + 1),
                right: (other.output_count(), other.input_count() + 1),
            });
        }
    }
    Ok(())
}

/// Samples a mutation rate using logarithmic random distribution.
fn sample_mutation_rate<R: Rng>(rng: &mut R) -> f64 {
    let log_min = MIN_MUTATION_RATE.ln();
    let log_max = MAX_MUTATION_RATE.ln();
    rng.random_range(log_min..log_max).exp()
}
