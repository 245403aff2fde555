//! Evolutionary move search.
//!
//! A population of random chromosomes (9-cell game plans) is evolved for a
//! fixed number of generations:
//! - Fitness: the number of playouts a chromosome produces that are won by
//!   the second simulated actor
//! - Elitism: the fittest chromosome survives unchanged
//! - Reproduction: uniform parent sampling, single-point crossover
//! - Mutation: one gene replaced by a cell that is empty on the real board
//!
//! The move itself is then picked by a one-ply heuristic over the real board
//! (win now, else block, else the first legal cell). The evolved population
//! does not feed into that choice; [`EvolutionarySearch::evolve`] exposes it
//! for inspection.

use log::{debug, trace};
use thiserror::Error;

use crate::board::{Board, Mark};
use crate::constants::{
    CELLS, CROSSOVER_MAX, CROSSOVER_MIN, ELITE_COUNT, GENERATIONS, HEURISTIC_BLOCK,
    HEURISTIC_WIN, MUTATION_RATE, PLAYOUTS_PER_CHROMOSOME, POPULATION_SIZE,
};
use crate::playout::{Chromosome, playout_score};

/// Tunable parameters of the evolutionary loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub playouts: usize,
    pub mutation_rate: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            generations: GENERATIONS,
            playouts: PLAYOUTS_PER_CHROMOSOME,
            mutation_rate: MUTATION_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size {0} is too small (need at least {min})", min = ELITE_COUNT + 1)]
    PopulationTooSmall(usize),
    #[error("mutation rate {0} must be within [0, 1]")]
    MutationRate(f64),
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size <= ELITE_COUNT {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// The state of the population after evolving.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// The final generation.
    pub population: Vec<Chromosome>,
    /// Best fitness seen in the last evaluated generation (0 if none ran).
    pub best_fitness: u32,
    /// Fittest chromosome of the last evaluated generation.
    pub champion: Option<Chromosome>,
}

/// Evolutionary search engine.
pub struct EvolutionarySearch {
    config: EvolutionConfig,
    rng: fastrand::Rng,
}

impl Default for EvolutionarySearch {
    fn default() -> Self {
        Self::new()
    }
}

impl EvolutionarySearch {
    /// Create an engine with default parameters and an entropy-seeded random source.
    pub fn new() -> Self {
        Self {
            config: EvolutionConfig::default(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Create an engine with default parameters and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: EvolutionConfig::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn with_config(config: EvolutionConfig, rng: fastrand::Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Choose a move for `mover`, or `None` if the board is full.
    pub fn choose_move(&mut self, board: &Board, mover: Mark) -> Option<usize> {
        if board.is_full() {
            return None;
        }
        let evolution = self.evolve(board, mover);
        let cell = heuristic_move(board, mover)?;
        debug!(
            "evolutionary search: {mover} plays {cell} (best fitness {}/{})",
            evolution.best_fitness, self.config.playouts
        );
        Some(cell)
    }

    /// Run the evolutionary loop from `board` with `mover` acting first in
    /// every simulation.
    pub fn evolve(&mut self, board: &Board, mover: Mark) -> Evolution {
        let reference = mover.opponent();
        let empty = board.legal_moves();

        let mut population: Vec<Chromosome> = (0..self.config.population_size)
            .map(|_| self.random_chromosome())
            .collect();
        let mut best_fitness = 0;
        let mut champion = None;

        for generation in 0..self.config.generations {
            let fitness: Vec<u32> = population
                .iter()
                .map(|c| self.fitness(board, c, mover, reference))
                .collect();

            let elites = elite_indices(&fitness, ELITE_COUNT);
            best_fitness = elites.first().map_or(0, |&i| fitness[i]);
            champion = elites.first().map(|&i| population[i]);
            trace!("generation {generation}: best fitness {best_fitness}");

            let mut next: Vec<Chromosome> = elites.iter().map(|&i| population[i]).collect();
            while next.len() < self.config.population_size {
                let a = population[self.rng.usize(..population.len())];
                let b = population[self.rng.usize(..population.len())];
                let mut child = self.crossover(&a, &b);
                self.mutate(&mut child, &empty);
                next.push(child);
            }
            population = next;
        }

        Evolution {
            population,
            best_fitness,
            champion,
        }
    }

    /// Nine independent uniform cell indices.
    pub fn random_chromosome(&mut self) -> Chromosome {
        std::array::from_fn(|_| self.rng.usize(..CELLS))
    }

    /// Sum of playout scores for `reference` over the configured number of playouts.
    pub fn fitness(&self, board: &Board, chromosome: &Chromosome, first: Mark, reference: Mark) -> u32 {
        (0..self.config.playouts)
            .map(|_| playout_score(board, chromosome, first, reference))
            .sum()
    }

    /// Prefix of `a` up to a random cut, then the suffix of `b`.
    pub fn crossover(&mut self, a: &Chromosome, b: &Chromosome) -> Chromosome {
        let cut = self.rng.usize(CROSSOVER_MIN..=CROSSOVER_MAX);
        let mut child = *b;
        child[..cut].copy_from_slice(&a[..cut]);
        child
    }

    /// With the configured probability, overwrite one random gene with a
    /// random cell from `empty`.
    pub fn mutate(&mut self, chromosome: &mut Chromosome, empty: &[usize]) {
        if empty.is_empty() || self.rng.f64() >= self.config.mutation_rate {
            return;
        }
        let gene = self.rng.usize(..CELLS);
        chromosome[gene] = empty[self.rng.usize(..empty.len())];
    }
}

/// Indices of the `count` fittest chromosomes; earlier entries win ties.
fn elite_indices(fitness: &[u32], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].cmp(&fitness[a]));
    order.truncate(count);
    order
}

/// One-ply score of playing `cell`: win now, block an opponent win, or neither.
///
/// `cell` must be empty.
pub fn heuristic_score(board: &Board, cell: usize, mover: Mark) -> u8 {
    if board.with_move(cell, mover).winner(mover).is_some() {
        HEURISTIC_WIN
    } else {
        let opponent = mover.opponent();
        if board.with_move(cell, opponent).winner(opponent).is_some() {
            HEURISTIC_BLOCK
        } else {
            0
        }
    }
}

/// The legal move with the highest [`heuristic_score`], first cell on ties.
pub fn heuristic_move(board: &Board, mover: Mark) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for cell in board.legal_moves() {
        let score = heuristic_score(board, cell, mover);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((cell, score));
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 10,
            generations: 5,
            playouts: 2,
            mutation_rate: 0.5,
        }
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 50);
        assert_eq!(config.playouts, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = small_config();
        config.population_size = 1;
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));

        let mut config = small_config();
        config.mutation_rate = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::MutationRate(1.5)));
    }

    #[test]
    fn test_crossover_splices_parents() {
        let mut engine = EvolutionarySearch::with_seed(7);
        let a = [0; CELLS];
        let b = [8; CELLS];
        for _ in 0..50 {
            let child = engine.crossover(&a, &b);
            let cut = child.iter().position(|&g| g == 8).unwrap();
            assert!((CROSSOVER_MIN..=CROSSOVER_MAX).contains(&cut));
            assert!(child[..cut].iter().all(|&g| g == 0));
            assert!(child[cut..].iter().all(|&g| g == 8));
        }
    }

    #[test]
    fn test_mutation_draws_from_empty_cells() {
        let config = EvolutionConfig {
            mutation_rate: 1.0,
            ..small_config()
        };
        let mut engine = EvolutionarySearch::with_config(config, fastrand::Rng::with_seed(3)).unwrap();
        for _ in 0..50 {
            let mut chromosome = [0; CELLS];
            engine.mutate(&mut chromosome, &[6]);
            assert_eq!(chromosome.iter().filter(|&&g| g == 6).count(), 1);
        }
    }

    #[test]
    fn test_mutation_rate_zero_never_mutates() {
        let config = EvolutionConfig {
            mutation_rate: 0.0,
            ..small_config()
        };
        let mut engine = EvolutionarySearch::with_config(config, fastrand::Rng::with_seed(3)).unwrap();
        let mut chromosome = [0; CELLS];
        for _ in 0..50 {
            engine.mutate(&mut chromosome, &[6]);
        }
        assert_eq!(chromosome, [0; CELLS]);
    }

    #[test]
    fn test_elites_prefer_first_on_ties() {
        assert_eq!(elite_indices(&[3, 7, 7, 1], 1), vec![1]);
        assert_eq!(elite_indices(&[3, 7, 7, 1], 2), vec![1, 2]);
    }

    #[test]
    fn test_evolve_keeps_population_size_and_gene_range() {
        let mut engine =
            EvolutionarySearch::with_config(small_config(), fastrand::Rng::with_seed(11)).unwrap();
        let board: Board = "X...O....".parse().unwrap();
        let evolution = engine.evolve(&board, Mark::X);
        assert_eq!(evolution.population.len(), 10);
        assert!(evolution.population.iter().flatten().all(|&g| g < CELLS));
        assert!(evolution.best_fitness <= 2);
        assert!(evolution.champion.is_some());
    }

    #[test]
    fn test_fitness_counts_opponent_wins() {
        let engine = EvolutionarySearch::with_config(small_config(), fastrand::Rng::with_seed(1)).unwrap();
        let board: Board = "OO.XX....".parse().unwrap();
        // X (acting first) completes 3-4-5 at once.
        let x_wins = [5, 2, 6, 7, 8, 0, 1, 3, 4];
        // X's first gene is occupied, so O completes the top row.
        let o_wins = [0, 2, 1, 6, 3, 7, 4, 8, 0];

        assert_eq!(engine.fitness(&board, &x_wins, Mark::X, Mark::X.opponent()), 0);
        assert_eq!(engine.fitness(&board, &o_wins, Mark::X, Mark::X.opponent()), 2);
        assert_eq!(engine.fitness(&board, &x_wins, Mark::X, Mark::X), 2);
    }

    #[test]
    fn test_elite_survives_unchanged() {
        let config = EvolutionConfig {
            generations: 1,
            ..small_config()
        };
        let board: Board = "X...O....".parse().unwrap();

        // Rebuild the initial population from the same random stream.
        let mut shadow = EvolutionarySearch::with_config(config, fastrand::Rng::with_seed(21)).unwrap();
        let initial: Vec<Chromosome> = (0..config.population_size)
            .map(|_| shadow.random_chromosome())
            .collect();
        let fitness: Vec<u32> = initial
            .iter()
            .map(|c| shadow.fitness(&board, c, Mark::X, Mark::O))
            .collect();
        let mut best = 0;
        for (i, &f) in fitness.iter().enumerate() {
            if f > fitness[best] {
                best = i;
            }
        }

        let mut engine = EvolutionarySearch::with_config(config, fastrand::Rng::with_seed(21)).unwrap();
        let evolution = engine.evolve(&board, Mark::X);
        assert_eq!(evolution.best_fitness, fitness[best]);
        assert_eq!(evolution.champion, Some(initial[best]));
        assert_eq!(evolution.population[0], initial[best]);
    }

    #[test]
    fn test_heuristic_scores() {
        // X threatens 2 (top row); O threatens 5 (middle row).
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(heuristic_score(&board, 2, Mark::X), HEURISTIC_WIN);
        assert_eq!(heuristic_score(&board, 5, Mark::X), HEURISTIC_BLOCK);
        assert_eq!(heuristic_score(&board, 8, Mark::X), 0);
        assert_eq!(heuristic_move(&board, Mark::X), Some(2));
        assert_eq!(heuristic_move(&board, Mark::O), Some(5));
    }
}
