use alloc::vec::Vec;

use super::*;

/// Uniformly shuffles all cell positions with a seeded RNG, then places mines like
/// [`ShuffledMinefieldGenerator`]. The same seed always yields the same board.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Permutation of every position of a `config` board.
    pub fn shuffled_positions(&self, config: GameConfig) -> Vec<usize> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::SliceRandom;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut positions: Vec<usize> = (0..usize::from(config.total_cells())).collect();
        positions.shuffle(&mut rng);
        positions
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        config.validate()?;
        log::debug!(
            "Generating {0}x{0} board with {1} mines, seed: {2}",
            config.side,
            config.mines,
            self.seed
        );

        ShuffledMinefieldGenerator::new(self.shuffled_positions(config)).generate(config)
    }
}
