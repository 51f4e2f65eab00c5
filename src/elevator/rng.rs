//! Seedable randomness for the simulation.
//!
//! Every random draw (boarding count, destination, terminus reversal) goes
//! through `RandomSource` so that a seed reproduces a run exactly.

/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/***************************************/
/*             Public API              */
/***************************************/
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform floor in `1..=n_floors` other than `exclude`, redrawn on collision.
    fn floor_except(&mut self, n_floors: u8, exclude: u8) -> u8 {
        loop {
            let floor = self.range_inclusive(1, n_floors as u32) as u8;
            if floor != exclude {
                return floor;
            }
        }
    }
}

pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        SimRng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..=high)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p)
    }
}

/// Replays prepared draws; used to pin down random outcomes in tests.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedRng {
    pub values: std::collections::VecDeque<u32>,
    pub chances: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(values: &[u32], chances: &[bool]) -> Self {
        ScriptedRng {
            values: values.iter().copied().collect(),
            chances: chances.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let value = match self.values.pop_front() {
            Some(value) => value,
            None => panic!("Script exhausted: no value left for a draw in {}..={}", low, high),
        };
        assert!(
            (low..=high).contains(&value),
            "scripted draw {} outside {}..={}",
            value,
            low,
            high
        );
        value
    }

    fn chance(&mut self, p: f64) -> bool {
        match self.chances.pop_front() {
            Some(chance) => chance,
            None => panic!("Script exhausted: no chance left for p = {}", p),
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod rng_tests {
    use super::*;

    #[test]
    fn test_rng_same_seed_same_draws() {
        let mut a = SimRng::from_seed_u64(42);
        let mut b = SimRng::from_seed_u64(42);

        let draws_a: Vec<u32> = (0..32).map(|_| a.range_inclusive(0, 5)).collect();
        let draws_b: Vec<u32> = (0..32).map(|_| b.range_inclusive(0, 5)).collect();

        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|v| *v <= 5));
    }

    #[test]
    fn test_rng_floor_except_skips_excluded() {
        // Arrange: first two draws collide with the excluded floor
        let mut rng = ScriptedRng::new(&[3, 3, 4], &[]);

        // Act
        let floor = rng.floor_except(5, 3);

        // Assert
        assert_eq!(floor, 4);
        assert!(rng.values.is_empty());
    }

    #[test]
    #[should_panic(expected = "Script exhausted")]
    fn test_rng_exhausted_script_panics() {
        // A collision with nothing left to redraw must fail instead of spinning
        let mut rng = ScriptedRng::new(&[1], &[]);
        rng.floor_except(5, 1);
    }

    #[test]
    fn test_rng_floor_except_never_returns_excluded() {
        let mut rng = SimRng::from_seed_u64(1);
        for _ in 0..200 {
            let floor = rng.floor_except(5, 1);
            assert!((2..=5).contains(&floor));
        }
    }
}
