//! Opponent move selection.
//!
//! A [`Policy`] only ever picks from the legal moves it is handed; the
//! session validates the pick again through the oracle before applying it.

use crate::types::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait Policy {
    /// Pick one of `legal`, or `None` when there is nothing to play
    fn choose(&mut self, legal: &[Move]) -> Option<Move>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn choose(&mut self, legal: &[Move]) -> Option<Move> {
        (**self).choose(legal)
    }
}

/// Uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible sequence of choices
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, legal: &[Move]) -> Option<Move> {
        legal.choose(&mut self.rng).copied()
    }
}

/// Always the first legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl Policy for FirstLegal {
    fn choose(&mut self, legal: &[Move]) -> Option<Move> {
        legal.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves() -> Vec<Move> {
        ["e2e4", "d2d4", "g1f3", "c2c4"]
            .iter()
            .map(|m| m.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_random_picks_a_member() {
        let legal = moves();
        let mut policy = RandomPolicy::new();
        for _ in 0..32 {
            let m = policy.choose(&legal).unwrap();
            assert!(legal.contains(&m));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let legal = moves();
        let mut a = RandomPolicy::seeded(7);
        let mut b = RandomPolicy::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.choose(&legal), b.choose(&legal));
        }
    }

    #[test]
    fn test_empty_set_yields_nothing() {
        assert_eq!(RandomPolicy::seeded(1).choose(&[]), None);
        assert_eq!(FirstLegal.choose(&[]), None);
        assert_eq!(FirstLegal.choose(&moves()), Some("e2e4".parse().unwrap()));
    }
}
