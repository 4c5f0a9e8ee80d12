//! Helpers for building static evaluation functions.
//!
//! Game heuristics are weighted sums of features seen from the maximizer's side. `ScoreCard`
//! keeps that bookkeeping in one place so models only declare their terms.

use crate::alpha_beta_searcher::{Score, Side};

/// Accumulates weighted terms into a maximizer-relative score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreCard {
    total: Score,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight * value` in favor of `side`: positive for the maximizer, negated for the
    /// minimizer.
    pub fn add_for(&mut self, side: Side, weight: Score, value: Score) -> &mut Self {
        self.total += side.sign() * weight * value;
        self
    }

    pub fn total(&self) -> Score {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_card_signs_terms_by_side() {
        let mut card = ScoreCard::new();
        card.add_for(Side::Maximizer, 2.0, 100.0)
            .add_for(Side::Minimizer, 2.0, 30.0);

        assert_eq!(card.total(), 200.0 - 60.0);
    }

    #[test]
    fn test_zero_weight_terms_do_not_contribute() {
        let mut card = ScoreCard::new();
        card.add_for(Side::Maximizer, 0.0, 1234.0);

        assert_eq!(card.total(), 0.0);
    }
}
