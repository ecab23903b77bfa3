//! Composite score calculation.

use crate::models::{Criterion, GameRating};

/// Compute the composite 0–100 score for a rating vector.
///
/// Each criterion contributes `value × weight × 10`; with all weights summing
/// to 1.0 and raw values in 1..=10, a perfect all-ten rating maps to exactly
/// 100. The sum is rounded half away from zero (`f64::round`), which for
/// these strictly positive terms behaves as round-half-up; this is the
/// documented tie-breaking convention.
///
/// The function is total and deterministic over the valid input domain.
/// Out-of-range fields are not checked here; the rating editor clamps its
/// buffer to 1..=10 before anything is saved.
pub fn composite_score(rating: &GameRating) -> u8 {
    let sum: f64 = Criterion::ALL
        .iter()
        .map(|&criterion| f64::from(rating.get(criterion)) * criterion.weight() * 10.0)
        .sum();
    sum.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_rating_scores_one_hundred() {
        assert_eq!(composite_score(&GameRating::uniform(10)), 100);
    }

    #[test]
    fn minimal_rating_scores_ten() {
        assert_eq!(composite_score(&GameRating::uniform(1)), 10);
    }

    #[test]
    fn worked_example_from_the_seed_library() {
        // 9*2 + 10*1 + 10*1.5 + 8*2.5 + 9*1 + 9*1 + 10*1 = 91
        let rating = GameRating {
            story: 9,
            context: 10,
            atmosphere: 10,
            gameplay: 8,
            visual: 9,
            sound: 9,
            personal: 10,
        };
        assert_eq!(composite_score(&rating), 91);
    }

    #[test]
    fn equal_vectors_yield_equal_scores() {
        let a = GameRating {
            story: 3,
            context: 7,
            atmosphere: 2,
            gameplay: 9,
            visual: 4,
            sound: 6,
            personal: 8,
        };
        let b = a;
        assert_eq!(composite_score(&a), composite_score(&b));
    }

    #[test]
    fn half_values_round_up() {
        // story 1, gameplay 1, everything else 10 gives
        // 2 + 10 + 15 + 2.5 + 10 + 10 + 10 = 59.5, rounded up to 60.
        let rating = GameRating {
            story: 1,
            context: 10,
            atmosphere: 10,
            gameplay: 1,
            visual: 10,
            sound: 10,
            personal: 10,
        };
        assert_eq!(composite_score(&rating), 60);
    }

    #[test]
    fn scores_stay_inside_bounds() {
        for value in 1..=10 {
            let score = composite_score(&GameRating::uniform(value));
            assert!((10..=100).contains(&score), "score {score} out of range");
        }
    }
}
