//! Scoring module - row points and the score-driven gravity curve
//!
//! Every swept row is worth a flat 10 points; multi-row clears accumulate
//! through repeated single-row sweeps, each scored independently. The drop
//! interval shrinks by 100 ms per 10 points and bottoms out at 100 ms.

use crate::types::{BASE_DROP_MS, MIN_DROP_MS};

/// Gravity interval for a given score: `max(1000 - (score/10)*100, 100)` ms.
///
/// Monotonically non-increasing as the score rises.
pub fn drop_interval_ms(score: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub((score / 10).saturating_mul(100))
        .max(MIN_DROP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROW_SCORE;

    #[test]
    fn interval_curve_values() {
        assert_eq!(drop_interval_ms(0), 1000);
        assert_eq!(drop_interval_ms(10), 900);
        assert_eq!(drop_interval_ms(20), 800);
        assert_eq!(drop_interval_ms(80), 200);
        assert_eq!(drop_interval_ms(90), 100);
        assert_eq!(drop_interval_ms(100), 100);
        assert_eq!(drop_interval_ms(1000), 100);
        assert_eq!(drop_interval_ms(u32::MAX), 100);
    }

    #[test]
    fn interval_is_monotonically_non_increasing() {
        let mut last = drop_interval_ms(0);
        for score in (0..2000).step_by(ROW_SCORE as usize) {
            let next = drop_interval_ms(score);
            assert!(next <= last);
            last = next;
        }
    }

    #[test]
    fn partial_scores_round_down() {
        // Scores between multiples of 10 use the floored step.
        assert_eq!(drop_interval_ms(9), 1000);
        assert_eq!(drop_interval_ms(19), 900);
    }
}
