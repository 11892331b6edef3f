//! Tempo factor decomposition for ffmpeg's `atempo` filter.

use crate::constants::atempo;

/// Decompose a tempo factor into chained `atempo` stage values.
///
/// A single `atempo` stage only accepts factors in [0.5, 2.0]. Factors
/// outside that range are realized by emitting saturated 2.0 (or 0.5)
/// stages until the remainder fits, then the remainder itself unless it
/// reduced to exactly 1.0. The product of the emitted stages equals the
/// requested factor, and every stage lies within the accepted range.
///
/// An empty vector means the factor is 1.0 and no filtering is needed.
#[allow(clippy::float_cmp)]
pub fn tempo_stages(factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = factor;

    while remaining > atempo::MAX_STAGE {
        stages.push(atempo::MAX_STAGE);
        remaining /= atempo::MAX_STAGE;
    }
    while remaining < atempo::MIN_STAGE {
        stages.push(atempo::MIN_STAGE);
        remaining /= atempo::MIN_STAGE;
    }
    if remaining != 1.0 {
        stages.push(remaining);
    }

    stages
}

/// Build the `-filter:a` argument from a stage list.
///
/// Stages are joined in order: `atempo=2,atempo=1.5`.
pub fn filter_argument(stages: &[f64]) -> String {
    stages
        .iter()
        .map(|stage| format!("atempo={stage}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn assert_invariants(factor: f64) {
        let stages = tempo_stages(factor);
        let product: f64 = stages.iter().product();
        assert!(
            ((product - factor) / factor).abs() < 1e-9,
            "factor {factor}: stage product {product} drifted"
        );
        for stage in &stages {
            assert!(
                (atempo::MIN_STAGE..=atempo::MAX_STAGE).contains(stage),
                "factor {factor}: stage {stage} out of range"
            );
        }
    }

    #[test]
    fn test_product_and_bounds_across_factor_spread() {
        for factor in [
            0.01, 0.1, 0.3, 0.5, 0.6, 0.75, 1.25, 1.5, 2.0, 2.5, 3.0, 5.0, 7.5, 16.0, 99.0, 100.0,
        ] {
            assert_invariants(factor);
        }
    }

    #[test]
    fn test_in_range_factor_is_single_stage() {
        assert_eq!(tempo_stages(1.5), vec![1.5]);
        assert_eq!(tempo_stages(0.5), vec![0.5]);
        assert_eq!(tempo_stages(2.0), vec![2.0]);
    }

    #[test]
    fn test_unity_factor_needs_no_stages() {
        assert!(tempo_stages(1.0).is_empty());
    }

    #[test]
    fn test_power_of_two_factor_drops_unity_remainder() {
        assert_eq!(tempo_stages(4.0), vec![2.0, 2.0]);
        assert_eq!(tempo_stages(8.0), vec![2.0, 2.0, 2.0]);
        assert_eq!(tempo_stages(0.25), vec![0.5, 0.5]);
    }

    #[test]
    fn test_large_factor_saturates_then_remainders() {
        assert_eq!(tempo_stages(3.0), vec![2.0, 1.5]);
        assert_eq!(tempo_stages(7.5), vec![2.0, 2.0, 1.875]);
    }

    #[test]
    fn test_small_factor_saturates_low_stages() {
        assert_eq!(tempo_stages(0.3), vec![0.5, 0.6]);
    }

    #[test]
    fn test_filter_argument_joins_in_order() {
        assert_eq!(filter_argument(&[2.0, 2.0, 1.875]), "atempo=2,atempo=2,atempo=1.875");
        assert_eq!(filter_argument(&[0.5]), "atempo=0.5");
    }
}
