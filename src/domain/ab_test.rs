//! Weighted A/B variant selection and configuration checks.
//!
//! Selection is a cumulative-distribution draw over weights normalized to 100.
//! Validation reports problems as data ([`AbTestValidation`]) so editing
//! clients can show recoverable feedback instead of failing outright.

use rand::Rng;
use serde::Serialize;

use crate::domain::entities::Variant;

/// Tolerance for treating a weight sum as exactly 100.
const HUNDRED_TOLERANCE: f64 = 0.01;

/// A/B configuration errors.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbTestError {
    #[error("An A/B test needs at least 2 variants")]
    InsufficientVariants,

    #[error("Variant {index} has no URL")]
    MissingUrl { index: usize },

    #[error("Variant {index} must have a non-negative weight")]
    InvalidWeight { index: usize },

    #[error("Variant weights must not sum to zero")]
    ZeroWeightSum,
}

/// Non-blocking remarks about an otherwise valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbTestWarning {
    #[error("Weights sum to {total}% instead of 100%; they will be normalized")]
    NonHundredSum { total: f64 },
}

/// Result of [`validate_ab_tests`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbTestValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AbTestError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<AbTestWarning>,
}

impl AbTestValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            warning: None,
        }
    }

    fn failed(error: AbTestError) -> Self {
        Self {
            valid: false,
            error: Some(error),
            warning: None,
        }
    }

    fn warned(warning: AbTestWarning) -> Self {
        Self {
            valid: true,
            error: None,
            warning: Some(warning),
        }
    }
}

fn total_weight(variants: &[Variant]) -> f64 {
    variants.iter().map(|v| v.weight).sum()
}

/// Picks a variant with probability proportional to its weight.
///
/// Returns `None` for an empty slice and the first variant when all weights
/// are zero.
pub fn select_variant(variants: &[Variant]) -> Option<&Variant> {
    select_variant_with(variants, &mut rand::rng())
}

/// Same as [`select_variant`] with a caller-supplied random source.
pub fn select_variant_with<'a, R: Rng + ?Sized>(
    variants: &'a [Variant],
    rng: &mut R,
) -> Option<&'a Variant> {
    let first = variants.first()?;

    let total = total_weight(variants);
    if total == 0.0 {
        return Some(first);
    }

    let draw: f64 = rng.random_range(0.0..100.0);

    let mut cumulative = 0.0;
    for variant in variants {
        cumulative += variant.weight / total * 100.0;
        if cumulative >= draw {
            return Some(variant);
        }
    }

    // Only reachable through floating-point drift in the cumulative sum.
    variants.last()
}

/// Checks an A/B configuration before it is persisted.
///
/// An empty list is valid (no test). Errors are reported in this order:
/// single variant, missing URL, invalid weight, zero weight sum. A sum other
/// than 100 is valid but carries a warning.
pub fn validate_ab_tests(variants: &[Variant]) -> AbTestValidation {
    if variants.is_empty() {
        return AbTestValidation::ok();
    }

    if variants.len() < 2 {
        return AbTestValidation::failed(AbTestError::InsufficientVariants);
    }

    for (index, variant) in variants.iter().enumerate() {
        if variant.url.trim().is_empty() {
            return AbTestValidation::failed(AbTestError::MissingUrl { index });
        }
        if !variant.weight.is_finite() || variant.weight < 0.0 {
            return AbTestValidation::failed(AbTestError::InvalidWeight { index });
        }
    }

    let total = total_weight(variants);
    if total == 0.0 {
        return AbTestValidation::failed(AbTestError::ZeroWeightSum);
    }

    if (total - 100.0).abs() > HUNDRED_TOLERANCE {
        return AbTestValidation::warned(AbTestWarning::NonHundredSum { total });
    }

    AbTestValidation::ok()
}

/// Rescales weights so they sum to 100.
///
/// Returns the variants unchanged when the total weight is zero.
pub fn normalize_weights(variants: &[Variant]) -> Vec<Variant> {
    let total = total_weight(variants);
    if total == 0.0 {
        return variants.to_vec();
    }

    variants
        .iter()
        .map(|v| Variant {
            url: v.url.clone(),
            weight: v.weight / total * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DRAWS: usize = 20_000;

    fn frequencies(variants: &[Variant], seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = vec![0usize; variants.len()];

        for _ in 0..DRAWS {
            let chosen = select_variant_with(variants, &mut rng).unwrap();
            let index = variants.iter().position(|v| v.url == chosen.url).unwrap();
            counts[index] += 1;
        }

        counts
            .into_iter()
            .map(|c| c as f64 / DRAWS as f64)
            .collect()
    }

    #[test]
    fn test_select_empty_returns_none() {
        assert!(select_variant(&[]).is_none());
    }

    #[test]
    fn test_select_single_variant() {
        let variants = vec![Variant::new("https://a.com", 10.0)];
        assert_eq!(select_variant(&variants).unwrap().url, "https://a.com");
    }

    #[test]
    fn test_select_zero_weights_returns_first() {
        let variants = vec![
            Variant::new("https://a.com", 0.0),
            Variant::new("https://b.com", 0.0),
        ];

        for _ in 0..50 {
            assert_eq!(select_variant(&variants).unwrap().url, "https://a.com");
        }
    }

    #[test]
    fn test_select_distribution_even_split() {
        let variants = vec![
            Variant::new("https://a.com", 50.0),
            Variant::new("https://b.com", 50.0),
        ];

        let freq = frequencies(&variants, 11);

        assert!((freq[0] - 0.5).abs() < 0.02, "got {:?}", freq);
        assert!((freq[1] - 0.5).abs() < 0.02, "got {:?}", freq);
    }

    #[test]
    fn test_select_distribution_unnormalized_weights() {
        let variants = vec![
            Variant::new("https://a.com", 1.0),
            Variant::new("https://b.com", 3.0),
            Variant::new("https://c.com", 6.0),
        ];

        let freq = frequencies(&variants, 23);

        assert!((freq[0] - 0.1).abs() < 0.02, "got {:?}", freq);
        assert!((freq[1] - 0.3).abs() < 0.02, "got {:?}", freq);
        assert!((freq[2] - 0.6).abs() < 0.02, "got {:?}", freq);
    }

    #[test]
    fn test_select_never_picks_zero_weight_middle_variant() {
        let variants = vec![
            Variant::new("https://a.com", 70.0),
            Variant::new("https://never.com", 0.0),
            Variant::new("https://c.com", 30.0),
        ];

        let freq = frequencies(&variants, 5);

        assert_eq!(freq[1], 0.0);
        assert!((freq[0] - 0.7).abs() < 0.02, "got {:?}", freq);
    }

    #[test]
    fn test_validate_empty_is_valid() {
        let result = validate_ab_tests(&[]);
        assert!(result.valid);
        assert!(result.error.is_none());
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_validate_single_variant() {
        let result = validate_ab_tests(&[Variant::new("https://a.com", 100.0)]);
        assert!(!result.valid);
        assert_eq!(result.error, Some(AbTestError::InsufficientVariants));
    }

    #[test]
    fn test_validate_missing_url() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", 50.0),
            Variant::new("  ", 50.0),
        ]);
        assert_eq!(result.error, Some(AbTestError::MissingUrl { index: 1 }));
    }

    #[test]
    fn test_validate_negative_weight() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", -5.0),
            Variant::new("https://b.com", 50.0),
        ]);
        assert_eq!(result.error, Some(AbTestError::InvalidWeight { index: 0 }));
    }

    #[test]
    fn test_validate_nan_weight() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", 50.0),
            Variant::new("https://b.com", f64::NAN),
        ]);
        assert_eq!(result.error, Some(AbTestError::InvalidWeight { index: 1 }));
    }

    #[test]
    fn test_validate_zero_sum() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", 0.0),
            Variant::new("https://b.com", 0.0),
        ]);
        assert_eq!(result.error, Some(AbTestError::ZeroWeightSum));
    }

    #[test]
    fn test_validate_non_hundred_sum_warns() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", 30.0),
            Variant::new("https://b.com", 30.0),
        ]);

        assert!(result.valid);
        assert!(result.error.is_none());
        assert_eq!(
            result.warning,
            Some(AbTestWarning::NonHundredSum { total: 60.0 })
        );
    }

    #[test]
    fn test_validate_hundred_within_tolerance() {
        let result = validate_ab_tests(&[
            Variant::new("https://a.com", 33.333),
            Variant::new("https://b.com", 33.333),
            Variant::new("https://c.com", 33.334),
        ]);

        assert!(result.valid);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_normalize_weights_sum_to_hundred() {
        let normalized = normalize_weights(&[
            Variant::new("https://a.com", 1.0),
            Variant::new("https://b.com", 2.0),
            Variant::new("https://c.com", 4.0),
        ]);

        let total: f64 = normalized.iter().map(|v| v.weight).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((normalized[0].weight - 100.0 / 7.0).abs() < 1e-9);
        assert_eq!(normalized[2].url, "https://c.com");
    }

    #[test]
    fn test_normalize_weights_zero_total_unchanged() {
        let variants = vec![
            Variant::new("https://a.com", 0.0),
            Variant::new("https://b.com", 0.0),
        ];

        assert_eq!(normalize_weights(&variants), variants);
    }

    #[test]
    fn test_validation_serializes_for_clients() {
        let result = validate_ab_tests(&[Variant::new("https://a.com", 100.0)]);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["valid"], false);
        assert_eq!(value["error"]["kind"], "insufficient_variants");
        assert!(value.get("warning").is_none());
    }
}
