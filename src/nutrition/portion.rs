//! Display-time rescaling of totals to a serving size

use thiserror::Error;

use crate::models::NutritionTotals;

/// Number of significant figures kept for displayed values
pub const SIGNIFICANT_FIGURES: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PortionError {
    #[error("total mass is zero, cannot scale to a portion")]
    ZeroMass,
}

/// Round to three significant figures
///
/// Zero and non-finite values are returned unchanged.
pub fn round_to_3(x: f64) -> f64 {
    round_significant(x, SIGNIFICANT_FIGURES)
}

fn round_significant(x: f64, figures: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }

    let decimals = figures - 1 - x.abs().log10().floor() as i32;
    if decimals >= 0 {
        let factor = 10f64.powi(decimals);
        (x * factor).round() / factor
    } else {
        let factor = 10f64.powi(-decimals);
        (x / factor).round() * factor
    }
}

/// Rescale totals to `portion_grams` of the finished recipe
///
/// Each value becomes `round_to_3(total * portion / total_mass)`.
pub fn scale_to_portion(
    totals: &NutritionTotals,
    portion_grams: f64,
) -> Result<NutritionTotals, PortionError> {
    let mass = totals.mass();
    if mass == 0.0 {
        return Err(PortionError::ZeroMass);
    }

    Ok(totals.map_values(|v| round_to_3(v * portion_grams / mass)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_3() {
        assert_eq!(round_to_3(0.0), 0.0);
        assert_eq!(round_to_3(123.456), 123.0);
        assert_eq!(round_to_3(12345.0), 12300.0);
        assert_eq!(round_to_3(1.23456), 1.23);
        assert_eq!(round_to_3(-9876.5), -9880.0);
        assert_eq!(round_to_3(0.0012345), 0.00123);
        assert_eq!(round_to_3(999.6), 1000.0);
    }

    #[test]
    fn test_round_to_3_idempotent() {
        for x in [0.0, 1.0, 3.14159, 0.000987654, 42.42, 1234567.0, -0.5555, 999.96] {
            let once = round_to_3(x);
            assert_eq!(round_to_3(once), once, "not idempotent for {x}");
        }
    }

    #[test]
    fn test_round_to_3_non_finite() {
        assert!(round_to_3(f64::NAN).is_nan());
        assert_eq!(round_to_3(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_scale_to_portion() {
        let mut totals = NutritionTotals::zero();
        totals.add("mass", 400.0);
        totals.add("calories", 1000.0);
        totals.add("protein", 33.3333);

        let portion = scale_to_portion(&totals, 100.0).unwrap();
        assert_eq!(portion.get("mass"), Some(100.0));
        assert_eq!(portion.get("calories"), Some(250.0));
        assert_eq!(portion.get("protein"), Some(8.33));
    }

    #[test]
    fn test_scale_to_portion_zero_mass() {
        let totals = NutritionTotals::zero();
        assert_eq!(scale_to_portion(&totals, 100.0), Err(PortionError::ZeroMass));
    }
}
