//! Unit conversion to grams
//!
//! Converts an ingredient quantity expressed in a mass or volume unit into
//! grams, using lookup tables for unit masses, unit volumes and per-item
//! densities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("no density known for '{item}' (needed to convert from {unit})")]
    MissingDensity { item: String, unit: String },
}

/// Lookup tables used by [`get_grams`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitTables {
    /// Grams per unit for mass units
    pub masses: HashMap<String, f64>,
    /// Milliliters per unit for volume units
    pub volumes: HashMap<String, f64>,
    /// Grams per milliliter, keyed by item name
    pub densities: HashMap<String, f64>,
}

impl UnitTables {
    /// Common metric and US units, no densities
    pub fn standard() -> Self {
        let masses = [
            ("g", 1.0),
            ("mg", G_PER_MG),
            ("kg", G_PER_KG),
            ("oz", G_PER_OZ),
            ("lb", G_PER_LB),
        ];
        let volumes = [
            ("ml", 1.0),
            ("l", ML_PER_LITER),
            ("tsp", ML_PER_TSP),
            ("tbsp", ML_PER_TBSP),
            ("fl oz", ML_PER_FL_OZ),
            ("cup", ML_PER_CUP),
            ("pint", ML_PER_PINT),
            ("quart", ML_PER_QUART),
            ("gallon", ML_PER_GALLON),
        ];

        Self {
            masses: masses.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            volumes: volumes.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            densities: HashMap::new(),
        }
    }

    pub fn with_density(mut self, item: impl Into<String>, grams_per_ml: f64) -> Self {
        self.densities.insert(item.into(), grams_per_ml);
        self
    }
}

/// Convert `quantity` of `item`, measured in `unit`, to grams
///
/// Mass units convert directly. Volume units go through milliliters and
/// the item's density.
pub fn get_grams(
    item: &str,
    unit: &str,
    quantity: f64,
    tables: &UnitTables,
) -> Result<f64, ConvertError> {
    if let Some(grams) = tables.masses.get(unit) {
        return Ok(quantity * grams);
    }

    let ml = tables
        .volumes
        .get(unit)
        .ok_or_else(|| ConvertError::UnknownUnit(unit.to_string()))?;
    let density = tables
        .densities
        .get(item)
        .ok_or_else(|| ConvertError::MissingDensity {
            item: item.to_string(),
            unit: unit.to_string(),
        })?;

    Ok(quantity * ml * density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_units_ignore_density() {
        let tables = UnitTables::standard();
        assert_eq!(get_grams("flour", "g", 250.0, &tables), Ok(250.0));
        assert_eq!(get_grams("flour", "kg", 2.0, &tables), Ok(2000.0));
        assert_eq!(get_grams("anything", "oz", 1.0, &tables), Ok(G_PER_OZ));
    }

    #[test]
    fn test_volume_units_use_density() {
        let tables = UnitTables::standard().with_density("flour", 0.53);
        let grams = get_grams("flour", "cup", 2.0, &tables).unwrap();
        assert!((grams - 2.0 * ML_PER_CUP * 0.53).abs() < 1e-9);
    }

    #[test]
    fn test_mass_table_wins_over_volume_table() {
        let mut tables = UnitTables::standard();
        tables.volumes.insert("g".to_string(), 99.0);
        assert_eq!(get_grams("water", "g", 3.0, &tables), Ok(3.0));
    }

    #[test]
    fn test_missing_density() {
        let tables = UnitTables::standard();
        let err = get_grams("honey", "tbsp", 1.0, &tables).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingDensity {
                item: "honey".to_string(),
                unit: "tbsp".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_unit() {
        let tables = UnitTables::standard();
        assert_eq!(
            get_grams("egg", "each", 2.0, &tables),
            Err(ConvertError::UnknownUnit("each".to_string()))
        );
    }
}
