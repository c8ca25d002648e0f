//! Nutrition data structures
//!
//! Per-ingredient records from the nutrition catalog and the running
//! totals accumulated for a recipe.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the total-mass entry in [`NutritionTotals`]
pub const MASS: &str = "mass";

/// Name of the calorie entry in records and totals
pub const CALORIES: &str = "calories";

/// Nutrition facts for one ingredient, given for `reference_mass_grams`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub reference_mass_grams: f64,
    pub calories: f64,
    /// Amount of each named nutrient per reference mass
    pub nutrients: BTreeMap<String, f64>,
}

/// Catalog of nutrition records keyed by lowercased ingredient name
pub type NutritionCatalog = BTreeMap<String, NutritionRecord>;

impl NutritionRecord {
    pub fn new(reference_mass_grams: f64, calories: f64) -> Self {
        Self {
            reference_mass_grams,
            calories,
            nutrients: BTreeMap::new(),
        }
    }

    /// Set a fact by name. `mass` and `calories` address the header values.
    pub fn set(&mut self, name: &str, amount: f64) {
        match name {
            MASS => self.reference_mass_grams = amount,
            CALORIES => self.calories = amount,
            _ => {
                self.nutrients.insert(name.to_string(), amount);
            }
        }
    }

    /// Amount of a nutrient (including calories) per reference mass
    pub fn get(&self, nutrient: &str) -> Option<f64> {
        match nutrient {
            CALORIES => Some(self.calories),
            MASS => None,
            _ => self.nutrients.get(nutrient).copied(),
        }
    }

    /// Calories followed by every named nutrient
    pub fn facts(&self) -> impl Iterator<Item = (&str, f64)> {
        std::iter::once((CALORIES, self.calories))
            .chain(self.nutrients.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// Multiplier projecting this record onto `mass_grams` of the ingredient
    ///
    /// `None` when the reference mass cannot be divided by.
    pub fn scale_for(&self, mass_grams: f64) -> Option<f64> {
        if self.reference_mass_grams.is_finite() && self.reference_mass_grams != 0.0 {
            Some(mass_grams / self.reference_mass_grams)
        } else {
            None
        }
    }
}

/// Accumulated nutrient amounts for a recipe, always including `mass`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionTotals {
    values: BTreeMap<String, f64>,
}

impl NutritionTotals {
    /// Totals with zero mass and nothing else
    pub fn zero() -> Self {
        let mut values = BTreeMap::new();
        values.insert(MASS.to_string(), 0.0);
        Self { values }
    }

    pub fn add(&mut self, nutrient: &str, amount: f64) {
        *self.values.entry(nutrient.to_string()).or_insert(0.0) += amount;
    }

    pub fn get(&self, nutrient: &str) -> Option<f64> {
        self.values.get(nutrient).copied()
    }

    pub fn mass(&self) -> f64 {
        self.get(MASS).unwrap_or(0.0)
    }

    pub fn contains(&self, nutrient: &str) -> bool {
        self.values.contains_key(nutrient)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Apply `f` to every value, keeping the keys
    pub fn map_values(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), f(*v)))
                .collect(),
        }
    }

    /// Entries in display order: mass, calories, then alphabetical
    pub fn display_order(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = Vec::with_capacity(self.values.len());
        for key in [MASS, CALORIES] {
            if let Some(value) = self.get(key) {
                rows.push((key, value));
            }
        }
        rows.extend(
            self.values
                .iter()
                .filter(|(k, _)| k.as_str() != MASS && k.as_str() != CALORIES)
                .map(|(k, v)| (k.as_str(), *v)),
        );
        rows
    }
}

impl Default for NutritionTotals {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Mul<f64> for NutritionTotals {
    type Output = NutritionTotals;

    fn mul(self, multiplier: f64) -> NutritionTotals {
        self.map_values(|v| v * multiplier)
    }
}
