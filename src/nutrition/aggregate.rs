//! Recipe nutrition aggregation
//!
//! Projects each catalog record onto the ingredient mass used in a recipe,
//! assuming nutrition scales linearly with mass, and sums the results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{
    IngredientEntry, NutritionCatalog, NutritionRecord, NutritionTotals, CALORIES, MASS,
};

/// Totals for a recipe plus the nutrients that can be broken down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub totals: NutritionTotals,
    /// Nutrients with a non-zero amount in at least one matched ingredient
    pub nutrients: BTreeSet<String>,
}

/// One ingredient's share of a nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub ingredient: String,
    pub amount: f64,
}

/// Look up the catalog record for an ingredient, with its scale factor
fn matched<'a>(
    entry: &IngredientEntry,
    catalog: &'a NutritionCatalog,
) -> Option<(&'a NutritionRecord, f64)> {
    let key = entry.catalog_key();
    let Some(record) = catalog.get(&key) else {
        tracing::debug!(ingredient = %key, "no nutrition record, counting mass only");
        return None;
    };

    match record.scale_for(entry.mass_grams) {
        Some(scale) => Some((record, scale)),
        None => {
            tracing::warn!(
                ingredient = %key,
                reference_mass = record.reference_mass_grams,
                "nutrition record has no usable reference mass, skipping"
            );
            None
        }
    }
}

/// Sum nutrition over a recipe's ingredients
///
/// Every ingredient adds its mass to `mass`. Ingredients without a catalog
/// record add nothing else.
pub fn aggregate(ingredients: &[IngredientEntry], catalog: &NutritionCatalog) -> NutritionSummary {
    let mut totals = NutritionTotals::zero();
    let mut nutrients = BTreeSet::new();

    for entry in ingredients {
        totals.add(MASS, entry.mass_grams);

        let Some((record, scale)) = matched(entry, catalog) else {
            continue;
        };

        for (nutrient, amount) in record.facts() {
            totals.add(nutrient, scale * amount);
            if amount != 0.0 {
                nutrients.insert(nutrient.to_string());
            }
        }
    }

    NutritionSummary { totals, nutrients }
}

/// Per-ingredient breakdown of one nutrient, in recipe order
///
/// Ingredients whose record has no or zero amount of the nutrient are left
/// out. The amounts sum to the nutrient's total from [`aggregate`].
pub fn contributions(
    ingredients: &[IngredientEntry],
    catalog: &NutritionCatalog,
    nutrient: &str,
) -> Vec<Contribution> {
    ingredients
        .iter()
        .filter_map(|entry| {
            let (record, scale) = matched(entry, catalog)?;
            let amount = record.get(nutrient).filter(|a| *a != 0.0)?;
            Some(Contribution {
                ingredient: entry.item_name.clone(),
                amount: scale * amount,
            })
        })
        .collect()
}

/// Nutrient selected when none is requested: calories if available
pub fn default_nutrient(nutrients: &BTreeSet<String>) -> Option<&str> {
    if nutrients.contains(CALORIES) {
        Some(CALORIES)
    } else {
        nutrients.iter().next().map(String::as_str)
    }
}
