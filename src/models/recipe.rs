//! Recipe model
//!
//! A recipe is the ordered ingredient list read from one recipe file.

use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub mass_grams: f64,
    /// Display name, also used to look the ingredient up in the catalog
    pub item_name: String,
    pub notes: Option<String>,
}

impl IngredientEntry {
    /// Key used to match this ingredient against the nutrition catalog
    pub fn catalog_key(&self) -> String {
        self.item_name.to_lowercase()
    }
}

/// An ordered list of ingredients, named after its file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<IngredientEntry>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<IngredientEntry>) -> Self {
        Self {
            name: name.into(),
            ingredients,
        }
    }

    /// Return a copy with every ingredient mass multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            ingredients: self
                .ingredients
                .iter()
                .map(|entry| IngredientEntry {
                    mass_grams: entry.mass_grams * factor,
                    ..entry.clone()
                })
                .collect(),
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.ingredients.iter().map(|e| e.mass_grams).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }
}
