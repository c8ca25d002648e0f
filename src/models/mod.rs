//! Data models
//!
//! Recipes and nutrition records as loaded from the data directory.

mod nutrition;
mod recipe;

pub use nutrition::{NutritionCatalog, NutritionRecord, NutritionTotals, CALORIES, MASS};
pub use recipe::{IngredientEntry, Recipe};
