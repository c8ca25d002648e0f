//! Recipe tools
//!
//! Listing recipes and building the nutrition view of a recipe.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{Config, RenderOptions};
use crate::data::{self, recipe_path};
use crate::models::{NutritionCatalog, NutritionTotals, Recipe};
use crate::nutrition::{
    aggregate, contributions, default_nutrient, round_to_3, scale_to_portion, Contribution,
};

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub data_dir: String,
    pub recipes: Vec<String>,
    pub count: usize,
}

/// One row of the ingredient table, after scaling
#[derive(Debug, Clone, Serialize)]
pub struct IngredientRow {
    pub item: String,
    pub mass_grams: f64,
    pub notes: Option<String>,
}

/// Everything shown for one recipe
#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub name: String,
    pub scale: f64,
    pub ingredients: Vec<IngredientRow>,
    pub total_mass_grams: f64,
    /// Unrounded totals for the whole (scaled) recipe
    pub totals: NutritionTotals,
    pub portion_grams: f64,
    /// Totals for one portion, rounded to 3 significant figures.
    /// Absent when the recipe has no mass.
    pub per_portion: Option<NutritionTotals>,
    /// Nutrients available for the breakdown
    pub nutrients: Vec<String>,
    pub selected_nutrient: Option<String>,
    pub contributions: Vec<Contribution>,
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// List the recipes in the data directory
pub fn list_recipes(config: &Config) -> Result<ListRecipesResponse, String> {
    let recipes = data::list_recipes(config.data_dir())
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    Ok(ListRecipesResponse {
        data_dir: config.data_dir().display().to_string(),
        count: recipes.len(),
        recipes,
    })
}

/// Load a recipe and the nutrition catalog, and build the recipe view
pub fn show_recipe(config: &Config, name: &str, options: &RenderOptions) -> Result<RecipeView, String> {
    options.validate().map_err(|e| e.to_string())?;

    let recipe = data::load_recipe(&recipe_path(config.data_dir(), name))
        .map_err(|e| format!("Failed to load recipe '{}': {}", name, e))?;
    let catalog = data::load_catalog(&config.nutrition_dir())
        .map_err(|e| format!("Failed to load nutrition catalog: {}", e))?;

    build_view(&recipe, &catalog, options)
}

/// Build the view for an already loaded recipe
///
/// Fails only when the requested nutrient is not available for this recipe.
pub fn build_view(
    recipe: &Recipe,
    catalog: &NutritionCatalog,
    options: &RenderOptions,
) -> Result<RecipeView, String> {
    let scaled = recipe.scaled(options.scale);
    let summary = aggregate(&scaled.ingredients, catalog);

    let selected_nutrient = match options.nutrient.as_deref() {
        Some(requested) if summary.nutrients.contains(requested) => Some(requested.to_string()),
        Some(requested) => {
            let available: Vec<&str> = summary.nutrients.iter().map(String::as_str).collect();
            return Err(format!(
                "Nutrient '{}' is not available for recipe '{}' (available: {})",
                requested,
                recipe.name,
                if available.is_empty() { "none".to_string() } else { available.join(", ") }
            ));
        }
        None => default_nutrient(&summary.nutrients).map(str::to_string),
    };

    let contributions = selected_nutrient
        .as_deref()
        .map(|nutrient| contributions(&scaled.ingredients, catalog, nutrient))
        .unwrap_or_default();

    let per_portion = match scale_to_portion(&summary.totals, options.portion_grams) {
        Ok(portion) => Some(portion),
        Err(e) => {
            tracing::debug!(recipe = %recipe.name, "no per-portion totals: {}", e);
            None
        }
    };

    Ok(RecipeView {
        name: recipe.name.clone(),
        scale: options.scale,
        ingredients: scaled
            .ingredients
            .iter()
            .map(|entry| IngredientRow {
                item: entry.item_name.clone(),
                mass_grams: entry.mass_grams,
                notes: entry.notes.clone(),
            })
            .collect(),
        total_mass_grams: summary.totals.mass(),
        totals: summary.totals,
        portion_grams: options.portion_grams,
        per_portion,
        nutrients: summary.nutrients.into_iter().collect(),
        selected_nutrient,
        contributions,
    })
}

// ============================================================================
// Text Rendering
// ============================================================================

impl ListRecipesResponse {
    pub fn render_text(&self) -> String {
        if self.recipes.is_empty() {
            return format!("No recipes found in {}\n", self.data_dir);
        }
        let mut out = String::new();
        for name in &self.recipes {
            let _ = writeln!(out, "{}", name);
        }
        out
    }
}

impl RecipeView {
    /// Plain-text tables for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# {}", self.name);
        if self.scale != 1.0 {
            let _ = writeln!(out, "Scale: {}", self.scale);
        }
        let _ = writeln!(out);

        let item_width = self
            .ingredients
            .iter()
            .map(|row| row.item.len())
            .chain(std::iter::once("item".len()))
            .max()
            .unwrap_or(4);

        let _ = writeln!(out, "{:>10}  {:<item_width$}  notes", "mass (g)", "item");
        for row in &self.ingredients {
            let _ = writeln!(
                out,
                "{:>10}  {:<item_width$}  {}",
                format_amount(row.mass_grams),
                row.item,
                row.notes.as_deref().unwrap_or("")
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Total mass: {} g", format_amount(self.total_mass_grams));

        let _ = writeln!(out);
        let _ = writeln!(out, "## Nutrition per {} g", format_amount(self.portion_grams));
        match &self.per_portion {
            Some(portion) => {
                let width = portion.keys().map(str::len).max().unwrap_or(0);
                for (nutrient, value) in portion.display_order() {
                    let _ = writeln!(out, "{:<width$}  {}", nutrient, format_amount(value));
                }
            }
            None => {
                let _ = writeln!(out, "(no ingredients)");
            }
        }

        if let Some(nutrient) = &self.selected_nutrient {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Fractions of {}", nutrient);
            let total: f64 = self.contributions.iter().map(|c| c.amount).sum();
            for row in &self.contributions {
                let share = if total != 0.0 { 100.0 * row.amount / total } else { 0.0 };
                let _ = writeln!(
                    out,
                    "{:<item_width$}  {:>10}  {:>5.1}%",
                    row.ingredient,
                    format_amount(round_to_3(row.amount)),
                    share
                );
            }
            if self.nutrients.len() > 1 {
                let _ = writeln!(out, "(available: {})", self.nutrients.join(", "));
            }
        }

        out
    }
}

/// Format a number without trailing zeros
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
