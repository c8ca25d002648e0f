//! Status tool
//!
//! Reports build information and what the data directory contains.

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::data;

/// Response for status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub build: BuildInfo,
    pub data_dir: String,
    pub data_dir_exists: bool,
    pub recipe_count: usize,
    pub nutrition_dir: String,
    pub catalog_entries: usize,
}

/// Summarize the build and the configured data directory
pub fn status(config: &Config) -> Result<StatusResponse, String> {
    let recipes = data::list_recipes(config.data_dir())
        .map_err(|e| format!("Failed to list recipes: {}", e))?;
    let catalog = data::load_catalog(&config.nutrition_dir())
        .map_err(|e| format!("Failed to load nutrition catalog: {}", e))?;

    Ok(StatusResponse {
        build: BuildInfo::current(),
        data_dir: config.data_dir().display().to_string(),
        data_dir_exists: config.data_dir().is_dir(),
        recipe_count: recipes.len(),
        nutrition_dir: config.nutrition_dir().display().to_string(),
        catalog_entries: catalog.len(),
    })
}

impl StatusResponse {
    pub fn render_text(&self) -> String {
        format!(
            "{}\nData directory: {}{}\nRecipes: {}\nNutrition records: {} ({})\n",
            self.build.banner(),
            self.data_dir,
            if self.data_dir_exists { "" } else { " (missing)" },
            self.recipe_count,
            self.catalog_entries,
            self.nutrition_dir,
        )
    }
}
