//! Recipe files
//!
//! A recipe file starts with ingredient lines (`<mass> g - <item> - <notes>`).
//! Whatever follows the first non-ingredient line (method, notes, footers)
//! is not part of the ingredient list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{markdown_files, LoadError, LoadResult};
use crate::models::Recipe;
use crate::parse::{ParserState, RecipeParser};

/// Extension of recipe and nutrition files
pub const RECIPE_EXTENSION: &str = "md";

/// Path of the recipe file called `name` inside `dir`
pub fn recipe_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, RECIPE_EXTENSION))
}

/// Load the ingredient list of a recipe file
///
/// The recipe is named after the file stem. A missing file is an error;
/// a file without ingredient lines yields an empty recipe.
pub fn load_recipe(path: &Path) -> LoadResult<Recipe> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut parser = RecipeParser::new();
    for line in reader.lines() {
        let line = line.map_err(|e| LoadError::io(path, e))?;
        if parser.feed(&line) == ParserState::Terminated {
            break;
        }
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let recipe = Recipe::new(name, parser.finish());

    tracing::debug!(
        recipe = %recipe.name,
        ingredients = recipe.len(),
        "loaded recipe"
    );
    Ok(recipe)
}

/// Sorted names of the recipes in `dir`
///
/// Subdirectories (such as the nutrition catalog) are skipped, and a
/// missing directory lists no recipes.
pub fn list_recipes(dir: &Path) -> LoadResult<Vec<String>> {
    match markdown_files(dir)? {
        Some(files) => Ok(files.into_iter().map(|(stem, _)| stem).collect()),
        None => {
            tracing::warn!(dir = %dir.display(), "recipe directory not found");
            Ok(Vec::new())
        }
    }
}
