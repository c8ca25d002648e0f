//! Data directory access
//!
//! Loads recipes and the nutrition catalog from plain-text files.

pub mod catalog;
pub mod error;
pub mod recipes;

pub use catalog::{load_catalog, NUTRITION_DIR};
pub use error::{LoadError, LoadResult};
pub use recipes::{list_recipes, load_recipe, recipe_path, RECIPE_EXTENSION};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Regular `*.md` files in `dir` as `(stem, path)`, sorted by file name
///
/// Returns `Ok(None)` when the directory does not exist.
pub(crate) fn markdown_files(dir: &Path) -> LoadResult<Option<Vec<(String, PathBuf)>>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LoadError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext == RECIPE_EXTENSION);
        if !is_markdown {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((stem.to_string(), path.clone()));
        }
    }

    files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));
    Ok(Some(files))
}
