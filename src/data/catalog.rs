//! Nutrition catalog
//!
//! One file per ingredient under `<data>/Nutrition/`:
//!
//! ```text
//! 100 g
//! 364 cal
//! 10.3 g - protein
//! 76.3 g - carbohydrates
//! ```
//!
//! The first line is the reference mass, the second the calories for that
//! mass, and every following non-blank line one nutrient amount.

use std::fs;
use std::path::Path;

use super::{markdown_files, LoadError, LoadResult};
use crate::models::{NutritionCatalog, NutritionRecord};
use crate::parse::{parse_amount, parse_line, ParseError, CALORIES_SUFFIX, GRAMS_SUFFIX};

/// Name of the catalog directory inside the data directory
pub const NUTRITION_DIR: &str = "Nutrition";

/// Load every nutrition file in `dir`, keyed by lowercased file stem
///
/// A missing directory is an empty catalog. Files are read in name order,
/// so when two stems differ only by case the later file wins.
pub fn load_catalog(dir: &Path) -> LoadResult<NutritionCatalog> {
    let mut catalog = NutritionCatalog::new();

    let Some(files) = markdown_files(dir)? else {
        tracing::debug!(dir = %dir.display(), "nutrition directory not found, catalog is empty");
        return Ok(catalog);
    };

    for (stem, path) in files {
        let record = load_record(&path)?;
        catalog.insert(stem.to_lowercase(), record);
    }

    tracing::debug!(entries = catalog.len(), "loaded nutrition catalog");
    Ok(catalog)
}

/// Load a single nutrition file
pub fn load_record(path: &Path) -> LoadResult<NutritionRecord> {
    let contents = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let mut lines = contents.lines().enumerate();

    let reference_mass = header_value(path, lines.next(), GRAMS_SUFFIX, "reference mass")?;
    let calories = header_value(path, lines.next(), CALORIES_SUFFIX, "calories")?;
    let mut record = NutritionRecord::new(reference_mass, calories);

    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;

        let parsed = parse_line(line).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;
        let amount = parsed.mass.ok_or_else(|| LoadError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            source: ParseError::InvalidNumber(String::new()),
        })?;
        let name = parsed
            .item
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LoadError::MissingName {
                path: path.to_path_buf(),
                line: line_number,
            })?;

        record.set(&name, amount);
    }

    Ok(record)
}

fn header_value(
    path: &Path,
    line: Option<(usize, &str)>,
    suffix: &str,
    what: &'static str,
) -> LoadResult<f64> {
    let missing = || LoadError::MissingLine {
        path: path.to_path_buf(),
        what,
    };

    let (index, line) = line.ok_or_else(missing)?;
    let lower = line.trim().to_lowercase();
    parse_amount(&lower, suffix)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?
        .ok_or_else(missing)
}
