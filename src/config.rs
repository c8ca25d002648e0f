//! Runtime configuration
//!
//! Where the data lives and how a recipe is rendered.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::NUTRITION_DIR;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "RECIPEBOX_DATA_DIR";

/// Data directory used when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = "data";

pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_PORTION_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Location of recipe and nutrition files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory: explicit path, then environment, then `./data`
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let data_dir = explicit
            .or_else(|| std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding one nutrition file per ingredient
    pub fn nutrition_dir(&self) -> PathBuf {
        self.data_dir.join(NUTRITION_DIR)
    }
}

/// Per-render parameters for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Multiplier applied to every ingredient mass
    pub scale: f64,
    /// Serving size the displayed totals are scaled to
    pub portion_grams: f64,
    /// Nutrient to break down per ingredient; defaults to calories
    pub nutrient: Option<String>,
}

impl RenderOptions {
    pub fn new(scale: f64, portion_grams: f64) -> Result<Self, ConfigError> {
        let options = Self {
            scale,
            portion_grams,
            nutrient: None,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn with_nutrient(mut self, nutrient: Option<String>) -> Self {
        self.nutrient = nutrient.map(|n| n.trim().to_lowercase());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("scale", self.scale)?;
        check_positive("portion", self.portion_grams)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            portion_grams: DEFAULT_PORTION_GRAMS,
            nutrient: None,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = Config::resolve(Some(PathBuf::from("/srv/recipes")));
        assert_eq!(config.data_dir(), Path::new("/srv/recipes"));
        assert_eq!(config.nutrition_dir(), Path::new("/srv/recipes/Nutrition"));
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.portion_grams, 100.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_render_options_validation() {
        assert!(RenderOptions::new(0.5, 250.0).is_ok());
        assert_eq!(
            RenderOptions::new(0.0, 100.0),
            Err(ConfigError::NotPositive { name: "scale", value: 0.0 })
        );
        assert!(RenderOptions::new(1.0, -10.0).is_err());
        assert!(RenderOptions::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_nutrient_is_normalised() {
        let options = RenderOptions::default().with_nutrient(Some(" Protein ".to_string()));
        assert_eq!(options.nutrient.as_deref(), Some("protein"));
    }
}
