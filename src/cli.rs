//! Command-line arguments

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{ConfigError, RenderOptions, DEFAULT_PORTION_GRAMS, DEFAULT_SCALE};

/// View recipes and their nutrition from a directory of text files
#[derive(Parser, Debug, Clone)]
#[command(name = "recipebox")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Data directory (defaults to $RECIPEBOX_DATA_DIR, then ./data)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List available recipes
    List,

    /// Show ingredients and nutrition for one or more recipes
    Show {
        #[arg(required = true, value_name = "RECIPE")]
        recipes: Vec<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write a pie chart of one nutrient's breakdown as PNG
    Chart {
        recipe: String,

        #[command(flatten)]
        render: RenderArgs,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write a PDF report for a recipe
    Report {
        recipe: String,

        #[command(flatten)]
        render: RenderArgs,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a quantity to grams
    Grams {
        quantity: f64,
        unit: String,
        item: Option<String>,

        /// Density of the item in g/ml, needed for volume units
        #[arg(long)]
        density: Option<f64>,
    },

    /// Show build and data directory information
    Status,
}

/// Per-recipe rendering parameters
#[derive(ClapArgs, Debug, Clone)]
pub struct RenderArgs {
    /// Multiply every ingredient mass by this factor
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Portion size in grams for the nutrition table
    #[arg(short, long, default_value_t = DEFAULT_PORTION_GRAMS)]
    pub portion: f64,

    /// Nutrient to break down per ingredient (default: calories)
    #[arg(short, long)]
    pub nutrient: Option<String>,
}

impl RenderArgs {
    pub fn options(&self) -> Result<RenderOptions, ConfigError> {
        Ok(RenderOptions::new(self.scale, self.portion)?.with_nutrient(self.nutrient.clone()))
    }
}
