//! Nutrition calculation module
//!
//! Handles nutrition aggregation, portion display and unit conversions.

pub mod aggregate;
pub mod portion;
pub mod units;

pub use aggregate::{aggregate, contributions, default_nutrient, Contribution, NutritionSummary};
pub use portion::{round_to_3, scale_to_portion, PortionError};
pub use units::{get_grams, ConvertError, UnitTables};
