//! Unit conversion tool

use serde::Serialize;

use crate::nutrition::{get_grams, UnitTables};

/// Response for convert_to_grams
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub quantity: f64,
    pub unit: String,
    pub item: Option<String>,
    pub grams: f64,
}

/// Convert a quantity of an item to grams using the standard unit tables
///
/// `density` (g/ml) is only needed for volume units.
pub fn convert_to_grams(
    quantity: f64,
    unit: &str,
    item: Option<&str>,
    density: Option<f64>,
) -> Result<ConvertResponse, String> {
    let unit = unit.trim().to_lowercase();
    let item_name = item.map(|s| s.trim().to_lowercase()).unwrap_or_default();

    let mut tables = UnitTables::standard();
    if let Some(density) = density {
        tables = tables.with_density(item_name.clone(), density);
    }

    let grams = get_grams(&item_name, &unit, quantity, &tables).map_err(|e| e.to_string())?;

    Ok(ConvertResponse {
        quantity,
        unit,
        item: item.map(str::to_string),
        grams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_mass_unit() {
        let response = convert_to_grams(2.0, "KG", None, None).unwrap();
        assert_eq!(response.grams, 2000.0);
        assert_eq!(response.unit, "kg");
    }

    #[test]
    fn test_convert_volume_with_density() {
        let response = convert_to_grams(1.0, "l", Some("Milk"), Some(1.03)).unwrap();
        assert!((response.grams - 1030.0).abs() < 1e-9);
        assert_eq!(response.item.as_deref(), Some("Milk"));
    }

    #[test]
    fn test_convert_volume_without_density() {
        let err = convert_to_grams(1.0, "cup", Some("flour"), None).unwrap_err();
        assert!(err.contains("no density"));
    }
}
