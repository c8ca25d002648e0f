//! End-to-end checks over a data directory on disk

use std::fs;
use std::path::Path;

use recipebox::config::{Config, RenderOptions};
use recipebox::data::{list_recipes, load_catalog, load_recipe, recipe_path};
use recipebox::nutrition::{aggregate, contributions, round_to_3, scale_to_portion};
use recipebox::tools::recipes::show_recipe;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn pancake_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        &root.join("Pancakes.md"),
        "200 g - flour - sifted\n\
         300 g - milk\n\
         100 g - egg - about two\n\
         5 g - salt\n\
         \n\
         Whisk everything, rest 30 minutes.\n",
    );
    write(&root.join("Nutrition/Flour.md"), "100 g\n364 cal\n10 g - protein\n76 g - carbohydrates\n1 g - fat\n");
    write(&root.join("Nutrition/milk.md"), "100 g\n64 cal\n3.3 g - protein\n4.8 g - carbohydrates\n3.6 g - fat\n");
    write(&root.join("Nutrition/egg.md"), "50 g\n72 cal\n6.3 g - protein\n\n4.8 g - fat\n0 g - carbohydrates\n");
    dir
}

#[test]
fn pancakes_totals() {
    let dir = pancake_dir();
    let config = Config::new(dir.path());

    assert_eq!(list_recipes(config.data_dir()).unwrap(), vec!["Pancakes"]);

    let recipe = load_recipe(&recipe_path(config.data_dir(), "Pancakes")).unwrap();
    assert_eq!(recipe.len(), 4);

    let catalog = load_catalog(&config.nutrition_dir()).unwrap();
    assert_eq!(catalog.len(), 3);

    let summary = aggregate(&recipe.ingredients, &catalog);
    let totals = &summary.totals;

    // salt has no record: it only adds mass
    assert_eq!(totals.mass(), 605.0);
    // 2 * 364 + 3 * 64 + 2 * 72
    assert!((totals.get("calories").unwrap() - 1064.0).abs() < 1e-9);
    // 2 * 10 + 3 * 3.3 + 2 * 6.3
    assert!((totals.get("protein").unwrap() - 42.5).abs() < 1e-9);

    let carbs = contributions(&recipe.ingredients, &catalog, "carbohydrates");
    let names: Vec<&str> = carbs.iter().map(|c| c.ingredient.as_str()).collect();
    assert_eq!(names, vec!["flour", "milk"]);
    let sum: f64 = carbs.iter().map(|c| c.amount).sum();
    assert!((sum - totals.get("carbohydrates").unwrap()).abs() < 1e-9);

    let portion = scale_to_portion(totals, 100.0).unwrap();
    assert_eq!(portion.get("mass"), Some(100.0));
    assert_eq!(portion.get("calories"), Some(round_to_3(1064.0 * 100.0 / 605.0)));
}

#[test]
fn doubling_scale_doubles_nutrients() {
    let dir = pancake_dir();
    let config = Config::new(dir.path());

    let single = show_recipe(&config, "Pancakes", &RenderOptions::default()).unwrap();
    let double = show_recipe(&config, "Pancakes", &RenderOptions::new(2.0, 100.0).unwrap()).unwrap();

    for key in single.totals.keys() {
        let a = single.totals.get(key).unwrap();
        let b = double.totals.get(key).unwrap();
        assert!((b - 2.0 * a).abs() < 1e-9, "{key}");
    }
    // the per-portion view does not depend on the scale
    assert_eq!(single.per_portion, double.per_portion);
}

#[test]
fn missing_nutrition_dir_counts_mass_only() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("water.md"), "250 g - water\n");

    let config = Config::new(dir.path());
    let view = show_recipe(&config, "water", &RenderOptions::default()).unwrap();

    assert_eq!(view.totals.keys().collect::<Vec<_>>(), vec!["mass"]);
    assert_eq!(view.total_mass_grams, 250.0);
    assert!(view.nutrients.is_empty());
    assert!(view.contributions.is_empty());
}
