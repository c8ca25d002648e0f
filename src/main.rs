//! Recipe Box
//!
//! Command-line viewer for recipe and nutrition text files.

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use recipebox::cli::{Args, Command};
use recipebox::config::Config;
use recipebox::tools::{convert, recipes, reports, status};

fn print_response<T: Serialize>(json: bool, response: &T, text: impl FnOnce(&T) -> String) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        print!("{}", text(response));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for tables and JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipebox=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::resolve(args.data_dir.clone());
    tracing::debug!(data_dir = %config.data_dir().display(), "resolved configuration");

    match &args.command {
        Command::List => {
            let response = recipes::list_recipes(&config)?;
            print_response(args.json, &response, |r| r.render_text())?;
        }
        Command::Show { recipes: names, render } => {
            let options = render.options()?;
            let mut views = Vec::with_capacity(names.len());
            for name in names {
                views.push(recipes::show_recipe(&config, name, &options)?);
            }
            print_response(args.json, &views, |views| {
                views
                    .iter()
                    .map(|view| view.render_text())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Chart { recipe, render, output } => {
            let options = render.options()?;
            let response = reports::generate_recipe_chart(&config, recipe, &options, &output.to_string_lossy())?;
            print_response(args.json, &response, |r| {
                format!("Wrote {} ({} slices of {})\n", r.file_path, r.slices, r.nutrient)
            })?;
        }
        Command::Report { recipe, render, output } => {
            let options = render.options()?;
            let response = reports::generate_recipe_report(&config, recipe, &options, &output.to_string_lossy())?;
            print_response(args.json, &response, |r| format!("{}: {}\n", r.message, r.file_path))?;
        }
        Command::Grams { quantity, unit, item, density } => {
            let response = convert::convert_to_grams(*quantity, unit, item.as_deref(), *density)?;
            print_response(args.json, &response, |r| format!("{} g\n", r.grams))?;
        }
        Command::Status => {
            let response = status::status(&config)?;
            print_response(args.json, &response, |r| r.render_text())?;
        }
    }

    Ok(())
}
