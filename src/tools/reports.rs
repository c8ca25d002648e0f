//! Report generation tools
//!
//! Render a nutrient breakdown as a pie chart and a recipe as a PDF report
//! with its ingredient table, per-portion nutrition and the chart.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use printpdf::*;
use serde::Serialize;

use crate::config::{Config, RenderOptions};
use crate::nutrition::{round_to_3, Contribution};
use crate::tools::recipes::{format_amount, show_recipe, RecipeView};

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (192, 80, 0);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);
const COLOR_ERROR: (u8, u8, u8) = (255, 0, 0);

/// Slice colors, reused in order when there are more slices
const PIE_PALETTE: [(u8, u8, u8); 10] = [
    (99, 110, 250),
    (239, 85, 59),
    (0, 204, 150),
    (171, 99, 250),
    (255, 161, 90),
    (25, 211, 243),
    (255, 102, 146),
    (182, 232, 128),
    (255, 151, 255),
    (254, 203, 82),
];

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateChartResponse {
    pub success: bool,
    pub file_path: String,
    pub recipe: String,
    pub nutrient: String,
    pub slices: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub recipe: String,
    pub ingredients: usize,
    pub nutrient: Option<String>,
    pub message: String,
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

/// Merge rows for the same ingredient, keeping first-seen order
fn merge_slices(rows: &[Contribution]) -> Vec<(String, f64)> {
    let mut slices: Vec<(String, f64)> = Vec::new();
    for row in rows {
        match slices.iter_mut().find(|(name, _)| *name == row.ingredient) {
            Some((_, amount)) => *amount += row.amount,
            None => slices.push((row.ingredient.clone(), row.amount)),
        }
    }
    slices
}

/// Points of one pie slice: the center followed by the arc
fn slice_polygon(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep.to_degrees().ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

/// Generate a pie chart of nutrient contributions as PNG bytes
///
/// Slices start at twelve o'clock and run clockwise in recipe order. The
/// title and slice labels need a system font; without one the chart is
/// rendered unlabeled.
pub fn generate_pie_chart(
    rows: &[Contribution],
    title: &str,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};
    use std::f64::consts::{FRAC_PI_2, PI};

    let slices: Vec<(String, f64)> = merge_slices(rows)
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .collect();
    if slices.is_empty() {
        return Err("No data to chart".to_string());
    }
    let total: f64 = slices.iter().map(|(_, amount)| amount).sum();

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let center = ((width / 2) as i32, (height / 2 + 15) as i32);
        let radius = f64::from(width.min(height)) * 0.32;

        let mut start = -FRAC_PI_2;
        let mut label_points = Vec::with_capacity(slices.len());
        for (i, (_, amount)) in slices.iter().enumerate() {
            let (r, g, b) = PIE_PALETTE[i % PIE_PALETTE.len()];
            let sweep = 2.0 * PI * amount / total;

            root.draw(&Polygon::new(
                slice_polygon(center, radius, start, sweep),
                RGBColor(r, g, b).filled(),
            ))
            .map_err(|e| e.to_string())?;

            let middle = start + sweep / 2.0;
            label_points.push((
                center.0 + (radius * 1.1 * middle.cos()).round() as i32,
                center.1 + (radius * 1.1 * middle.sin()).round() as i32,
                middle.cos() < 0.0,
            ));
            start += sweep;
        }

        let draw_labels = || -> Result<(), String> {
            let title_style = TextStyle::from(("sans-serif", 24).into_font())
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(title, ((width / 2) as i32, 10), title_style))
                .map_err(|e| e.to_string())?;

            for ((name, amount), (x, y, left)) in slices.iter().zip(&label_points) {
                let anchor = if *left { HPos::Right } else { HPos::Left };
                let style = TextStyle::from(("sans-serif", 16).into_font())
                    .pos(Pos::new(anchor, VPos::Center));
                let label = format!("{} ({:.1}%)", name, 100.0 * amount / total);
                root.draw(&Text::new(label, (*x, *y), style))
                    .map_err(|e| e.to_string())?;
            }
            Ok(())
        };
        if let Err(e) = draw_labels() {
            tracing::warn!("chart labels not drawn: {}", e);
        }

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    let dyn_img = DynamicImage::ImageRgb8(img);
    dyn_img
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Write the pie chart for a recipe's selected nutrient to a PNG file
pub fn generate_recipe_chart(
    config: &Config,
    name: &str,
    options: &RenderOptions,
    output_path: &str,
) -> Result<GenerateChartResponse, String> {
    let view = show_recipe(config, name, options)?;
    let nutrient = view
        .selected_nutrient
        .clone()
        .ok_or_else(|| format!("Recipe '{}' has no nutrients to chart", name))?;

    let title = format!("{}: fractions of {}", view.name, nutrient);
    let png = generate_pie_chart(&view.contributions, &title, 800, 600)?;

    write_output(Path::new(output_path), &png)?;
    tracing::info!(recipe = %view.name, nutrient = %nutrient, path = output_path, "wrote chart");

    Ok(GenerateChartResponse {
        success: true,
        file_path: output_path.to_string(),
        recipe: view.name,
        nutrient,
        slices: merge_slices(&view.contributions).len(),
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 20.0;

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_line(layer: &PdfLayerReference, x1: Mm, y1: Mm, x2: Mm, y2: Mm, color: (u8, u8, u8), width: f32) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

/// Writes text top to bottom, starting a new page when the current one is full
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Result<Self, String> {
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| e.to_string())?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: PAGE_HEIGHT - 20.0,
        })
    }

    /// Make sure `height` mm are left on the page
    fn reserve(&mut self, height: f32) {
        if self.y - height >= MARGIN_BOTTOM {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - 20.0;
    }

    fn text(&self, text: &str, x: f32, size: f32, bold: bool, color: (u8, u8, u8)) {
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn heading(&mut self, text: &str) {
        self.reserve(12.0);
        self.y -= 4.0;
        self.text(text, MARGIN_LEFT, 12.0, true, COLOR_BLACK);
        self.y -= 7.0;
    }

    /// One table row; `columns` are (x offset, text) pairs
    fn row(&mut self, columns: &[(f32, String)], bold: bool) {
        self.reserve(5.0);
        for (x, value) in columns {
            self.text(value, MARGIN_LEFT + x, 9.0, bold, COLOR_BLACK);
        }
        self.y -= 5.0;
    }

    fn rule(&mut self) {
        add_line(&self.layer, Mm(MARGIN_LEFT), Mm(self.y), Mm(PAGE_WIDTH - MARGIN_LEFT), Mm(self.y), COLOR_GRAY, 0.5);
        self.y -= 6.0;
    }
}

// ============================================================================
// Recipe Report Generation
// ============================================================================

/// Generate a PDF report for one recipe
pub fn generate_recipe_report(
    config: &Config,
    name: &str,
    options: &RenderOptions,
    output_path: &str,
) -> Result<GenerateReportResponse, String> {
    let view = show_recipe(config, name, options)?;

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Recipe: {}", view.name),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);
    let mut page = PageWriter::new(&doc, layer)?;

    write_header(&mut page, &view);
    write_ingredients(&mut page, &view);
    write_nutrition(&mut page, &view);
    write_breakdown(&mut page, &view)?;
    drop(page);

    let path = Path::new(output_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let file = File::create(path).map_err(|e| e.to_string())?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| e.to_string())?;

    tracing::info!(recipe = %view.name, path = output_path, "wrote report");

    Ok(GenerateReportResponse {
        success: true,
        file_path: output_path.to_string(),
        recipe: view.name.clone(),
        ingredients: view.ingredients.len(),
        nutrient: view.selected_nutrient.clone(),
        message: format!(
            "Report for '{}' generated with {} ingredients",
            view.name,
            view.ingredients.len()
        ),
    })
}

fn write_header(page: &mut PageWriter, view: &RecipeView) {
    page.text(&view.name, MARGIN_LEFT, 18.0, true, COLOR_TITLE);
    page.y -= 10.0;

    let now = chrono::Local::now().format("%Y-%m-%d").to_string();
    page.text(&format!("Scale: {}", format_amount(view.scale)), MARGIN_LEFT, 11.0, false, COLOR_BLACK);
    page.text(&format!("Generated: {}", now), 120.0, 11.0, false, COLOR_BLACK);
    page.y -= 6.0;
    page.text(
        &format!("Total mass: {} g", format_amount(view.total_mass_grams)),
        MARGIN_LEFT,
        11.0,
        false,
        COLOR_BLACK,
    );
    page.y -= 6.0;
    page.rule();
}

fn write_ingredients(page: &mut PageWriter, view: &RecipeView) {
    page.heading("Ingredients");
    page.row(
        &[(0.0, "Mass (g)".to_string()), (25.0, "Item".to_string()), (85.0, "Notes".to_string())],
        true,
    );
    for row in &view.ingredients {
        page.row(
            &[
                (0.0, format_amount(row.mass_grams)),
                (25.0, row.item.clone()),
                (85.0, row.notes.clone().unwrap_or_default()),
            ],
            false,
        );
    }
}

fn write_nutrition(page: &mut PageWriter, view: &RecipeView) {
    page.heading(&format!("Nutrition per {} g", format_amount(view.portion_grams)));
    match &view.per_portion {
        Some(portion) => {
            for (nutrient, value) in portion.display_order() {
                page.row(&[(0.0, nutrient.to_string()), (50.0, format_amount(value))], false);
            }
        }
        None => page.row(&[(0.0, "No ingredients".to_string())], false),
    }
}

fn write_breakdown(page: &mut PageWriter, view: &RecipeView) -> Result<(), String> {
    let Some(nutrient) = view.selected_nutrient.as_deref() else {
        return Ok(());
    };

    page.heading(&format!("Fractions of {}", nutrient));
    for row in &view.contributions {
        page.row(
            &[(0.0, row.ingredient.clone()), (50.0, format_amount(round_to_3(row.amount)))],
            false,
        );
    }

    // 800x600 pixels at 150 DPI is roughly 135mm x 102mm
    page.reserve(110.0);
    match generate_pie_chart(&view.contributions, &format!("fractions of {}", nutrient), 800, 600) {
        Ok(png_bytes) => {
            let dynamic_image = printpdf::image_crate::load_from_memory(&png_bytes)
                .map_err(|e| e.to_string())?;
            let pdf_image = Image::from_dynamic_image(&dynamic_image);

            let transform = ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT)),
                translate_y: Some(Mm(page.y - 105.0)),
                dpi: Some(150.0),
                ..Default::default()
            };
            pdf_image.add_to_layer(page.layer.clone(), transform);
            page.y -= 110.0;
        }
        Err(e) => {
            page.text(&format!("Chart generation error: {}", e), MARGIN_LEFT, 9.0, false, COLOR_ERROR);
            page.y -= 6.0;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn contribution(name: &str, amount: f64) -> Contribution {
        Contribution {
            ingredient: name.to_string(),
            amount,
        }
    }

    fn sample_data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Nutrition")).unwrap();
        fs::write(dir.path().join("Nutrition/flour.md"), "100 g\n364 cal\n10 g - protein\n").unwrap();
        fs::write(dir.path().join("Nutrition/butter.md"), "100 g\n717 cal\n81 g - fat\n").unwrap();
        fs::write(
            dir.path().join("shortbread.md"),
            "300 g - flour\n200 g - butter - cold\n100 g - sugar\n\nRub together.\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_merge_slices() {
        let rows = vec![
            contribution("flour", 10.0),
            contribution("butter", 5.0),
            contribution("flour", 2.5),
        ];
        assert_eq!(
            merge_slices(&rows),
            vec![("flour".to_string(), 12.5), ("butter".to_string(), 5.0)]
        );
    }

    #[test]
    fn test_pie_chart_requires_data() {
        assert!(generate_pie_chart(&[], "empty", 200, 200).is_err());
        assert!(generate_pie_chart(&[contribution("air", 0.0)], "zero", 200, 200).is_err());
    }

    #[test]
    fn test_pie_chart_is_png() {
        let rows = vec![contribution("flour", 1092.0), contribution("butter", 1434.0)];
        let png = generate_pie_chart(&rows, "fractions of calories", 400, 300).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_generate_recipe_chart() {
        let dir = sample_data_dir();
        let config = Config::new(dir.path());
        let output = dir.path().join("out/chart.png");

        let response = generate_recipe_chart(
            &config,
            "shortbread",
            &RenderOptions::default(),
            output.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(response.nutrient, "calories");
        assert_eq!(response.slices, 2);
        assert!(output.exists());
    }

    #[test]
    fn test_generate_recipe_report() {
        let dir = sample_data_dir();
        let config = Config::new(dir.path());
        let output = dir.path().join("shortbread.pdf");

        let response = generate_recipe_report(
            &config,
            "shortbread",
            &RenderOptions::default(),
            output.to_str().unwrap(),
        )
        .unwrap();

        assert!(response.success);
        assert_eq!(response.ingredients, 3);
        let bytes = fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
