//! Line parsing for recipe and nutrition files
//!
//! Both file formats share one line shape: `<mass> g - <item> - <notes>`.
//! [`parse_line`] splits a single line into its fields, and [`RecipeParser`]
//! walks a recipe file line by line until the ingredient list ends.

use thiserror::Error;

use crate::models::IngredientEntry;

/// Separator between the fields of a line
pub const FIELD_DELIMITER: &str = " - ";

/// Suffix stripped from mass fields
pub const GRAMS_SUFFIX: &str = " g";

/// Suffix stripped from the calorie line of a nutrition file
pub const CALORIES_SUFFIX: &str = " cal";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

/// Fields of one parsed line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLine {
    /// Mass in grams, `None` when the first field is empty
    pub mass: Option<f64>,
    pub item: Option<String>,
    pub notes: Option<String>,
}

/// Parse one line into `(mass, item, notes)`
///
/// The line is lowercased and trimmed, then split on `" - "` into at most
/// three fields. Anything after the second delimiter belongs to the notes.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let lower = line.to_lowercase();
    let mut fields = lower.trim().splitn(3, FIELD_DELIMITER);

    let mass = parse_amount(fields.next().unwrap_or_default(), GRAMS_SUFFIX)?;
    let item = fields.next().map(|s| s.trim().to_string());
    let notes = fields.next().map(|s| s.trim().to_string());

    Ok(ParsedLine { mass, item, notes })
}

/// Parse a numeric field after removing `suffix`
///
/// An empty field yields `Ok(None)`. Every occurrence of the suffix is
/// removed before parsing, so `"100 g"` and `"100"` are equivalent.
pub fn parse_amount(field: &str, suffix: &str) -> Result<Option<f64>, ParseError> {
    if field.is_empty() {
        return Ok(None);
    }

    let stripped = field.replace(suffix, "");
    let trimmed = stripped.trim();
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))
}

/// State of a [`RecipeParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Still reading ingredient lines
    Accumulating,
    /// The ingredient list has ended; remaining lines are ignored
    Terminated,
}

/// Two-state parser for the ingredient list at the top of a recipe file
///
/// Lines are accepted while they describe an ingredient. The first line
/// whose mass field is absent, unparsable, non-finite or not positive moves
/// the parser to [`ParserState::Terminated`] for good.
#[derive(Debug)]
pub struct RecipeParser {
    state: ParserState,
    entries: Vec<IngredientEntry>,
}

impl RecipeParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Accumulating,
            entries: Vec::new(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feed one line and return the resulting state
    pub fn feed(&mut self, line: &str) -> ParserState {
        if self.state == ParserState::Terminated {
            return self.state;
        }

        match ingredient_from_line(line) {
            Some(entry) => self.entries.push(entry),
            None => {
                tracing::trace!(line, "ingredient list ended");
                self.state = ParserState::Terminated;
            }
        }

        self.state
    }

    /// Consume the parser, returning the ingredients in file order
    pub fn finish(self) -> Vec<IngredientEntry> {
        self.entries
    }
}

impl Default for RecipeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Termination predicate: `None` means the line does not continue the list
fn ingredient_from_line(line: &str) -> Option<IngredientEntry> {
    let parsed = parse_line(line).ok()?;
    let mass = parsed.mass.filter(|m| m.is_finite() && *m > 0.0)?;

    Some(IngredientEntry {
        mass_grams: mass,
        item_name: parsed.item.unwrap_or_default(),
        notes: parsed.notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_full() {
        let parsed = parse_line("  250 g - Flour - Sifted  \n").unwrap();
        assert_eq!(parsed.mass, Some(250.0));
        assert_eq!(parsed.item.as_deref(), Some("flour"));
        assert_eq!(parsed.notes.as_deref(), Some("sifted"));
    }

    #[test]
    fn test_parse_line_without_notes() {
        let parsed = parse_line("12.5 g - salt").unwrap();
        assert_eq!(parsed.mass, Some(12.5));
        assert_eq!(parsed.item.as_deref(), Some("salt"));
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn test_parse_line_notes_keep_extra_delimiters() {
        let parsed = parse_line("5 g - yeast - dry - instant").unwrap();
        assert_eq!(parsed.notes.as_deref(), Some("dry - instant"));
    }

    #[test]
    fn test_parse_line_empty_is_no_mass() {
        let parsed = parse_line("").unwrap();
        assert_eq!(parsed, ParsedLine::default());

        let parsed = parse_line("   \n").unwrap();
        assert_eq!(parsed.mass, None);
    }

    #[test]
    fn test_parse_line_invalid_number() {
        let err = parse_line("Notes:").unwrap_err();
        assert_eq!(err, ParseError::InvalidNumber("notes:".to_string()));
    }

    #[test]
    fn test_parse_amount_suffixes() {
        assert_eq!(parse_amount("100 g", GRAMS_SUFFIX), Ok(Some(100.0)));
        assert_eq!(parse_amount("100", GRAMS_SUFFIX), Ok(Some(100.0)));
        assert_eq!(parse_amount("364 cal", CALORIES_SUFFIX), Ok(Some(364.0)));
        assert_eq!(parse_amount("", GRAMS_SUFFIX), Ok(None));
        assert!(parse_amount("lots g", GRAMS_SUFFIX).is_err());
    }

    #[test]
    fn test_recipe_parser_stops_at_first_non_ingredient() {
        let mut parser = RecipeParser::new();
        let lines = ["100 g - flour", "200 g - sugar", "Notes:", "300 g - butter"];
        for line in lines {
            parser.feed(line);
        }
        assert_eq!(parser.state(), ParserState::Terminated);

        let entries = parser.finish();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item_name, "flour");
        assert_eq!(entries[1].item_name, "sugar");
    }

    #[test]
    fn test_recipe_parser_blank_line_terminates() {
        let mut parser = RecipeParser::new();
        assert_eq!(parser.feed("100 g - flour"), ParserState::Accumulating);
        assert_eq!(parser.feed(""), ParserState::Terminated);
        assert_eq!(parser.feed("50 g - water"), ParserState::Terminated);
        assert_eq!(parser.finish().len(), 1);
    }

    #[test]
    fn test_recipe_parser_rejects_non_positive_mass() {
        let mut parser = RecipeParser::new();
        assert_eq!(parser.feed("0 g - air"), ParserState::Terminated);
        assert!(parser.finish().is_empty());

        let mut parser = RecipeParser::new();
        assert_eq!(parser.feed("-5 g - debt"), ParserState::Terminated);

        let mut parser = RecipeParser::new();
        assert_eq!(parser.feed("inf g - everything"), ParserState::Terminated);
    }

    #[test]
    fn test_recipe_parser_missing_item_is_empty_name() {
        let mut parser = RecipeParser::new();
        parser.feed("40 g");
        let entries = parser.finish();
        assert_eq!(entries[0].mass_grams, 40.0);
        assert_eq!(entries[0].item_name, "");
        assert_eq!(entries[0].notes, None);
    }
}
