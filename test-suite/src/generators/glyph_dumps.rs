//! Malformed Glyph Dumps
//!
//! Inputs the loader must reject with an input error instead of parsing.

/// A named malformed dump
#[derive(Debug, Clone)]
pub struct MalformedDump {
    pub name: &'static str,
    pub description: &'static str,
    pub json: String,
}

impl MalformedDump {
    fn new(name: &'static str, description: &'static str, json: impl Into<String>) -> Self {
        Self {
            name,
            description,
            json: json.into(),
        }
    }
}

const GLYPH: &str =
    r#"{"text": "7", "x0": 10.0, "x1": 15.0, "top": 100.0, "bottom": 110.0, "size": 10.0}"#;

fn page(width: &str, height: &str, glyphs: &str) -> String {
    format!(r#"{{"width": {width}, "height": {height}, "glyphs": [{glyphs}]}}"#)
}

fn document(pages: &[String]) -> String {
    format!(r#"{{"pages": [{}]}}"#, pages.join(", "))
}

/// Every malformed dump in the catalogue
pub fn malformed_dumps() -> Vec<MalformedDump> {
    let valid = document(&[page("612.0", "792.0", GLYPH)]);
    let truncated = valid[..valid.len() / 2].to_string();

    vec![
        MalformedDump::new("empty_input", "Zero bytes", ""),
        MalformedDump::new("not_json", "Plain text instead of JSON", "Dairy 72 Milk"),
        MalformedDump::new("truncated", "Dump cut off halfway", truncated),
        MalformedDump::new("missing_pages", "Top-level object without pages", "{}"),
        MalformedDump::new(
            "pages_not_array",
            "Pages given as an object",
            r#"{"pages": {"width": 612.0}}"#,
        ),
        MalformedDump::new(
            "zero_width",
            "Page with zero width",
            document(&[page("0.0", "792.0", GLYPH)]),
        ),
        MalformedDump::new(
            "negative_height",
            "Page with negative height",
            document(&[page("612.0", "-1.0", "")]),
        ),
        MalformedDump::new(
            "bad_second_page",
            "Valid first page, invalid second page",
            document(&[page("612.0", "792.0", GLYPH), page("612.0", "0", "")]),
        ),
        MalformedDump::new(
            "glyph_missing_coordinates",
            "Glyph without x1",
            document(&[page(
                "612.0",
                "792.0",
                r#"{"text": "7", "x0": 10.0, "top": 100.0, "bottom": 110.0}"#,
            )]),
        ),
        MalformedDump::new(
            "glyph_text_not_string",
            "Glyph text given as a number",
            document(&[page(
                "612.0",
                "792.0",
                r#"{"text": 7, "x0": 10.0, "x1": 15.0, "top": 100.0, "bottom": 110.0}"#,
            )]),
        ),
    ]
}
