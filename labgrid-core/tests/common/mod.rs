//! Glyph fixtures shared by the integration tests

#![allow(dead_code)]

use labgrid::{Glyph, GlyphDocument, PageGlyphs};

/// Horizontal advance of every fixture glyph
pub const ADVANCE: f64 = 5.0;

/// Builds a page by laying out text runs glyph by glyph
pub struct PageBuilder {
    page: PageGlyphs,
    font: String,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            page: PageGlyphs::new(612.0, 792.0),
            font: "Helvetica".to_string(),
        }
    }

    /// Font used for the following runs
    pub fn font(&mut self, font: &str) -> &mut Self {
        self.font = font.to_string();
        self
    }

    /// Text run at `(x, top)`; spaces advance without emitting a glyph
    pub fn text(&mut self, text: &str, x: f64, top: f64, size: f64) -> &mut Self {
        self.spaced(text, x, top, size, ADVANCE)
    }

    /// Text run with a custom advance between glyph origins
    pub fn spaced(&mut self, text: &str, x: f64, top: f64, size: f64, advance: f64) -> &mut Self {
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x0 = x + advance * i as f64;
            self.page.glyphs.push(Glyph::new(
                ch.to_string(),
                x0,
                x0 + ADVANCE,
                top,
                top + size,
                size,
                self.font.clone(),
            ));
        }
        self
    }

    /// Category header in bold, 12pt
    pub fn header(&mut self, name: &str, x: f64, top: f64) -> &mut Self {
        let font = std::mem::replace(&mut self.font, "Helvetica-Bold".to_string());
        self.text(name, x, top, 12.0);
        self.font = font;
        self
    }

    /// Score token followed by its label 10 units to the right
    pub fn item(&mut self, score: u16, label: &str, x: f64, top: f64) -> &mut Self {
        let score = score.to_string();
        let label_x = x + ADVANCE * score.len() as f64 + 10.0;
        self.text(&score, x, top, 10.0);
        self.text(label, label_x, top, 10.0)
    }

    /// Word-level entry, as a word extractor would report it
    pub fn word(&mut self, text: &str, x: f64, top: f64, size: f64) -> &mut Self {
        let x1 = x + ADVANCE * text.chars().count() as f64;
        self.page
            .words
            .push(Glyph::new(text, x, x1, top, top + size, size, self.font.clone()));
        self
    }

    pub fn build(&self) -> PageGlyphs {
        self.page.clone()
    }
}

/// Dairy and Eggs side by side, each with items
pub fn dairy_eggs_page() -> PageGlyphs {
    PageBuilder::new()
        .header("Dairy", 50.0, 100.0)
        .header("Eggs", 350.0, 100.0)
        .item(72, "Milk", 20.0, 130.0)
        .item(91, "Egg White", 320.0, 130.0)
        .item(45, "Cheese", 20.0, 170.0)
        .item(81, "Egg Yolk", 320.0, 170.0)
        .build()
}

pub fn document(pages: Vec<PageGlyphs>) -> GlyphDocument {
    GlyphDocument::new(pages)
}
