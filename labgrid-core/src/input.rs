//! Positioned glyph input
//!
//! PDF decoding happens upstream: an extractor writes, per page, every
//! rendered character with its box and font metadata. This module holds that
//! contract and the helpers that load a serialized dump of it.

use crate::error::{LabgridError, Result};
use crate::geometry::BBox;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A single rendered character (or word, for word-level extraction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Text content, usually one character
    pub text: String,
    /// Left edge
    pub x0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub top: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Font size
    #[serde(default)]
    pub size: f64,
    /// Font name as reported by the extractor
    #[serde(default)]
    pub font: String,
}

impl Glyph {
    /// Create a glyph from its box and font metadata
    pub fn new(
        text: impl Into<String>,
        x0: f64,
        x1: f64,
        top: f64,
        bottom: f64,
        size: f64,
        font: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom,
            size,
            font: font.into(),
        }
    }

    /// Horizontal advance of the glyph box
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Vertical center, used for line clustering
    pub fn center_y(&self) -> f64 {
        0.5 * (self.top + self.bottom)
    }

    /// The glyph box as a [`BBox`]
    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }
}

/// Glyphs of one page plus its dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageGlyphs {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
    /// Character-level glyphs in arbitrary order
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    /// Optional word-level extraction of the same page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Glyph>,
}

impl PageGlyphs {
    /// Create an empty page of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            glyphs: Vec::new(),
            words: Vec::new(),
        }
    }
}

/// All pages of one document, in page order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphDocument {
    pub pages: Vec<PageGlyphs>,
}

impl GlyphDocument {
    /// Create a document from its pages
    pub fn new(pages: Vec<PageGlyphs>) -> Self {
        Self { pages }
    }

    /// Load a glyph dump from a JSON file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a glyph dump from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: GlyphDocument = serde_json::from_reader(reader)?;
        doc.check()?;
        Ok(doc)
    }

    /// Load a glyph dump from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: GlyphDocument = serde_json::from_str(json)?;
        doc.check()?;
        Ok(doc)
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn check(&self) -> Result<()> {
        for (i, page) in self.pages.iter().enumerate() {
            if !(page.width.is_finite() && page.height.is_finite())
                || page.width <= 0.0
                || page.height <= 0.0
            {
                return Err(LabgridError::Input(format!(
                    "page {} has invalid dimensions {}x{}",
                    i + 1,
                    page.width,
                    page.height
                )));
            }
            let bad = page.glyphs.iter().chain(page.words.iter()).find(|g| {
                !(g.x0.is_finite() && g.x1.is_finite() && g.top.is_finite() && g.bottom.is_finite())
            });
            if let Some(glyph) = bad {
                return Err(LabgridError::Input(format!(
                    "page {} has a glyph {:?} with non-finite coordinates",
                    i + 1,
                    glyph.text
                )));
            }
        }
        Ok(())
    }
}

/// Strip a font subset tag (`ABCDEF+Helvetica` -> `Helvetica`)
pub fn normalize_font(font: &str) -> &str {
    match font.split_once('+') {
        Some((_, name)) => name,
        None => font,
    }
}
