//! Merging glyphs into text spans
//!
//! A span is a run of horizontally adjacent glyphs that share font and size.
//! Gaps wider than a fraction of the running average glyph width become a
//! space; wider gaps still end the span.

use crate::geometry::BBox;
use crate::input::{normalize_font, Glyph};
use crate::layout::canon::{category_of, is_score_text};

/// Characters that never take a space in front of them
const NO_SPACE_BEFORE: &str = "),.:%;!?]&";
/// Characters that never take a space after them
const NO_SPACE_AFTER: &str = "([/$";

/// Span merge thresholds, as multiples of the average glyph width
#[derive(Debug, Clone, Copy)]
pub struct SpanOptions {
    /// Insert a space when the gap exceeds this factor
    pub space_factor: f64,
    /// Start a new span when the gap exceeds this factor
    pub break_factor: f64,
}

impl Default for SpanOptions {
    fn default() -> Self {
        Self {
            space_factor: 0.45,
            break_factor: 1.25,
        }
    }
}

/// A run of glyphs with consistent font and size
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Trimmed text
    pub text: String,
    /// Union of the glyph boxes
    pub bbox: BBox,
    /// Font size
    pub size: f64,
    /// Normalized font name
    pub font: String,
}

impl Span {
    /// Create a span directly, e.g. from word-level extraction
    pub fn new(text: impl Into<String>, bbox: BBox, size: f64, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox,
            size,
            font: font.into(),
        }
    }

    pub fn x0(&self) -> f64 {
        self.bbox.x0
    }

    pub fn x1(&self) -> f64 {
        self.bbox.x1
    }

    pub fn top(&self) -> f64 {
        self.bbox.y0
    }

    pub fn bottom(&self) -> f64 {
        self.bbox.y1
    }

    /// True for one-to-three digit integer tokens
    pub fn is_score(&self) -> bool {
        is_score_text(&self.text)
    }
}

/// Span under construction; keeps the raw text until it is flushed
struct OpenSpan {
    text: String,
    bbox: BBox,
    size: f64,
    font: String,
}

impl OpenSpan {
    fn start(glyph: &Glyph) -> Self {
        Self {
            text: glyph.text.clone(),
            bbox: glyph.bbox(),
            size: glyph.size,
            font: normalize_font(&glyph.font).to_string(),
        }
    }

    fn finish(self) -> Option<Span> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Span {
            text: text.to_string(),
            bbox: self.bbox,
            size: self.size,
            font: self.font,
        })
    }
}

/// Average glyph width with floors against degenerate zero-width glyphs.
///
/// Falls back to half the average font size of the whole line when no
/// positive widths were seen.
fn average_width(widths: &[f64], line: &[&Glyph]) -> f64 {
    let good: Vec<f64> = widths.iter().copied().filter(|w| *w > 0.0).collect();
    if !good.is_empty() {
        return (good.iter().sum::<f64>() / good.len() as f64).max(1.0);
    }
    if line.is_empty() {
        return 4.0;
    }
    let avg_size = line.iter().map(|g| g.size).sum::<f64>() / line.len() as f64;
    (avg_size * 0.5).max(3.0)
}

fn wants_space(prev: &str, next: &str) -> bool {
    if prev == " " || next == " " {
        return false;
    }
    let blocked_before = next.chars().next().is_some_and(|c| NO_SPACE_BEFORE.contains(c));
    let blocked_after = prev.chars().last().is_some_and(|c| NO_SPACE_AFTER.contains(c));
    !blocked_before && !blocked_after
}

/// Merge the glyphs of one visual line into spans, left to right
pub fn build_spans(line: &[Glyph], options: &SpanOptions) -> Vec<Span> {
    let mut sorted: Vec<&Glyph> = line.iter().collect();
    sorted.sort_by(|a, b| a.x0.total_cmp(&b.x0));

    let Some(first) = sorted.first() else {
        return Vec::new();
    };

    let mut spans = Vec::new();
    let mut widths = vec![first.width().max(0.0)];
    let mut current: Option<OpenSpan> = None;
    let mut last_x1: Option<f64> = None;
    let mut last_text = String::new();

    for glyph in &sorted {
        let gap = last_x1.map_or(0.0, |x1| glyph.x0 - x1);

        let avg = average_width(&widths, &sorted);
        let breaks = current.as_ref().map(|open| {
            let same_style = (glyph.size - open.size).abs() < 0.01
                && normalize_font(&glyph.font) == open.font;
            !same_style || gap > options.break_factor * avg
        });

        match breaks {
            Some(false) => {
                if let Some(open) = current.as_mut() {
                    if wants_space(&last_text, &glyph.text) && gap > options.space_factor * avg {
                        open.text.push(' ');
                        open.bbox.x1 = open.bbox.x1.max(glyph.x0);
                    }
                    open.text.push_str(&glyph.text);
                    open.bbox.extend(&glyph.bbox());
                }
                widths.push(glyph.width().max(0.0));
            }
            Some(true) => {
                if let Some(span) = current.take().and_then(OpenSpan::finish) {
                    spans.push(span);
                }
                current = Some(OpenSpan::start(glyph));
                widths = vec![glyph.width().max(0.0)];
            }
            None => current = Some(OpenSpan::start(glyph)),
        }

        last_x1 = Some(glyph.x1);
        last_text.clone_from(&glyph.text);
    }

    if let Some(span) = current.and_then(OpenSpan::finish) {
        spans.push(span);
    }
    spans
}

/// Drop header spans rendered twice at (almost) the same position.
///
/// Only spans naming a category are candidates; two of them are duplicates
/// when they name the same category and their centers lie within
/// `tolerance` on both axes. Output is ordered by `x0`.
pub fn dedup_header_spans(mut spans: Vec<Span>, tolerance: f64) -> Vec<Span> {
    spans.sort_by(|a, b| a.x0().total_cmp(&b.x0()));

    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(kind) = category_of(&span.text) {
            let c = span.bbox.center();
            let duplicate = kept.iter().any(|k| {
                let kc = k.bbox.center();
                category_of(&k.text) == Some(kind)
                    && (c.x - kc.x).abs() <= tolerance
                    && (c.y - kc.y).abs() <= tolerance
            });
            if duplicate {
                continue;
            }
        }
        kept.push(span);
    }
    kept
}
