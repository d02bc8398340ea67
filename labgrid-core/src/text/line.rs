//! Grouping glyphs and spans into horizontal text lines

use crate::cluster::cluster_running_mean;
use crate::input::Glyph;
use crate::text::span::Span;

/// Spans sharing a baseline, ordered left to right
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(mut spans: Vec<Span>) -> Self {
        spans.sort_by(|a, b| a.x0().total_cmp(&b.x0()));
        Self { spans }
    }

    /// Minimum span top; the line's position for every box membership test
    pub fn top(&self) -> f64 {
        self.spans
            .iter()
            .map(Span::top)
            .fold(f64::INFINITY, f64::min)
    }

    /// Span texts joined with single spaces
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Leftmost span edge
    pub fn x0(&self) -> f64 {
        self.spans.iter().map(Span::x0).fold(f64::INFINITY, f64::min)
    }

    /// Rightmost span edge
    pub fn x1(&self) -> f64 {
        self.spans
            .iter()
            .map(Span::x1)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Cluster a page's glyphs into visual lines by vertical center.
///
/// Glyphs are visited in (center, x0) order and compared against the running
/// mean center of the open line. Each line comes back sorted by `x0`.
pub fn cluster_glyph_lines(glyphs: &[Glyph], tolerance: f64) -> Vec<Vec<Glyph>> {
    let mut sorted = glyphs.to_vec();
    sorted.sort_by(|a, b| {
        a.center_y()
            .total_cmp(&b.center_y())
            .then(a.x0.total_cmp(&b.x0))
    });

    let mut lines = cluster_running_mean(sorted, tolerance, Glyph::center_y);
    for line in &mut lines {
        line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    }
    lines
}

/// Re-cluster spans from all glyph lines into [`Line`]s by span top.
///
/// Spans are visited in (top, x0) order; this second pass merges fragments
/// whose glyph centers drifted apart (mixed font sizes on one baseline).
pub fn cluster_span_lines(spans: Vec<Span>, tolerance: f64) -> Vec<Line> {
    let mut sorted = spans;
    sorted.sort_by(|a, b| a.top().total_cmp(&b.top()).then(a.x0().total_cmp(&b.x0())));

    cluster_running_mean(sorted, tolerance, Span::top)
        .into_iter()
        .map(Line::new)
        .collect()
}
