//! Category header detection, row grouping and validation

use crate::cluster::{cluster_running_mean, mean, nearest_index};
use crate::input::{normalize_font, Glyph};
use crate::layout::canon::{category_of, CategoryKind};
use crate::text::{Line, Span};
use tracing::debug;

/// Horizontal distance within which a spliced word counts as an existing header
const AUGMENT_NEAR_X: f64 = 3.0;

/// A span naming one of the report categories
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub kind: CategoryKind,
    pub x0: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Every header-naming span on the page, sorted by (y0, x0)
pub fn detect_headers(lines: &[Line]) -> Vec<Header> {
    let mut headers: Vec<Header> = lines
        .iter()
        .flat_map(|line| line.spans.iter())
        .filter_map(|span| {
            category_of(&span.text).map(|kind| Header {
                kind,
                x0: span.x0(),
                y0: span.top(),
                y1: span.bottom(),
            })
        })
        .collect();
    headers.sort_by(|a, b| a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0)));
    headers
}

/// Group headers (sorted by y0) that share a baseline; rows come back sorted by x0
pub fn group_header_rows(headers: Vec<Header>, tolerance: f64) -> Vec<Vec<Header>> {
    let mut rows = cluster_running_mean(headers, tolerance, |h| h.y0);
    for row in &mut rows {
        row.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    }
    rows
}

/// Column boundaries of a header row: 0, midpoints between neighbours, page width
pub fn row_edges(row: &[Header], page_width: f64) -> Vec<f64> {
    let mut edges = Vec::with_capacity(row.len() + 1);
    edges.push(0.0);
    edges.extend(row.windows(2).map(|pair| (pair[0].x0 + pair[1].x0) / 2.0));
    edges.push(page_width);
    edges
}

/// True if a score-shaped span sits below the header within its column and `y_range`
pub fn header_has_scores(
    lines: &[Line],
    row: &[Header],
    index: usize,
    page_width: f64,
    y_range: f64,
) -> bool {
    let edges = row_edges(row, page_width);
    let (x0, x1) = (edges[index], edges[index + 1]);
    let y0 = row[index].y0;
    let y1 = y0 + y_range;

    lines
        .iter()
        .filter(|line| {
            let top = line.top();
            y0 <= top && top < y1
        })
        .flat_map(|line| line.spans.iter())
        .any(|span| span.bbox.intersects_x(x0, x1) && span.is_score())
}

/// Keep only headers with score-shaped text underneath them, in row order
pub fn validate_headers(
    lines: &[Line],
    rows: &[Vec<Header>],
    page_width: f64,
    y_range: f64,
) -> Vec<Header> {
    let mut valid = Vec::new();
    for row in rows {
        for (i, header) in row.iter().enumerate() {
            if header_has_scores(lines, row, i, page_width, y_range) {
                valid.push(*header);
            } else {
                debug!(
                    "Rejecting header {} at ({:.1}, {:.1}): no scores within {} units",
                    header.kind, header.x0, header.y0, y_range
                );
            }
        }
    }
    valid
}

/// True if any span of the glyph lines names a category
pub fn has_header_span(glyph_lines: &[Vec<Span>]) -> bool {
    glyph_lines
        .iter()
        .flatten()
        .any(|span| category_of(&span.text).is_some())
}

fn line_center_y(spans: &[Span]) -> f64 {
    let tops: Vec<f64> = spans.iter().map(Span::top).collect();
    mean(&tops)
}

fn line_has_header(spans: &[Span], kind: CategoryKind, near_x: f64) -> bool {
    spans
        .iter()
        .any(|s| category_of(&s.text) == Some(kind) && (s.x0() - near_x).abs() <= AUGMENT_NEAR_X)
}

/// Splice category words from word-level extraction into the nearest glyph line.
///
/// Used when no header survived character-level span building (some fonts
/// encode header glyphs in ways that break span merging). A word is added as
/// a span carrying the canonical name, unless the nearest line already has
/// that header near the same x. Returns the number of spliced headers.
pub fn augment_headers_from_words(glyph_lines: &mut Vec<Vec<Span>>, words: &[Glyph]) -> usize {
    let mut added = 0;
    for word in words {
        let Some(kind) = category_of(word.text.trim()) else {
            continue;
        };

        if glyph_lines.is_empty() {
            glyph_lines.push(Vec::new());
        }
        let centers: Vec<f64> = glyph_lines.iter().map(|l| line_center_y(l)).collect();
        let target = nearest_index(word.center_y(), &centers);

        let line = &mut glyph_lines[target];
        if line_has_header(line, kind, word.x0) {
            continue;
        }
        line.push(Span::new(
            kind.as_str(),
            word.bbox(),
            word.size,
            normalize_font(&word.font),
        ));
        line.sort_by(|a, b| a.x0().total_cmp(&b.x0()));
        added += 1;
    }
    added
}
