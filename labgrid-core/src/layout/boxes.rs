//! Category regions derived from header rows
//!
//! Each validated header owns the page region below it: horizontally the
//! slice of its header row, vertically down to the next header row, the
//! category's "There are Total of" line, or the page footer.

use crate::geometry::overlap_1d;
use crate::layout::canon::is_total_text;
use crate::layout::header::{row_edges, Header};
use crate::text::Line;
use tracing::debug;

/// Region of the page holding one category's items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBox {
    pub y0: f64,
    pub y1: f64,
    pub x0: f64,
    pub x1: f64,
}

/// A "There are Total of ..." line closing a category
#[derive(Debug, Clone, PartialEq)]
pub struct TotalLine {
    pub y: f64,
    pub x0: f64,
    pub x1: f64,
    pub text: String,
}

/// A validated header with its row index and resolved region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedHeader {
    pub header: Header,
    pub row: usize,
    pub region: CategoryBox,
}

/// Lines opening with the total marker, top to bottom
pub fn find_total_lines(lines: &[Line]) -> Vec<TotalLine> {
    let mut totals: Vec<TotalLine> = lines
        .iter()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let text = line.text();
            is_total_text(&text).then(|| TotalLine {
                y: line.top(),
                x0: line.x0(),
                x1: line.x1(),
                text,
            })
        })
        .collect();
    totals.sort_by(|a, b| a.y.total_cmp(&b.y));
    totals
}

/// Top of the last line mentioning "page", or the page height
pub fn find_footer_y(lines: &[Line], page_height: f64) -> f64 {
    for line in lines.iter().rev() {
        if !line.text().to_lowercase().contains("page") {
            continue;
        }
        return line
            .spans
            .iter()
            .find(|s| s.text.to_lowercase().contains("page"))
            .map(|s| s.top())
            .unwrap_or_else(|| line.top());
    }
    page_height
}

/// Initial boxes per header row: column slices, open at the bottom
fn row_boxes(rows: &[Vec<Header>], page_width: f64) -> Vec<PlacedHeader> {
    let mut placed = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        let y0 = row.iter().map(|h| h.y0).fold(f64::INFINITY, f64::min);
        let edges = row_edges(row, page_width);
        for (i, header) in row.iter().enumerate() {
            placed.push(PlacedHeader {
                header: *header,
                row: r,
                region: CategoryBox {
                    y0,
                    y1: f64::INFINITY,
                    x0: edges[i],
                    x1: edges[i + 1],
                },
            });
        }
    }
    placed
}

/// Close an open box at the first total line below it that overlaps horizontally
fn clamp_with_totals(region: &mut CategoryBox, totals: &[TotalLine], x_overlap_min: f64) {
    let hit = totals.iter().find(|t| {
        t.y > region.y0 && overlap_1d(region.x0, region.x1, t.x0, t.x1) >= x_overlap_min
    });
    if let Some(total) = hit {
        debug!(
            "Closing category box at y={:.1} on {:?}",
            total.y, total.text
        );
        region.y1 = total.y;
    }
}

/// Resolve the region of every validated header.
///
/// `rows` are the validated headers regrouped into rows. The result is
/// ordered by header y0 (stable, so headers of one row keep their x order).
pub fn build_category_boxes(
    lines: &[Line],
    rows: &[Vec<Header>],
    page_width: f64,
    page_height: f64,
    x_overlap_min: f64,
) -> Vec<PlacedHeader> {
    let totals = find_total_lines(lines);
    let mut placed = row_boxes(rows, page_width);
    for p in &mut placed {
        clamp_with_totals(&mut p.region, &totals, x_overlap_min);
    }

    placed.sort_by(|a, b| a.header.y0.total_cmp(&b.header.y0));

    let mut footer: Option<f64> = None;
    for i in 0..placed.len() {
        let current = placed[i];
        let next_y0 = placed[i + 1..]
            .iter()
            .find(|p| p.row != current.row && p.header.y0 > current.header.y0)
            .map(|p| p.header.y0);

        let region = &mut placed[i].region;
        if let Some(next) = next_y0 {
            region.y1 = region.y1.min(next);
        }
        if region.y1.is_infinite() {
            region.y1 = *footer.get_or_insert_with(|| find_footer_y(lines, page_height));
        }
    }
    placed
}
