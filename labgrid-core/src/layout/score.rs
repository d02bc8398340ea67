//! Score tokens inside a category region and the row bands around them

use crate::cluster::{cluster_running_mean, mean};
use crate::layout::boxes::CategoryBox;
use crate::text::Line;

/// A score-shaped span found inside a category box
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreToken {
    /// Raw token text, one to three digits
    pub text: String,
    /// Horizontal center of the span
    pub x: f64,
    /// Top of the line holding the span
    pub y: f64,
}

/// Score tokens sharing a visual row, sorted by x
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub tokens: Vec<ScoreToken>,
}

impl ScoreRow {
    /// Mean y of the row's tokens
    pub fn center_y(&self) -> f64 {
        let ys: Vec<f64> = self.tokens.iter().map(|t| t.y).collect();
        mean(&ys)
    }
}

/// Vertical extent searched for a row's labels, `[top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBand {
    pub top: f64,
    pub bottom: f64,
}

impl RowBand {
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y < self.bottom
    }
}

/// Padding applied around row midpoints when building bands
#[derive(Debug, Clone, Copy)]
pub struct BandPadding {
    pub up: f64,
    pub down: f64,
}

impl Default for BandPadding {
    fn default() -> Self {
        Self { up: 6.0, down: 16.0 }
    }
}

/// Score-shaped spans on lines starting inside the box, sorted by (y, x)
pub fn find_scores_in_box(lines: &[Line], region: &CategoryBox) -> Vec<ScoreToken> {
    let mut scores = Vec::new();
    for line in lines.iter().filter(|l| !l.is_empty()) {
        let y = line.top();
        if !(region.y0 <= y && y < region.y1) {
            continue;
        }
        for span in &line.spans {
            if span.bbox.intersects_x(region.x0, region.x1) && span.is_score() {
                scores.push(ScoreToken {
                    text: span.text.clone(),
                    x: span.bbox.center().x,
                    y,
                });
            }
        }
    }
    scores.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    scores
}

/// Cluster (y, x)-sorted tokens into rows by y
pub fn cluster_score_rows(tokens: Vec<ScoreToken>, tolerance: f64) -> Vec<ScoreRow> {
    cluster_running_mean(tokens, tolerance, |t| t.y)
        .into_iter()
        .map(|mut tokens| {
            tokens.sort_by(|a, b| a.x.total_cmp(&b.x));
            ScoreRow { tokens }
        })
        .collect()
}

/// One band per row center, reaching halfway to the neighbouring rows.
///
/// Bands are padded, kept inside `[y0, y1 - 1]` of the region, and the first
/// band never starts above `header_bottom + 1`.
pub fn build_row_bands(
    centers: &[f64],
    region: &CategoryBox,
    header_bottom: f64,
    padding: BandPadding,
) -> Vec<RowBand> {
    let (y0, y1) = (region.y0, region.y1);
    let last = centers.len().saturating_sub(1);

    let mut bands: Vec<RowBand> = centers
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let upper = if i == 0 { y0 } else { (centers[i - 1] + y) / 2.0 };
            let lower = if i == last { y1 } else { (y + centers[i + 1]) / 2.0 };
            let top = y0.max(upper - padding.up);
            let bottom = y1.min(lower + padding.down);
            RowBand {
                top: top.max(y0),
                bottom: bottom.min(y1 - 1.0),
            }
        })
        .collect();

    if let Some(first) = bands.first_mut() {
        first.top = first.top.max(header_bottom + 1.0);
    }
    bands
}
