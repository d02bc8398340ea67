//! Label text to the right of a score token

use crate::layout::canon::category_of;
use crate::layout::score::RowBand;
use crate::text::Line;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_BEFORE_CLOSE: Regex = Regex::new(r"\s+\)").unwrap();
    static ref SPACE_AFTER_OPEN: Regex = Regex::new(r"\(\s+").unwrap();
}

/// Characters stripped from both ends of a joined label
const LABEL_TRIM: &[char] = &[' ', '•', '·', '-', '—'];

/// Horizontal window padding around score tokens
#[derive(Debug, Clone, Copy)]
pub struct WindowPadding {
    /// Gap kept right of the token's own center
    pub left: f64,
    /// Gap kept left of the next token's center
    pub right: f64,
    /// Extra reach into the next token when the first pass finds nothing
    pub retry: f64,
}

impl Default for WindowPadding {
    fn default() -> Self {
        Self {
            left: 2.0,
            right: 2.0,
            retry: 4.0,
        }
    }
}

/// Join label fragments, keeping hyphenation and punctuation tight
pub fn smart_join<S: AsRef<str>>(parts: &[S]) -> String {
    let mut iter = parts.iter().map(AsRef::as_ref);
    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut out = first.to_string();
    for next in iter {
        if out.ends_with('-') {
            out.push_str(next.trim_start());
        } else if next.starts_with([')', ',', '.', ':', ';', '\'', '"'])
            || out.ends_with(['(', '/'])
        {
            out.push_str(next);
        } else {
            out.push(' ');
            out.push_str(next);
        }
    }

    let out = SPACE_BEFORE_CLOSE.replace_all(&out, ")");
    let out = SPACE_AFTER_OPEN.replace_all(&out, "(");
    out.trim_matches(LABEL_TRIM).to_string()
}

/// Collect and join the non-score, non-category spans in a band and x window
pub fn collect_label_window(lines: &[Line], band: &RowBand, left: f64, right: f64) -> String {
    let parts: Vec<&str> = lines
        .iter()
        .filter(|line| !line.is_empty() && band.contains(line.top()))
        .flat_map(|line| line.spans.iter())
        .filter(|span| span.bbox.intersects_x(left, right))
        .filter(|span| !span.is_score() && category_of(&span.text).is_none())
        .map(|span| span.text.as_str())
        .collect();
    smart_join(&parts)
}

/// Label of the token at `x` in a row whose next token (if any) sits at `next_x`.
///
/// The window runs from just right of the token to just left of the next one,
/// bounded by the category's column `[x0, x1]`. An empty result with a next
/// token present is retried once with the right edge pushed a little further.
pub fn resolve_label(
    lines: &[Line],
    band: &RowBand,
    x: f64,
    next_x: Option<f64>,
    column: (f64, f64),
    padding: WindowPadding,
) -> String {
    let (x0, x1) = column;
    let left = x0.max(x + padding.left);
    let right = match next_x {
        Some(nx) => x1.min(nx - padding.right),
        None => x1,
    };

    let label = collect_label_window(lines, band, left, right);
    match next_x {
        Some(nx) if label.is_empty() => {
            let widened = x1.min(nx - padding.right + padding.retry);
            collect_label_window(lines, band, left, widened)
        }
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::text::Span;

    fn span(text: &str, x0: f64, x1: f64, top: f64) -> Span {
        Span::new(text, BBox::new(x0, top, x1, top + 10.0), 10.0, "F")
    }

    #[test]
    fn test_smart_join_rules() {
        assert_eq!(smart_join(&["Goat", "Milk"]), "Goat Milk");
        assert_eq!(smart_join(&["Gluten-", "  free"]), "Gluten-free");
        assert_eq!(smart_join(&["Beans", "(Kidney", ")"]), "Beans (Kidney)");
        assert_eq!(smart_join(&["Salt", ", Sea"]), "Salt, Sea");
        assert_eq!(smart_join(&["Rice (", "Brown )"]), "Rice (Brown)");
        assert_eq!(smart_join(&["Oat/", "Bran"]), "Oat/Bran");
        assert_eq!(smart_join(&["Cod", "'s Liver"]), "Cod's Liver");
        assert_eq!(smart_join(&["• Kale", "-"]), "Kale");
        assert_eq!(smart_join::<&str>(&[]), "");
    }

    #[test]
    fn test_collect_skips_scores_and_categories() {
        let lines = vec![
            Line::new(vec![
                span("72", 20.0, 30.0, 130.0),
                span("Goat", 40.0, 60.0, 130.0),
                span("Eggs", 62.0, 80.0, 130.0),
            ]),
            Line::new(vec![span("Milk", 40.0, 60.0, 142.0)]),
            Line::new(vec![span("Outside", 40.0, 60.0, 200.0)]),
        ];
        let band = RowBand { top: 113.0, bottom: 166.0 };
        assert_eq!(collect_label_window(&lines, &band, 27.0, 100.0), "Goat Milk");
    }

    #[test]
    fn test_window_stops_before_next_token() {
        let lines = vec![Line::new(vec![
            span("72", 20.0, 30.0, 130.0),
            span("Milk", 40.0, 60.0, 130.0),
            span("45", 150.0, 160.0, 130.0),
            span("Cheese", 170.0, 200.0, 130.0),
        ])];
        let band = RowBand { top: 113.0, bottom: 166.0 };
        let padding = WindowPadding::default();
        let first = resolve_label(&lines, &band, 25.0, Some(155.0), (0.0, 612.0), padding);
        assert_eq!(first, "Milk");
        let last = resolve_label(&lines, &band, 155.0, None, (0.0, 612.0), padding);
        assert_eq!(last, "Cheese");
    }

    #[test]
    fn test_retry_widens_right_edge() {
        // label starts 1 unit left of the next token's center: outside the
        // first window (right edge 153), inside the retry window (157)
        let lines = vec![Line::new(vec![
            span("72", 20.0, 30.0, 130.0),
            span("Kale", 154.0, 170.0, 130.0),
        ])];
        let band = RowBand { top: 113.0, bottom: 166.0 };
        let padding = WindowPadding::default();
        assert_eq!(collect_label_window(&lines, &band, 27.0, 153.0), "");
        assert_eq!(
            resolve_label(&lines, &band, 25.0, Some(155.0), (0.0, 612.0), padding),
            "Kale"
        );
    }

    #[test]
    fn test_window_bounded_by_column() {
        let lines = vec![Line::new(vec![
            span("72", 20.0, 30.0, 130.0),
            span("Far", 120.0, 140.0, 130.0),
        ])];
        let band = RowBand { top: 113.0, bottom: 166.0 };
        let label = resolve_label(&lines, &band, 25.0, None, (0.0, 100.0), WindowPadding::default());
        assert_eq!(label, "");
    }
}
