//! Reading order of a category's items
//!
//! Reports lay items out either row by row or in up to four columns that
//! read top to bottom. [`OrderMode::Auto`] tells the two apart per category
//! by running a small 1-D k-means over the item x positions: tight,
//! well-populated clusters mean columns.

use crate::cluster::{mean, median_sorted, nearest_index};
use crate::error::{LabgridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// How items of a category are ordered in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Decide per category
    #[default]
    Auto,
    /// Sort by (row, x)
    Row,
    /// Sort by (column, row) over up to four columns
    Column4,
}

impl FromStr for OrderMode {
    type Err = LabgridError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(OrderMode::Auto),
            "row" => Ok(OrderMode::Row),
            "column4" => Ok(OrderMode::Column4),
            other => Err(LabgridError::InvalidOption(format!(
                "unknown order mode '{other}' (expected auto, row or column4)"
            ))),
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderMode::Auto => "auto",
            OrderMode::Row => "row",
            OrderMode::Column4 => "column4",
        })
    }
}

/// Column detection parameters
#[derive(Debug, Clone, Copy)]
pub struct ColumnOptions {
    /// Number of k-means centers
    pub k: usize,
    /// Maximum k-means iterations
    pub iterations: usize,
    /// Centers moving less than this are converged
    pub epsilon: f64,
    /// Minimum number of populated columns for column order
    pub min_populated: usize,
    /// Maximum mean distance of items from their column center
    pub max_deviation: f64,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            k: 4,
            iterations: 25,
            epsilon: 0.25,
            min_populated: 3,
            max_deviation: 20.0,
        }
    }
}

/// Values at the given quantiles of `sorted`, picking index `floor(q * (n - 1))`
pub fn quantiles(sorted: &[f64], qs: &[f64]) -> Vec<f64> {
    if sorted.is_empty() {
        return vec![0.0; qs.len()];
    }
    let last = sorted.len() - 1;
    qs.iter()
        .map(|q| {
            let i = (q * last as f64).max(0.0) as usize;
            sorted[i.min(last)]
        })
        .collect()
}

/// 1-D k-means with median updates; returns the centers sorted ascending.
///
/// Centers start at the `(i + 0.5) / k` quantiles. Empty clusters take the
/// global median. Iteration stops once every center moves less than `epsilon`.
pub fn kmeans1d_median(xs: &[f64], k: usize, iterations: usize, epsilon: f64) -> Vec<f64> {
    if xs.is_empty() {
        return Vec::new();
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let global_median = median_sorted(&sorted);
    if k <= 1 {
        return vec![global_median];
    }

    let qs: Vec<f64> = (0..k).map(|i| (i as f64 + 0.5) / k as f64).collect();
    let mut centers = quantiles(&sorted, &qs);

    for _ in 0..iterations {
        let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); k];
        for &x in &sorted {
            buckets[nearest_index(x, &centers)].push(x);
        }
        // buckets fill in ascending order, so each is already sorted
        let next: Vec<f64> = buckets
            .iter()
            .map(|b| if b.is_empty() { global_median } else { median_sorted(b) })
            .collect();
        let converged = next
            .iter()
            .zip(&centers)
            .all(|(n, c)| (n - c).abs() < epsilon);
        centers = next;
        if converged {
            break;
        }
    }

    centers.sort_by(f64::total_cmp);
    centers
}

/// Pick row or column order for items at `(x, row_y)` positions
pub fn decide_order_mode(positions: &[(f64, f64)], opts: &ColumnOptions) -> OrderMode {
    if positions.is_empty() {
        return OrderMode::Row;
    }
    let xs: Vec<f64> = positions.iter().map(|p| p.0).collect();
    let centers = kmeans1d_median(&xs, opts.k, opts.iterations, opts.epsilon);

    let mut populated = vec![false; centers.len()];
    let mut deviations = Vec::with_capacity(xs.len());
    for &x in &xs {
        let col = nearest_index(x, &centers);
        populated[col] = true;
        deviations.push((x - centers[col]).abs());
    }
    let populated = populated.iter().filter(|p| **p).count();
    let deviation = mean(&deviations);

    let mode = if populated >= opts.min_populated && deviation < opts.max_deviation {
        OrderMode::Column4
    } else {
        OrderMode::Row
    };
    trace!(
        "Order decision: {} populated columns, mean deviation {:.2} -> {}",
        populated,
        deviation,
        mode
    );
    mode
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Permutation putting items at `(x, row_y)` positions into reading order.
///
/// `Auto` is resolved through [`decide_order_mode`] first. Column order
/// assigns each item its nearest k-means column and nearest distinct row,
/// then sorts stably by (column, row).
pub fn order_positions(positions: &[(f64, f64)], mode: OrderMode, opts: &ColumnOptions) -> Vec<usize> {
    let mode = match mode {
        OrderMode::Auto => decide_order_mode(positions, opts),
        explicit => explicit,
    };

    let mut order: Vec<usize> = (0..positions.len()).collect();
    match mode {
        OrderMode::Column4 => {
            let xs: Vec<f64> = positions.iter().map(|p| p.0).collect();
            let centers = kmeans1d_median(&xs, opts.k, opts.iterations, opts.epsilon);
            let mut rows: Vec<f64> = positions.iter().map(|p| round2(p.1)).collect();
            rows.sort_by(f64::total_cmp);
            rows.dedup();

            let keys: Vec<(usize, usize)> = positions
                .iter()
                .map(|&(x, y)| (nearest_index(x, &centers), nearest_index(y, &rows)))
                .collect();
            order.sort_by_key(|&i| keys[i]);
        }
        _ => {
            order.sort_by(|&a, &b| {
                let (ax, ay) = positions[a];
                let (bx, by) = positions[b];
                ay.total_cmp(&by).then(ax.total_cmp(&bx))
            });
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<(f64, f64)> {
        // 4 columns x 3 rows, listed row-major
        let mut points = Vec::new();
        for y in [140.0, 180.0, 220.0] {
            for x in [60.0, 190.0, 320.0, 450.0] {
                points.push((x, y));
            }
        }
        points
    }

    #[test]
    fn test_order_mode_from_str() {
        assert_eq!("auto".parse::<OrderMode>().unwrap(), OrderMode::Auto);
        assert_eq!("ROW".parse::<OrderMode>().unwrap(), OrderMode::Row);
        assert_eq!("column4".parse::<OrderMode>().unwrap(), OrderMode::Column4);
        let err = "columns".parse::<OrderMode>().unwrap_err();
        assert!(matches!(err, LabgridError::InvalidOption(_)));
        assert_eq!(OrderMode::Column4.to_string(), "column4");
    }

    #[test]
    fn test_quantiles() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantiles(&sorted, &[0.125, 0.375, 0.625, 0.875]), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(quantiles(&[], &[0.5, 0.5]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_kmeans_finds_four_columns() {
        let xs: Vec<f64> = grid().iter().map(|p| p.0).collect();
        let centers = kmeans1d_median(&xs, 4, 25, 0.25);
        assert_eq!(centers, vec![60.0, 190.0, 320.0, 450.0]);
    }

    #[test]
    fn test_kmeans_degenerate_inputs() {
        assert!(kmeans1d_median(&[], 4, 25, 0.25).is_empty());
        assert_eq!(kmeans1d_median(&[3.0, 1.0, 2.0], 1, 25, 0.25), vec![2.0]);
        assert_eq!(kmeans1d_median(&[7.0], 4, 25, 0.25), vec![7.0; 4]);
    }

    #[test]
    fn test_grid_selects_columns() {
        let opts = ColumnOptions::default();
        assert_eq!(decide_order_mode(&grid(), &opts), OrderMode::Column4);

        let order = order_positions(&grid(), OrderMode::Auto, &opts);
        // column-major over a row-major listing
        assert_eq!(order, vec![0, 4, 8, 1, 5, 9, 2, 6, 10, 3, 7, 11]);
    }

    #[test]
    fn test_single_column_falls_back_to_rows() {
        let points = vec![(60.0, 220.0), (60.0, 140.0), (60.0, 180.0)];
        let opts = ColumnOptions::default();
        assert_eq!(decide_order_mode(&points, &opts), OrderMode::Row);
        assert_eq!(order_positions(&points, OrderMode::Auto, &opts), vec![1, 2, 0]);
    }

    #[test]
    fn test_scattered_columns_fall_back_to_rows() {
        // three x clusters, but spread wide around their centers
        let points = vec![
            (10.0, 100.0),
            (70.0, 100.0),
            (200.0, 100.0),
            (260.0, 140.0),
            (400.0, 140.0),
            (470.0, 140.0),
        ];
        let opts = ColumnOptions::default();
        let centers = kmeans1d_median(&points.iter().map(|p| p.0).collect::<Vec<_>>(), 4, 25, 0.25);
        assert_eq!(centers.len(), 4);
        assert_eq!(decide_order_mode(&points, &opts), OrderMode::Row);
    }

    #[test]
    fn test_explicit_modes_override_auto() {
        let opts = ColumnOptions::default();
        let row = order_positions(&grid(), OrderMode::Row, &opts);
        assert_eq!(row, (0..12).collect::<Vec<_>>());

        let points = vec![(60.0, 180.0), (60.0, 140.0)];
        assert_eq!(order_positions(&points, OrderMode::Column4, &opts), vec![1, 0]);
        assert!(order_positions(&[], OrderMode::Auto, &opts).is_empty());
    }
}
