//! Page layout analysis: headers, category regions, scores, labels and order

pub mod boxes;
pub mod canon;
pub mod header;
pub mod label;
pub mod order;
pub mod score;

pub use boxes::{build_category_boxes, CategoryBox, PlacedHeader, TotalLine};
pub use canon::{canonicalize, category_of, CategoryKind};
pub use header::{detect_headers, group_header_rows, validate_headers, Header};
pub use label::{resolve_label, smart_join, WindowPadding};
pub use order::{decide_order_mode, kmeans1d_median, order_positions, ColumnOptions, OrderMode};
pub use score::{build_row_bands, cluster_score_rows, find_scores_in_box, BandPadding, RowBand, ScoreRow, ScoreToken};
