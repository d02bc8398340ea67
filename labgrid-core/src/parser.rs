//! Page and document parsing
//!
//! [`ReportParser`] runs the full pipeline on each page of a
//! [`GlyphDocument`](crate::input::GlyphDocument):
//!
//! 1. glyphs are clustered into lines and merged into spans
//! 2. spans are re-clustered into [`Line`]s
//! 3. category headers are detected, grouped into rows and validated
//! 4. each validated header gets its page region
//! 5. score tokens inside the region are grouped into rows and labelled
//! 6. items are put into reading order
//!
//! Pages are independent; the only document-level state is the set of
//! required categories seen, merged after all pages are done.

use crate::error::{LabgridError, Result};
use crate::input::{GlyphDocument, PageGlyphs};
use crate::layout::boxes::{build_category_boxes, PlacedHeader};
use crate::layout::canon::CategoryKind;
use crate::layout::header::{
    augment_headers_from_words, detect_headers, group_header_rows, has_header_span, validate_headers,
};
use crate::layout::label::{resolve_label, WindowPadding};
use crate::layout::order::{order_positions, ColumnOptions, OrderMode};
use crate::layout::score::{build_row_bands, cluster_score_rows, find_scores_in_box, BandPadding};
use crate::report::{Category, Item, Page, ParseResult, Section};
use crate::text::{build_spans, cluster_glyph_lines, cluster_span_lines, dedup_header_spans, Line, SpanOptions};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parser identifier stamped on stored results
pub const PARSER_VERSION: &str = "food-v6g";

/// Categories every accepted document must contain
pub const REQUIRED_HEADERS: [CategoryKind; 2] = [CategoryKind::Dairy, CategoryKind::Eggs];

/// Default last page of the range
const DEFAULT_END_PAGE: usize = 999;

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Vertical tolerance for glyph and span line clustering
    pub y_line_tol: f64,
    /// Vertical tolerance for grouping headers into rows
    pub row_y_tol: f64,
    /// Minimum horizontal overlap for a total line to close a category
    pub x_overlap_min: f64,
    /// Vertical tolerance for grouping score tokens into rows
    pub row_cluster_tol: f64,
    /// Band padding above a row midpoint
    pub row_pad_up: f64,
    /// Band padding below a row midpoint
    pub row_pad_down: f64,
    /// Label window gap right of a score token
    pub window_left_pad: f64,
    /// Label window gap left of the next score token
    pub window_right_pad: f64,
    /// Extra reach of the label window on retry
    pub window_retry_pad: f64,
    /// How far below a header score tokens must appear for it to count
    pub header_validate_y_range: f64,
    /// Gap (in average glyph widths) that becomes a space
    pub x_space_factor: f64,
    /// Gap (in average glyph widths) that ends a span
    pub x_break_factor: f64,
    /// Distance under which two spans naming the same header are duplicates
    pub header_dedup_tol: f64,
    /// Splice header words from word-level extraction when no header span exists
    pub augment_headers: bool,
    /// Number of column centers for order detection
    pub kmeans_k: usize,
    /// Maximum k-means iterations
    pub kmeans_iterations: usize,
    /// k-means convergence threshold
    pub kmeans_epsilon: f64,
    /// Populated columns needed for column order
    pub column_min_populated: usize,
    /// Mean deviation from column centers allowed for column order
    pub column_max_deviation: f64,
    /// Item ordering
    pub order_mode: OrderMode,
    /// First page to parse (1-based, inclusive)
    pub start_page: usize,
    /// Last page to parse (1-based, inclusive); clamped to the page count
    pub end_page: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            y_line_tol: 5.0,
            row_y_tol: 6.0,
            x_overlap_min: 8.0,
            row_cluster_tol: 10.0,
            row_pad_up: 6.0,
            row_pad_down: 16.0,
            window_left_pad: 2.0,
            window_right_pad: 2.0,
            window_retry_pad: 4.0,
            header_validate_y_range: 220.0,
            x_space_factor: 0.45,
            x_break_factor: 1.25,
            header_dedup_tol: 1.5,
            augment_headers: true,
            kmeans_k: 4,
            kmeans_iterations: 25,
            kmeans_epsilon: 0.25,
            column_min_populated: 3,
            column_max_deviation: 20.0,
            order_mode: OrderMode::Auto,
            start_page: 1,
            end_page: DEFAULT_END_PAGE,
        }
    }
}

impl ParseOptions {
    /// Check the page range
    pub fn validate(&self) -> Result<()> {
        if self.start_page == 0 {
            return Err(LabgridError::InvalidOption(
                "start page is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.start_page > self.end_page {
            return Err(LabgridError::InvalidOption(format!(
                "start page {} is after end page {}",
                self.start_page, self.end_page
            )));
        }
        Ok(())
    }

    fn span_options(&self) -> SpanOptions {
        SpanOptions {
            space_factor: self.x_space_factor,
            break_factor: self.x_break_factor,
        }
    }

    fn band_padding(&self) -> BandPadding {
        BandPadding {
            up: self.row_pad_up,
            down: self.row_pad_down,
        }
    }

    fn window_padding(&self) -> WindowPadding {
        WindowPadding {
            left: self.window_left_pad,
            right: self.window_right_pad,
            retry: self.window_retry_pad,
        }
    }

    fn column_options(&self) -> ColumnOptions {
        ColumnOptions {
            k: self.kmeans_k,
            iterations: self.kmeans_iterations,
            epsilon: self.kmeans_epsilon,
            min_populated: self.column_min_populated,
            max_deviation: self.column_max_deviation,
        }
    }
}

/// Result of parsing a single page
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    /// The page, if it had at least one validated header
    pub page: Option<Page>,
    /// Required categories among the page's validated headers
    pub seen_required: BTreeSet<CategoryKind>,
}

/// An item with the position used to order it
struct PlacedItem {
    item: Item,
    x: f64,
    row_y: f64,
}

/// Food sensitivity report parser
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    options: ParseOptions,
}

impl ReportParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Create a parser with custom options
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Load a glyph dump from disk and parse it
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseResult> {
        let document = GlyphDocument::open(path)?;
        self.parse_document(&document)
    }

    /// Parse the configured page range of a document.
    ///
    /// Fails with [`LabgridError::NoCategoriesFound`] when no page produced a
    /// category, and with [`LabgridError::MissingRequiredHeader`] when Dairy
    /// or Eggs never appeared as a validated header.
    pub fn parse_document(&self, document: &GlyphDocument) -> Result<ParseResult> {
        self.options.validate()?;

        let first = self.options.start_page;
        let last = self.options.end_page.min(document.page_count());
        let selected: Vec<(usize, &PageGlyphs)> = document
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| (i + 1, page))
            .filter(|(number, _)| (first..=last).contains(number))
            .collect();

        debug!(
            "Parsing pages {}..={} of {} ({})",
            first,
            last,
            document.page_count(),
            PARSER_VERSION
        );
        let outcomes = self.parse_pages(&selected);

        let seen = outcomes
            .iter()
            .map(|o| o.seen_required.clone())
            .reduce(|a, b| &a | &b)
            .unwrap_or_default();
        let pages: Vec<Page> = outcomes.into_iter().filter_map(|o| o.page).collect();

        if pages.is_empty() {
            return Err(LabgridError::NoCategoriesFound);
        }

        let missing: Vec<String> = REQUIRED_HEADERS
            .iter()
            .filter(|kind| !seen.contains(*kind))
            .map(|kind| kind.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !missing.is_empty() {
            return Err(LabgridError::MissingRequiredHeader(missing));
        }

        let result = ParseResult { pages };
        info!(
            "Parsed {} pages with {} items",
            result.pages.len(),
            result.item_count()
        );
        Ok(result)
    }

    #[cfg(not(feature = "parallel"))]
    fn parse_pages(&self, pages: &[(usize, &PageGlyphs)]) -> Vec<PageOutcome> {
        pages
            .iter()
            .map(|(number, page)| self.parse_page(*number, page))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn parse_pages(&self, pages: &[(usize, &PageGlyphs)]) -> Vec<PageOutcome> {
        use rayon::prelude::*;

        pages
            .par_iter()
            .map(|(number, page)| self.parse_page(*number, page))
            .collect()
    }

    /// Parse one page. Pure: depends only on the page's glyphs and the options.
    pub fn parse_page(&self, page_number: usize, page: &PageGlyphs) -> PageOutcome {
        let empty = PageOutcome {
            page: None,
            seen_required: BTreeSet::new(),
        };

        let lines = self.page_lines(page);
        let headers = detect_headers(&lines);
        if headers.is_empty() {
            debug!("Page {}: no headers", page_number);
            return empty;
        }

        let rows = group_header_rows(headers, self.options.row_y_tol);
        let valid = validate_headers(
            &lines,
            &rows,
            page.width,
            self.options.header_validate_y_range,
        );
        debug!(
            "Page {}: {} header rows, {} validated headers",
            page_number,
            rows.len(),
            valid.len()
        );
        if valid.is_empty() {
            return empty;
        }

        let seen_required = valid
            .iter()
            .map(|h| h.kind)
            .filter(|kind| REQUIRED_HEADERS.contains(kind))
            .collect();
        let section = Section::classify(valid.iter().map(|h| h.kind));

        let valid_rows = group_header_rows(valid, self.options.row_y_tol);
        let placed = build_category_boxes(
            &lines,
            &valid_rows,
            page.width,
            page.height,
            self.options.x_overlap_min,
        );

        let categories = placed
            .iter()
            .map(|p| self.parse_category(&lines, p))
            .collect();

        PageOutcome {
            page: Some(Page {
                page_number,
                section,
                categories,
            }),
            seen_required,
        }
    }

    /// Lines of a page: glyph lines -> spans -> span lines
    fn page_lines(&self, page: &PageGlyphs) -> Vec<Line> {
        let span_opts = self.options.span_options();
        let mut glyph_lines: Vec<_> = cluster_glyph_lines(&page.glyphs, self.options.y_line_tol)
            .iter()
            .map(|line| dedup_header_spans(build_spans(line, &span_opts), self.options.header_dedup_tol))
            .collect();

        if self.options.augment_headers && !page.words.is_empty() && !has_header_span(&glyph_lines) {
            let added = augment_headers_from_words(&mut glyph_lines, &page.words);
            if added > 0 {
                debug!("Spliced {} header words from word-level extraction", added);
            }
        }

        cluster_span_lines(glyph_lines.into_iter().flatten().collect(), self.options.y_line_tol)
    }

    fn parse_category(&self, lines: &[Line], placed: &PlacedHeader) -> Category {
        let kind = placed.header.kind;
        let region = &placed.region;

        let scores = find_scores_in_box(lines, region);
        if scores.is_empty() {
            return Category {
                name: kind,
                items: Vec::new(),
            };
        }

        let rows = cluster_score_rows(scores, self.options.row_cluster_tol);
        let centers: Vec<f64> = rows.iter().map(|r| r.center_y()).collect();
        let bands = build_row_bands(
            &centers,
            region,
            placed.header.y1,
            self.options.band_padding(),
        );

        let padding = self.options.window_padding();
        let mut placed_items = Vec::new();
        for ((row, band), row_y) in rows.iter().zip(&bands).zip(&centers) {
            for (i, token) in row.tokens.iter().enumerate() {
                let next_x = row.tokens.get(i + 1).map(|t| t.x);
                let name = resolve_label(lines, band, token.x, next_x, (region.x0, region.x1), padding);

                let score: u16 = match token.text.parse() {
                    Ok(score) => score,
                    Err(err) => {
                        warn!("Skipping score token {:?} in {}: {}", token.text, kind, err);
                        continue;
                    }
                };
                placed_items.push(PlacedItem {
                    item: Item::new(name, score),
                    x: token.x,
                    row_y: *row_y,
                });
            }
        }

        let positions: Vec<(f64, f64)> = placed_items.iter().map(|p| (p.x, p.row_y)).collect();
        let order = order_positions(&positions, self.options.order_mode, &self.options.column_options());

        let mut slots: Vec<Option<Item>> = placed_items.into_iter().map(|p| Some(p.item)).collect();
        let items = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Category { name: kind, items }
    }
}
