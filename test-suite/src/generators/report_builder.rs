//! Synthetic Report Builder
//!
//! Lays out report pages glyph by glyph, the way a PDF text extractor would
//! report them, and keeps track of the output a correct parse produces.
//!
//! Layout rules the builder follows:
//! - header rows start at the top margin; headers of one row share a baseline
//!   and split the page width evenly
//! - items stack below their header, 40 units apart; the score is centered
//!   in a fixed slot left of the label so every score of a column shares
//!   one x center
//! - optional totals lines close every category of a row on one shared line
//!
//! Every category needs at least one item: a header without scores below it
//! is dropped by header validation.

use labgrid::{
    Category, CategoryKind, Glyph, GlyphDocument, Item, Page, PageGlyphs, ParseResult, Section,
};
use std::fs;
use std::io;
use std::path::Path;

/// Default page width (US Letter)
pub const PAGE_WIDTH: f64 = 612.0;
/// Default page height (US Letter)
pub const PAGE_HEIGHT: f64 = 792.0;

/// Horizontal advance of every generated glyph
pub const ADVANCE: f64 = 5.0;
const TOP_MARGIN: f64 = 60.0;
const HEADER_GAP: f64 = 30.0;
const ITEM_PITCH: f64 = 40.0;
const ROW_GAP: f64 = 40.0;
const SCORE_CENTER: f64 = 15.0;
const LABEL_OFFSET: f64 = 30.0;
const HEADER_OFFSET: f64 = 30.0;

/// The text a report prints for a category header
pub fn printed_name(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::NutsSeeds => "Nuts Seeds",
        CategoryKind::HeavyMetals => "Heavy Metals",
        other => other.as_str(),
    }
}

/// One category: its header and items
#[derive(Debug, Clone)]
pub struct CategorySpec {
    pub kind: CategoryKind,
    pub items: Vec<(String, u16)>,
    /// Items laid out column-major over this many columns (1 = a plain list)
    pub columns: usize,
}

impl CategorySpec {
    pub fn new(kind: CategoryKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            columns: 1,
        }
    }

    /// Add an item
    pub fn item(mut self, name: &str, score: u16) -> Self {
        self.items.push((name.to_string(), score));
        self
    }

    /// Spread the items over `columns` full-width columns, filled top to bottom.
    ///
    /// Only meaningful for a category alone in its header row. Column
    /// detection expects every used column to hold the same number of items.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    fn grid_rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }

    /// Reading order the parser resolves for this category
    fn expected_items(&self) -> Vec<Item> {
        let items = self.items.iter().map(|(name, score)| Item::new(name.as_str(), *score));
        if self.columns <= 1 {
            return items.collect();
        }

        let rows = self.grid_rows();
        let used_columns = self.items.len().div_ceil(rows);
        let mut placed: Vec<(usize, usize, Item)> = items
            .enumerate()
            .map(|(k, item)| (k / rows, k % rows, item))
            .collect();
        if used_columns < 3 {
            // too few columns for column detection: row-major
            placed.sort_by_key(|(col, row, _)| (*row, *col));
        }
        placed.into_iter().map(|(_, _, item)| item).collect()
    }
}

/// One page of the report
#[derive(Debug, Clone)]
pub struct PageSpec {
    width: f64,
    height: f64,
    rows: Vec<Vec<CategorySpec>>,
    totals: bool,
    footer: Option<String>,
    texts: Vec<(String, f64, f64, f64)>,
}

impl PageSpec {
    fn new() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            rows: Vec::new(),
            totals: false,
            footer: None,
            texts: Vec::new(),
        }
    }

    /// Add a header row
    pub fn row(&mut self, categories: Vec<CategorySpec>) -> &mut Self {
        self.rows.push(categories);
        self
    }

    /// Close each category with a "There are Total of N" line
    pub fn totals(&mut self, enabled: bool) -> &mut Self {
        self.totals = enabled;
        self
    }

    /// Footer text near the page bottom
    pub fn footer(&mut self, text: &str) -> &mut Self {
        self.footer = Some(text.to_string());
        self
    }

    /// Free text anywhere on the page
    pub fn text(&mut self, text: &str, x: f64, top: f64, size: f64) -> &mut Self {
        self.texts.push((text.to_string(), x, top, size));
        self
    }

    /// Glyphs of the page
    pub fn render(&self) -> PageGlyphs {
        let mut page = PageGlyphs::new(self.width, self.height);
        let mut y = TOP_MARGIN;

        for row in &self.rows {
            let column_width = self.width / row.len() as f64;
            let mut depth = 0;

            for (c, category) in row.iter().enumerate() {
                let col_x = c as f64 * column_width;
                push_text(
                    &mut page,
                    printed_name(category.kind),
                    col_x + HEADER_OFFSET,
                    y,
                    12.0,
                    "ABCDEF+Helvetica-Bold",
                );

                if category.columns <= 1 {
                    for (i, (name, score)) in category.items.iter().enumerate() {
                        let top = y + HEADER_GAP + ITEM_PITCH * i as f64;
                        push_item(&mut page, name, *score, col_x + SCORE_CENTER, top);
                    }
                    depth = depth.max(category.items.len());
                } else {
                    let rows = category.grid_rows();
                    let pitch = self.width / category.columns as f64;
                    for (k, (name, score)) in category.items.iter().enumerate() {
                        let center = SCORE_CENTER + pitch * (k / rows) as f64;
                        let top = y + HEADER_GAP + ITEM_PITCH * (k % rows) as f64;
                        push_item(&mut page, name, *score, center, top);
                    }
                    depth = depth.max(rows);
                }
            }

            let bottom = y + HEADER_GAP + ITEM_PITCH * depth as f64;
            if self.totals {
                for (c, category) in row.iter().enumerate() {
                    let text = format!("There are Total of {}", category.items.len());
                    let x = c as f64 * column_width + 10.0;
                    push_text(&mut page, &text, x, bottom, 10.0, "Helvetica");
                }
            }
            y = bottom + ROW_GAP;
        }

        if let Some(footer) = &self.footer {
            push_text(&mut page, footer, 250.0, self.height - 40.0, 8.0, "Helvetica");
        }
        for (text, x, top, size) in &self.texts {
            push_text(&mut page, text, *x, *top, *size, "Helvetica");
        }
        page
    }

    /// Parsed form of the page, `None` when it has no categories
    pub fn expected(&self, page_number: usize) -> Option<Page> {
        let categories: Vec<Category> = self
            .rows
            .iter()
            .flatten()
            .filter(|c| !c.items.is_empty())
            .map(|c| Category {
                name: c.kind,
                items: c.expected_items(),
            })
            .collect();
        if categories.is_empty() {
            return None;
        }
        Some(Page {
            page_number,
            section: Section::classify(categories.iter().map(|c| c.name)),
            categories,
        })
    }
}

/// Builder for whole synthetic reports
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    pages: Vec<PageSpec>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report page with Dairy and Eggs side by side
    pub fn minimal() -> Self {
        let mut builder = Self::new();
        builder
            .page()
            .row(vec![
                CategorySpec::new(CategoryKind::Dairy)
                    .item("Milk", 72)
                    .item("Cheese", 45),
                CategorySpec::new(CategoryKind::Eggs).item("Egg White", 91),
            ])
            .footer("Page 1 of 1");
        builder
    }

    /// Start a new page
    pub fn page(&mut self) -> &mut PageSpec {
        self.pages.push(PageSpec::new());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Add a page with only a title on it
    pub fn cover_page(&mut self, title: &str) -> &mut Self {
        self.page().text(title, 60.0, 80.0, 18.0);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Glyph dump of all pages
    pub fn build(&self) -> GlyphDocument {
        GlyphDocument::new(self.pages.iter().map(PageSpec::render).collect())
    }

    /// Parse result the builder's layout should produce
    pub fn expected(&self) -> ParseResult {
        ParseResult {
            pages: self
                .pages
                .iter()
                .enumerate()
                .filter_map(|(i, page)| page.expected(i + 1))
                .collect(),
        }
    }

    /// Glyph dump as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.build())
    }

    /// Write the glyph dump to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_json()?)
    }
}

/// Named sample reports covering the layouts the builder supports
pub fn sample_reports() -> Vec<(&'static str, ReportBuilder)> {
    let mut full = ReportBuilder::new();
    full.cover_page("Food Sensitivity Report");
    full.page()
        .row(vec![
            CategorySpec::new(CategoryKind::Dairy)
                .item("Cow Milk", 72)
                .item("Goat Cheese", 45)
                .item("Butter", 12),
            CategorySpec::new(CategoryKind::Eggs)
                .item("Egg White", 91)
                .item("Egg Yolk", 64),
            CategorySpec::new(CategoryKind::Fruits).item("Apple", 30),
        ])
        .row(vec![
            CategorySpec::new(CategoryKind::Grains).item("Rice", 8),
            CategorySpec::new(CategoryKind::NutsSeeds)
                .item("Almond", 55)
                .item("Sesame", 100),
        ])
        .totals(true)
        .footer("Page 2 of 3");
    full.page()
        .row(vec![
            CategorySpec::new(CategoryKind::HeavyMetals)
                .item("Mercury", 95)
                .item("Lead", 40),
            CategorySpec::new(CategoryKind::Lectins).item("Tomato", 66),
        ])
        .footer("Page 3 of 3");

    let grid = (0..12).fold(CategorySpec::new(CategoryKind::Vegetables).columns(4), |c, i| {
        c.item(&format!("Veg{i}"), 20 + i * 7)
    });
    let mut grids = ReportBuilder::new();
    grids
        .page()
        .row(vec![CategorySpec::new(CategoryKind::Dairy).item("Milk", 50)])
        .row(vec![grid])
        .row(vec![CategorySpec::new(CategoryKind::Eggs).item("Egg", 70)]);

    vec![
        ("minimal", ReportBuilder::minimal()),
        ("full_report", full),
        ("vegetable_grid", grids),
    ]
}

fn push_text(page: &mut PageGlyphs, text: &str, x: f64, top: f64, size: f64, font: &str) {
    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        let x0 = x + ADVANCE * i as f64;
        page.glyphs.push(Glyph::new(
            ch.to_string(),
            x0,
            x0 + ADVANCE,
            top,
            top + size,
            size,
            font,
        ));
    }
}

/// Score centered on `center`, label starting `LABEL_OFFSET - SCORE_CENTER` to the right
fn push_item(page: &mut PageGlyphs, name: &str, score: u16, center: f64, top: f64) {
    let score = score.to_string();
    let score_x = center - ADVANCE * score.len() as f64 / 2.0;
    push_text(page, &score, score_x, top, 10.0, "Helvetica");
    push_text(page, name, center - SCORE_CENTER + LABEL_OFFSET, top, 10.0, "Helvetica");
}
