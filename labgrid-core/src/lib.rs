//! # labgrid
//!
//! Layout-driven parser for food sensitivity lab reports.
//!
//! Reports list scored items (`72 Milk`) under category headers
//! (`Dairy`, `Eggs`, `Nuts Seeds`, ...) that sit side by side in rows and
//! share the page with totals lines, footers and decorative text. This crate
//! reconstructs the report from positioned glyphs alone: no text flow, no
//! tagged structure, just coordinates.
//!
//! ## Features
//!
//! - **Span building**: glyphs merged into words and phrases by gap, font and size
//! - **Line clustering**: running-mean vertical clustering tolerant of drift
//! - **Header detection**: category names with synonyms, validated by nearby scores
//! - **Category regions**: column slices closed by totals lines, the next header row or the footer
//! - **Label resolution**: per-score label windows with hyphenation-aware joining
//! - **Reading order**: automatic row-major or 4-column ordering via 1-D k-means
//! - **Validation**: documents without categories or without Dairy and Eggs are rejected
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labgrid::{GlyphDocument, ReportParser, Result};
//!
//! # fn main() -> Result<()> {
//! // A glyph dump written by a PDF text extractor
//! let document = GlyphDocument::open("report.glyphs.json")?;
//!
//! let result = ReportParser::new().parse_document(&document)?;
//! for page in &result.pages {
//!     for category in &page.categories {
//!         println!("{} ({} items)", category.name, category.items.len());
//!     }
//! }
//! println!("{}", result.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom options
//!
//! ```rust
//! use labgrid::{OrderMode, ParseOptions, ReportParser};
//!
//! let parser = ReportParser::with_options(ParseOptions {
//!     order_mode: OrderMode::Row,
//!     start_page: 2,
//!     end_page: 4,
//!     ..Default::default()
//! });
//! assert_eq!(parser.options().order_mode, OrderMode::Row);
//! ```

pub mod cluster;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod parser;
pub mod report;
pub mod text;

// Re-export commonly used types
pub use error::{LabgridError, Result};
pub use geometry::{BBox, Point};
pub use input::{Glyph, GlyphDocument, PageGlyphs};
pub use layout::{CategoryKind, OrderMode};
pub use parser::{PageOutcome, ParseOptions, ReportParser, PARSER_VERSION, REQUIRED_HEADERS};
pub use report::{Category, Item, Page, ParseResult, Section, Severity};

/// Current version of labgrid
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
