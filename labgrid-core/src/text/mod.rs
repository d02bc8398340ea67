//! Glyph-to-text reconstruction: spans and lines

pub mod line;
pub mod span;

pub use line::{cluster_glyph_lines, cluster_span_lines, Line};
pub use span::{build_spans, dedup_header_spans, Span, SpanOptions};
