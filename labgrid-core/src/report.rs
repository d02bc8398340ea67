//! Structured parse output
//!
//! Field order of these structs is the JSON field order.

use crate::error::Result;
use crate::layout::canon::CategoryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reaction tier derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    Moderate,
    High,
}

impl Severity {
    /// `>= 90` high, `>= 81` moderate, `>= 66` medium, otherwise low
    pub fn from_score(score: u16) -> Self {
        match score {
            90.. => Severity::High,
            81..=89 => Severity::Moderate,
            66..=80 => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the report a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Foods,
    Toxins,
}

impl Section {
    /// Toxins if any of the page's categories is a toxin category
    pub fn classify<I: IntoIterator<Item = CategoryKind>>(kinds: I) -> Self {
        if kinds.into_iter().any(|k| k.is_toxin()) {
            Section::Toxins
        } else {
            Section::Foods
        }
    }
}

/// One scored entry of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub score: u16,
    pub severity: Severity,
}

impl Item {
    pub fn new(name: impl Into<String>, score: u16) -> Self {
        Self {
            name: name.into(),
            score,
            severity: Severity::from_score(score),
        }
    }
}

/// A category and its items in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: CategoryKind,
    pub items: Vec<Item>,
}

/// Parsed content of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number in the source document
    #[serde(rename = "page")]
    pub page_number: usize,
    pub section: Section,
    pub categories: Vec<Category>,
}

impl Page {
    pub fn category(&self, kind: CategoryKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == kind)
    }
}

/// Result of parsing a whole document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub pages: Vec<Page>,
}

impl ParseResult {
    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse stored output back
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of items across all pages
    pub fn item_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.categories.iter())
            .map(|c| c.items.len())
            .sum()
    }
}
