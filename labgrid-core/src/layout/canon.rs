//! Category vocabulary and token shapes
//!
//! The twelve category names and their synonyms are part of the output
//! contract; renaming one is a compatibility break.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref SCORE_RE: Regex = Regex::new(r"^[0-9]{1,3}$").unwrap();
    static ref TOTAL_RE: Regex = Regex::new(r"(?i)^\s*There\s+are\s+Total\s+of").unwrap();
}

/// One of the report's fixed categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    Dairy,
    Eggs,
    Fruits,
    Grains,
    Legumes,
    Meats,
    NutsSeeds,
    Seafood,
    Vegetables,
    Wheat,
    HeavyMetals,
    Lectins,
}

impl CategoryKind {
    /// All categories in report order
    pub const ALL: [CategoryKind; 12] = [
        CategoryKind::Dairy,
        CategoryKind::Eggs,
        CategoryKind::Fruits,
        CategoryKind::Grains,
        CategoryKind::Legumes,
        CategoryKind::Meats,
        CategoryKind::NutsSeeds,
        CategoryKind::Seafood,
        CategoryKind::Vegetables,
        CategoryKind::Wheat,
        CategoryKind::HeavyMetals,
        CategoryKind::Lectins,
    ];

    /// Canonical name as emitted in the output
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Dairy => "Dairy",
            CategoryKind::Eggs => "Eggs",
            CategoryKind::Fruits => "Fruits",
            CategoryKind::Grains => "Grains",
            CategoryKind::Legumes => "Legumes",
            CategoryKind::Meats => "Meats",
            CategoryKind::NutsSeeds => "NutsSeeds",
            CategoryKind::Seafood => "Seafood",
            CategoryKind::Vegetables => "Vegetables",
            CategoryKind::Wheat => "Wheat",
            CategoryKind::HeavyMetals => "HeavyMetals",
            CategoryKind::Lectins => "Lectins",
        }
    }

    /// Exact match against a canonical name (case-sensitive)
    pub fn from_canonical(name: &str) -> Option<Self> {
        CategoryKind::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Categories that mark a page as part of the toxins section
    pub fn is_toxin(&self) -> bool {
        matches!(self, CategoryKind::HeavyMetals | CategoryKind::Lectins)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synonym table, keyed by whitespace-normalized lowercase text
fn synonym(key: &str) -> Option<&'static str> {
    let canon = match key {
        "dairy" => "Dairy",
        "eggs" => "Eggs",
        "fruits" => "Fruits",
        "grains" => "Grains",
        "legumes" => "Legumes",
        "meats" => "Meats",
        "nuts seeds" | "nuts&seeds" | "nutsseeds" => "NutsSeeds",
        "seafood" => "Seafood",
        "vegetables" => "Vegetables",
        "wheat" => "Wheat",
        "heavy metals" | "heavymetals" => "HeavyMetals",
        "lectins" => "Lectins",
        _ => return None,
    };
    Some(canon)
}

/// Canonicalize header text; unmapped text passes through unchanged
pub fn canonicalize(text: &str) -> String {
    let key = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    match synonym(&key) {
        Some(canon) => canon.to_string(),
        None => text.to_string(),
    }
}

/// The category a piece of text names, if any
pub fn category_of(text: &str) -> Option<CategoryKind> {
    CategoryKind::from_canonical(&canonicalize(text))
}

/// True for integer-looking tokens of one to three digits
pub fn is_score_text(text: &str) -> bool {
    SCORE_RE.is_match(text)
}

/// True when a line's joined text opens with the "There are Total of" marker
pub fn is_total_text(text: &str) -> bool {
    TOTAL_RE.is_match(text)
}
