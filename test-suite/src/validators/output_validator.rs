//! Parse Output Validator
//!
//! Verifies structural invariants of a [`ParseResult`]: page numbering,
//! severity tiers, label hygiene and section classification.

use labgrid::{ParseResult, Section, Severity};

/// Outcome of validating one parse result
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub pages_checked: usize,
    pub items_checked: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Invariant checker for parser output
pub struct OutputValidator {
    strict: bool,
}

impl Default for OutputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputValidator {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Treat warnings (empty categories, score-shaped labels) as errors
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn validate(&self, result: &ParseResult) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut last_page = 0;

        for page in &result.pages {
            report.pages_checked += 1;
            let at = format!("page {}", page.page_number);

            if page.page_number <= last_page {
                report
                    .errors
                    .push(format!("{at}: page numbers not strictly increasing"));
            }
            last_page = page.page_number;

            if page.categories.is_empty() {
                report.errors.push(format!("{at}: page without categories"));
            }

            let expected_section = Section::classify(page.categories.iter().map(|c| c.name));
            if page.section != expected_section {
                report.errors.push(format!(
                    "{at}: section {:?}, categories imply {:?}",
                    page.section, expected_section
                ));
            }

            for category in &page.categories {
                if category.items.is_empty() {
                    self.warn(&mut report, format!("{at}: {} has no items", category.name));
                }

                for item in &category.items {
                    report.items_checked += 1;
                    let loc = format!("{at}/{}/{:?}", category.name, item.name);

                    if item.score > 999 {
                        report.errors.push(format!("{loc}: score {} out of range", item.score));
                    }
                    if item.severity != Severity::from_score(item.score) {
                        report.errors.push(format!(
                            "{loc}: severity {} does not match score {}",
                            item.severity, item.score
                        ));
                    }
                    if item.name != item.name.trim() {
                        report.errors.push(format!("{loc}: label not trimmed"));
                    }
                    if !item.name.is_empty() && item.name.chars().all(|c| c.is_ascii_digit()) {
                        self.warn(&mut report, format!("{loc}: label looks like a score"));
                    }
                }
            }
        }
        report
    }

    fn warn(&self, report: &mut ValidationReport, message: String) {
        if self.strict {
            report.errors.push(message);
        } else {
            report.warnings.push(message);
        }
    }
}
