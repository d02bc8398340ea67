//! Property tests for token classification and geometry helpers

use labgrid::geometry::overlap_1d;
use labgrid::layout::canon::{is_score_text, is_total_text};
use labgrid::layout::{canonicalize, category_of};
use labgrid::CategoryKind;
use proptest::prelude::*;

fn category_strategy() -> impl Strategy<Value = CategoryKind> {
    prop::sample::select(CategoryKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_scores_are_one_to_three_digits(n in 0u32..100_000) {
        prop_assert_eq!(is_score_text(&n.to_string()), n < 1000);
    }

    #[test]
    fn test_score_rejects_non_digits(s in "[0-9]{0,2}[a-zA-Z.,-][0-9]{0,2}") {
        prop_assert!(!is_score_text(&s));
    }

    #[test]
    fn test_canonical_names_round_trip(kind in category_strategy()) {
        prop_assert_eq!(category_of(kind.as_str()), Some(kind));
        prop_assert_eq!(canonicalize(kind.as_str()), kind.as_str());
    }

    #[test]
    fn test_header_case_and_spacing_ignored(kind in category_strategy(), pad in " {0,3}") {
        let shouted = format!("{pad}{}{pad}", kind.as_str().to_uppercase());
        prop_assert_eq!(category_of(&shouted), Some(kind));
    }

    #[test]
    fn test_canonicalize_is_idempotent(text in "[A-Za-z ]{0,16}") {
        let once = canonicalize(&text);
        prop_assert_eq!(canonicalize(&once), once.clone());
    }

    #[test]
    fn test_total_marker_needs_prefix(prefix in "[a-z]{1,6}", n in 0u32..100) {
        let line = format!("There are Total of {n}");
        prop_assert!(is_total_text(&line));
        let prefixed = format!("{prefix} {line}");
        prop_assert!(!is_total_text(&prefixed));
    }

    #[test]
    fn test_overlap_is_symmetric_and_bounded(
        a0 in -500.0f64..500.0, aw in 0.0f64..300.0,
        b0 in -500.0f64..500.0, bw in 0.0f64..300.0,
    ) {
        let ab = overlap_1d(a0, a0 + aw, b0, b0 + bw);
        prop_assert_eq!(ab, overlap_1d(b0, b0 + bw, a0, a0 + aw));
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= aw.min(bw) + 1e-9);
    }
}
