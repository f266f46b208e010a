//! Pagination of group rows onto slides.

use std::ops::Range;

/// Split `[0, total)` into consecutive ranges of `per_page` indices.
///
/// The last range may be shorter; no range is ever empty, so a count that is
/// an exact multiple of `per_page` does not produce a trailing empty page.
/// `per_page` must be non-zero (enforced by configuration validation).
///
/// ```
/// use images2pptx::layout::paging::paginate;
/// assert_eq!(paginate(7, 3), vec![0..3, 3..6, 6..7]);
/// assert_eq!(paginate(6, 3), vec![0..3, 3..6]);
/// assert!(paginate(0, 3).is_empty());
/// ```
pub fn paginate(total: usize, per_page: usize) -> Vec<Range<usize>> {
    debug_assert!(per_page > 0, "per_page must be positive");
    if per_page == 0 {
        return Vec::new();
    }
    (0..total)
        .step_by(per_page)
        .map(|start| start..(start + per_page).min(total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_partial_last_page() {
        let sizes: Vec<usize> = paginate(7, 3).iter().map(|r| r.len()).collect();
        assert_eq!(sizes, [3, 3, 1]);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_page() {
        let pages = paginate(9, 3);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_single_row_pages() {
        assert_eq!(paginate(2, 1), vec![0..1, 1..2]);
    }

    #[test]
    fn test_page_larger_than_total() {
        assert_eq!(paginate(2, 5), vec![0..2]);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_range_in_order(total in 0usize..500, per_page in 1usize..40) {
            let pages = paginate(total, per_page);
            prop_assert_eq!(pages.len(), total.div_ceil(per_page));

            let flattened: Vec<usize> = pages.iter().cloned().flatten().collect();
            prop_assert_eq!(flattened, (0..total).collect::<Vec<_>>());

            if let Some((last, full)) = pages.split_last() {
                prop_assert!(full.iter().all(|r| r.len() == per_page));
                prop_assert!(!last.is_empty() && last.len() <= per_page);
            }
        }
    }
}
