//! Pagination Calculator
//!
//! Pure page arithmetic: normalizes caller paging inputs, derives the
//! offset/limit window applied by the store, and computes the page metadata
//! returned with every connection.
//!
//! Inputs below their floor are clamped up, never rejected: `page` and
//! `perPage` to 1, `skip` to 0. `totalPages` is floored at 1 so page info
//! never reports zero pages, even for an empty result set.

use crate::models::PageInfo;

/// The offset/limit window the store applies after filtering and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

/// Compute the store window for a page request.
///
/// `offset = (page - 1) * perPage + skip`, `limit = perPage`, after
/// clamping.
pub fn window(page: i64, per_page: i64, skip: i64) -> PageWindow {
    let (page, per_page, skip) = normalize(page, per_page, skip);
    // Extreme but clamp-valid inputs must not overflow; a saturated offset
    // past the end of the result set yields an empty page.
    PageWindow {
        offset: (page - 1).saturating_mul(per_page).saturating_add(skip),
        limit: per_page,
    }
}

/// Derive the total count and page metadata for a resolved page.
///
/// `total_matching` is the number of nodes matching the filtered query
/// before the window is applied; `skip` is subtracted from it, defining
/// "count remaining after skipping the first `skip` matches".
pub fn page_info(page: i64, per_page: i64, skip: i64, total_matching: usize) -> (usize, PageInfo) {
    let (page, per_page, skip) = normalize(page, per_page, skip);

    let total_count = total_matching.saturating_sub(skip);
    let total_pages = total_count.div_ceil(per_page).max(1);

    let info = PageInfo {
        current_page: page,
        total_pages,
        is_first: page <= 1,
        is_last: page >= total_pages,
    };
    (total_count, info)
}

fn normalize(page: i64, per_page: i64, skip: i64) -> (usize, usize, usize) {
    (
        page.max(1) as usize,
        per_page.max(1) as usize,
        skip.max(0) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_below_the_floor_are_clamped_up() {
        assert_eq!(window(0, -5, -3), PageWindow { offset: 0, limit: 1 });
        let (_, info) = page_info(-2, 0, -1, 10);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 10);
    }

    #[test]
    fn extreme_paging_inputs_saturate_instead_of_overflowing() {
        let window = window(i64::MAX, 25, 0);
        assert_eq!(window.limit, 25);
        assert_eq!(window.offset, usize::MAX);

        let window = super::window(i64::MAX, i64::MAX, i64::MAX);
        assert_eq!(window.offset, usize::MAX);
    }

    #[test]
    fn window_combines_page_and_skip() {
        assert_eq!(window(1, 25, 0), PageWindow { offset: 0, limit: 25 });
        assert_eq!(window(2, 25, 0), PageWindow { offset: 25, limit: 25 });
        assert_eq!(window(3, 10, 4), PageWindow { offset: 24, limit: 10 });
    }

    #[test]
    fn skip_is_subtracted_from_the_matching_total() {
        let (total_count, info) = page_info(1, 25, 30, 30);
        assert_eq!(total_count, 0);
        assert_eq!(info.total_pages, 1);
        assert!(info.is_first);
        assert!(info.is_last);
    }

    #[test]
    fn total_pages_is_never_zero() {
        let (_, info) = page_info(1, 25, 0, 0);
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn first_and_last_flags_follow_the_page_position() {
        let (_, first) = page_info(1, 25, 0, 30);
        assert!(first.is_first);
        assert!(!first.is_last);
        assert_eq!(first.total_pages, 2);

        let (_, last) = page_info(2, 25, 0, 30);
        assert!(!last.is_first);
        assert!(last.is_last);

        let (_, beyond) = page_info(5, 25, 0, 30);
        assert!(beyond.is_last);
        assert_eq!(beyond.current_page, 5);
    }
}
