//! Fixed-size pagination and page-control window selection.
//!
//! The paginator never re-sorts and never panics on out-of-range pages: a
//! page past the end is simply empty, and callers clamp before display.

use serde::Serialize;

/// Items per archive page.
pub const PAGE_SIZE: usize = 12;

/// Total number of pages for `count` items (at least 1, for display).
#[must_use]
pub const fn total_pages(count: usize) -> usize {
    if count == 0 {
        1
    } else {
        count.div_ceil(PAGE_SIZE)
    }
}

/// Clamp a requested 1-based page index into the valid range for `count` items.
#[must_use]
pub const fn clamp_page(page: usize, count: usize) -> usize {
    let last = total_pages(count);
    if page < 1 {
        1
    } else if page > last {
        last
    } else {
        page
    }
}

/// Slice one page (1-based index) out of an already-filtered, already-sorted
/// collection. Out-of-range pages return an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One element of the page-control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    /// A directly selectable page number.
    Page(usize),
    /// A gap between shown page numbers.
    Ellipsis,
}

/// Select which page numbers the controls show: first page, last page,
/// current page ± 1, with an ellipsis marker for each gap.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    let mut window = Vec::new();
    let mut gap_open = false;
    for page in 1..=total {
        let shown =
            page == 1 || page == total || (page + 1 >= current && page <= current.saturating_add(1));
        if shown {
            window.push(PageItem::Page(page));
            gap_open = false;
        } else if !gap_open {
            window.push(PageItem::Ellipsis);
            gap_open = true;
        }
    }
    window
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn twenty_five_items_make_three_pages() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(total_pages(items.len()), 3);
        assert_eq!(paginate(&items, 1).len(), 12);
        assert_eq!(paginate(&items, 2).len(), 12);
        assert_eq!(paginate(&items, 3).len(), 1);
        assert_eq!(paginate(&items, 3), &[24]);
    }

    #[test]
    fn exact_multiple_fills_last_page() {
        let items: Vec<usize> = (0..24).collect();
        assert_eq!(total_pages(items.len()), 2);
        assert_eq!(paginate(&items, 2).len(), 12);
    }

    #[test]
    fn out_of_range_page_is_empty_not_a_panic() {
        let items: Vec<usize> = (0..5).collect();
        assert!(paginate(&items, 2).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate::<usize>(&[], 1).is_empty());
    }

    #[test]
    fn empty_collection_still_has_one_display_page() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[rstest]
    #[case(0, 25, 1)]
    #[case(1, 25, 1)]
    #[case(3, 25, 3)]
    #[case(9, 25, 3)]
    fn clamp_page_cases(#[case] requested: usize, #[case] count: usize, #[case] expected: usize) {
        assert_eq!(clamp_page(requested, count), expected);
    }

    #[test]
    fn window_shows_all_pages_when_few() {
        use PageItem::Page;
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_window(2, 4),
            vec![Page(1), Page(2), Page(3), Page(4)],
        );
    }

    #[test]
    fn window_collapses_gaps_to_single_ellipsis() {
        use PageItem::{Ellipsis, Page};
        assert_eq!(
            page_window(5, 9),
            vec![
                Page(1),
                Ellipsis,
                Page(4),
                Page(5),
                Page(6),
                Ellipsis,
                Page(9),
            ],
        );
        assert_eq!(
            page_window(1, 9),
            vec![Page(1), Page(2), Ellipsis, Page(9)],
        );
        assert_eq!(
            page_window(9, 9),
            vec![Page(1), Ellipsis, Page(8), Page(9)],
        );
    }
}
