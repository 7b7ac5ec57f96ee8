//! Pagination over a derived row list.

use serde::Serialize;

use crate::model::leading_int;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of rows plus navigation bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub total_rows: usize,
    pub total_pages: usize,
}

/// Pagination metadata, detached from the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub index: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

impl PageInfo {
    /// 1-based page number for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Number of pages for `total` rows; zero rows is still one (empty) page.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// The rows of page `index`. An index past the end yields an empty page.
pub fn page<T>(records: &[T], page_size: usize, index: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = records.len();
    let start = index.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    Page {
        rows: &records[start..end],
        can_go_next: index.saturating_add(1).saturating_mul(page_size) < total,
        can_go_previous: index > 0,
        total_rows: total,
        total_pages: total_pages(total, page_size),
    }
}

/// Clamp a zero-based index into `[0, total_pages - 1]`.
pub fn clamp_index(index: usize, total: usize, page_size: usize) -> usize {
    index.min(total_pages(total, page_size) - 1)
}

/// Zero-based index for a 1-based "go to page" input.
///
/// Only the leading integer counts ("3abc" is page 3, "2.5" is page 2). No
/// number, or zero, is page 1; the result is clamped to the existing pages.
pub fn jump_index(raw: &str, total: usize, page_size: usize) -> usize {
    let requested = leading_int(raw).filter(|&n| n != 0).unwrap_or(1);
    let last = total_pages(total, page_size) as i64;
    (requested.clamp(1, last) - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn first_page() {
        let rows = numbers(25);
        let p = page(&rows, 10, 0);
        assert_eq!(p.rows, &rows[0..10]);
        assert!(p.can_go_next);
        assert!(!p.can_go_previous);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn last_page_is_short() {
        let rows = numbers(25);
        let p = page(&rows, 10, 2);
        assert_eq!(p.rows, &[20, 21, 22, 23, 24]);
        assert!(!p.can_go_next);
        assert!(p.can_go_previous);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let rows = numbers(20);
        let p = page(&rows, 10, 1);
        assert_eq!(p.rows.len(), 10);
        assert!(!p.can_go_next);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn out_of_range_index_is_empty() {
        let rows = numbers(5);
        let p = page(&rows, 10, 3);
        assert!(p.rows.is_empty());
        assert!(!p.can_go_next);
        assert!(p.can_go_previous);
    }

    #[test]
    fn no_rows_is_one_empty_page() {
        let rows: Vec<usize> = Vec::new();
        let p = page(&rows, 10, 0);
        assert!(p.rows.is_empty());
        assert_eq!(p.total_pages, 1);
        assert!(!p.can_go_next);
        assert!(!p.can_go_previous);
    }

    #[test]
    fn jump_clamps_into_range() {
        assert_eq!(jump_index("2", 25, 10), 1);
        assert_eq!(jump_index("99", 25, 10), 2);
        assert_eq!(jump_index("0", 25, 10), 0);
        assert_eq!(jump_index("-4", 25, 10), 0);
        assert_eq!(jump_index("abc", 25, 10), 0);
        assert_eq!(jump_index("", 25, 10), 0);
        assert_eq!(jump_index("3", 0, 10), 0);
    }

    #[test]
    fn jump_reads_leading_integer() {
        assert_eq!(jump_index("3abc", 25, 10), 2);
        assert_eq!(jump_index("2.5", 25, 10), 1);
        assert_eq!(jump_index(" 2 pages", 25, 10), 1);
        assert_eq!(jump_index("-1x", 25, 10), 0);
    }

    #[test]
    fn clamp_index_keeps_last_page_with_rows() {
        assert_eq!(clamp_index(7, 25, 10), 2);
        assert_eq!(clamp_index(1, 25, 10), 1);
        assert_eq!(clamp_index(4, 0, 10), 0);
    }
}
