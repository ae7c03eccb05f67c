//! Pagination metadata for list endpoints.
//!
//! List responses carry a [`Pagination`] block next to their payload so clients
//! can render page controls without guessing. The Books API does not page its
//! results yet, so every list is reported as one page holding every record.

use serde::{Deserialize, Serialize};

/// Page-number metadata attached to a list response envelope.
///
/// Page numbers are one-based. `next_page` and `prev_page` are `None` when no
/// such page exists and serialise as `null`.
///
/// # Examples
/// ```
/// use pagination::Pagination;
///
/// let page = Pagination::single_page(3);
/// assert_eq!(page.total_records, 3);
/// assert_eq!(page.page_size, 3);
/// assert!(page.next_page.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of records matching the request across all pages.
    pub total_records: usize,
    /// One-based index of the page being returned.
    pub current_page: usize,
    /// Number of pages available.
    pub total_pages: usize,
    /// Index of the following page, if any.
    pub next_page: Option<usize>,
    /// Index of the preceding page, if any.
    pub prev_page: Option<usize>,
    /// Maximum number of records per page.
    pub page_size: usize,
}

impl Pagination {
    /// Describe a result set returned in full as a single page.
    ///
    /// An empty result set is still reported as page one of one.
    #[must_use]
    pub const fn single_page(total_records: usize) -> Self {
        Self {
            total_records,
            current_page: 1,
            total_pages: 1,
            next_page: None,
            prev_page: None,
            page_size: total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the pagination block.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(250)]
    fn single_page_spans_every_record(#[case] total: usize) {
        let page = Pagination::single_page(total);

        assert_eq!(page.total_records, total);
        assert_eq!(page.page_size, total);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, None);
    }

    #[rstest]
    fn serialises_with_snake_case_keys_and_null_neighbours() {
        let value = serde_json::to_value(Pagination::single_page(2)).expect("serialise");

        assert_eq!(
            value,
            json!({
                "total_records": 2,
                "current_page": 1,
                "total_pages": 1,
                "next_page": null,
                "prev_page": null,
                "page_size": 2,
            })
        );
    }
}
