//! # Derived Views: Filter → Sort → Page
//!
//! The Contacts list shows a **derived view** of the store: the records that
//! match the filter, in the chosen order, cut to one page.
//!
//! ```text
//! store.list_contacts() ──► filter::evaluate ──► sort::evaluate ──► pager::page
//!                              FilterSpec           SortSpec          PageInfo
//! ```
//!
//! ## Explicit, Immutable State
//!
//! Filter, sort and page state live together in a [`ViewState`] value that the
//! client owns and passes in on every read. Every transition returns a new
//! `ViewState`; nothing is shared or mutated behind the caller's back.
//!
//! Transitions that change which rows match (field, search term, date mode,
//! bounds) send the page index back to 0, and [`derive_view`] clamps whatever
//! index it is given to the last page, so the index a view reports is always
//! a page that exists.
//!
//! ## Recompute on Every Read
//!
//! There is no cache. [`derive_view`] runs the whole pipeline each time, so a
//! view is always consistent with the store it was derived from.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Contact, ContactField};

pub mod collate;
pub mod filter;
pub mod pager;
pub mod sort;

use filter::{DateMode, FieldSelector, FilterSpec};
use pager::PageInfo;
use sort::SortSpec;

/// Everything needed to derive the visible rows, besides the records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub page_index: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(&self, field: FieldSelector) -> Self {
        self.with_filter(self.filter.with_field(field))
    }

    pub fn with_search(&self, term: impl Into<String>) -> Self {
        self.with_filter(self.filter.with_search(term))
    }

    pub fn with_date_mode(&self, mode: DateMode) -> Self {
        self.with_filter(self.filter.with_date_mode(mode))
    }

    pub fn with_start_bound(&self, raw: &str) -> Result<Self> {
        Ok(self.with_filter(self.filter.with_start_bound(raw)?))
    }

    pub fn with_end_bound(&self, raw: &str) -> Result<Self> {
        Ok(self.with_filter(self.filter.with_end_bound(raw)?))
    }

    pub fn with_sort(&self, sort: SortSpec) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Click on a column header: asc → desc → unsorted.
    pub fn toggle_sort(&self, field: ContactField) -> Self {
        self.with_sort(self.sort.toggle(field))
    }

    pub fn with_page_index(&self, page_index: usize) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }

    /// Move forward one page if `page` has a next page.
    pub fn next_page(&self, page: &PageInfo) -> Self {
        if page.can_go_next {
            self.with_page_index(page.index + 1)
        } else {
            self.with_page_index(page.index)
        }
    }

    pub fn previous_page(&self, page: &PageInfo) -> Self {
        self.with_page_index(page.index.saturating_sub(1))
    }

    /// Go to a 1-based page number typed by the user, clamped to `page`'s range.
    pub fn jump_to_page(&self, raw: &str, page: &PageInfo) -> Self {
        self.with_page_index(pager::jump_index(raw, page.total_rows, page.page_size))
    }

    fn with_filter(&self, filter: FilterSpec) -> Self {
        Self {
            filter,
            sort: self.sort,
            page_index: 0,
        }
    }
}

/// The rows to show for one [`ViewState`], plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub rows: Vec<Contact>,
    pub page: PageInfo,
}

/// Filtered and sorted rows, without pagination.
pub fn matching_rows(records: &[Contact], state: &ViewState) -> Vec<Contact> {
    let filtered = filter::evaluate(records, &state.filter);
    sort::evaluate(&filtered, &state.sort)
}

pub fn derive_view(records: &[Contact], state: &ViewState, page_size: usize) -> DerivedView {
    let page_size = page_size.max(1);
    let rows = matching_rows(records, state);
    let index = pager::clamp_index(state.page_index, rows.len(), page_size);
    let page = pager::page(&rows, page_size, index);

    tracing::debug!(
        total = records.len(),
        matched = page.total_rows,
        page = index + 1,
        pages = page.total_pages,
        "derived contact view"
    );

    DerivedView {
        rows: page.rows.to_vec(),
        page: PageInfo {
            index,
            page_size,
            total_rows: page.total_rows,
            total_pages: page.total_pages,
            can_go_next: page.can_go_next,
            can_go_previous: page.can_go_previous,
        },
    }
}
