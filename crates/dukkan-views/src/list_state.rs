//! # List View State
//!
//! The pagination / search / date-filter machine behind every list screen.
//! All transitions are pure reducer methods; fetching is someone else's job
//! ([`crate::list_screen`]).
//!
//! ## Search Staging
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two-Phase Search                                   │
//! │                                                                         │
//! │   keystrokes ──► stage_search() ──► search_input   (staged buffer)      │
//! │                                         │                               │
//! │                       Enter / button ───┘                               │
//! │                                         ▼                               │
//! │                  commit_search() ──► search_term   (committed, page=1)  │
//! │                                                                         │
//! │   Only the committed term ever reaches query(); typing alone never      │
//! │   changes the query tuple and never triggers a fetch.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - `commit_search` and `set_filter` always reset the page to 1
//! - `set_filter` clears the custom date range unless the filter is
//!   [`FilterType::Custom`]
//! - `set_custom_range` is a no-op unless the filter is `Custom`
//! - `set_page` accepts only `[1, total_pages]` of the last response and
//!   reports rejection instead of clamping

use chrono::NaiveDate;

use dukkan_core::types::{FilterType, ListQuery, DEFAULT_PAGE_SIZE};
use dukkan_core::validation::{validate_search_term, ValidationResult};

/// Pure state for one paginated list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Current page, 1-based.
    pub page: u32,
    pub page_size: u32,
    /// Staged search buffer; edited per keystroke, queried never.
    pub search_input: String,
    /// Committed search term, set only by [`ListState::commit_search`].
    pub search_term: Option<String>,
    pub filter_type: Option<FilterType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Page count reported by the last successful response. Floors at 1.
    pub total_pages: u32,
    /// Item count reported by the last successful response.
    pub total_count: u64,
}

impl Default for ListState {
    fn default() -> Self {
        ListState {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_input: String::new(),
            search_term: None,
            filter_type: None,
            start_date: None,
            end_date: None,
            total_pages: 1,
            total_count: 0,
        }
    }
}

impl ListState {
    /// Plain list state with no date filter (products, customers, ...).
    pub fn new() -> Self {
        ListState::default()
    }

    /// List state opening on a date filter (orders, stock ledger).
    pub fn with_filter(filter: FilterType) -> Self {
        ListState {
            filter_type: Some(filter),
            ..ListState::default()
        }
    }

    /// Replaces the staged search buffer. No query change, no page reset.
    pub fn stage_search(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Commits the staged buffer as the active search term.
    ///
    /// The buffer is trimmed and length-checked; an over-long term is
    /// rejected and nothing changes. On success the page resets to 1 and
    /// an empty term clears the search.
    pub fn commit_search(&mut self) -> ValidationResult<()> {
        let term = validate_search_term(&self.search_input)?;
        self.search_term = if term.is_empty() { None } else { Some(term) };
        self.page = 1;
        Ok(())
    }

    /// Switches the date filter, resetting the page to 1.
    ///
    /// The custom range only survives a switch **to** `Custom`; every other
    /// filter derives its own range server-side, so stale dates are cleared.
    pub fn set_filter(&mut self, filter: Option<FilterType>) {
        self.filter_type = filter;
        self.page = 1;
        if filter != Some(FilterType::Custom) {
            self.start_date = None;
            self.end_date = None;
        }
    }

    /// Sets the custom date range.
    ///
    /// Applied (and the page reset) only while the filter is `Custom`;
    /// otherwise the call reports `false` and nothing changes.
    pub fn set_custom_range(&mut self, start: NaiveDate, end: NaiveDate) -> bool {
        if self.filter_type != Some(FilterType::Custom) {
            return false;
        }
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.page = 1;
        true
    }

    /// Moves to a page within `[1, total_pages]`.
    ///
    /// Out-of-range requests report `false` and leave the state unchanged,
    /// so a stale next-page button can never dispatch a bad query.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.page = page;
        true
    }

    /// Records the paging figures of a successful response.
    pub fn record_page_info(&mut self, total_pages: u32, total_count: u64) {
        self.total_pages = total_pages.max(1);
        self.total_count = total_count;
    }

    /// The full parameter tuple this state currently describes.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page_num: self.page,
            page_size: self.page_size,
            search_term: self.search_term.clone(),
            filter_type: self.filter_type,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_staged_input_never_changes_query() {
        let mut state = ListState::new();
        let before = state.query();

        state.stage_search("ahm");
        state.stage_search("ahmed");

        assert_eq!(state.query(), before);
        assert_eq!(state.search_input, "ahmed");
    }

    #[test]
    fn test_commit_search_trims_and_resets_page() {
        let mut state = ListState::new();
        state.record_page_info(9, 430);
        state.set_page(4);

        state.stage_search("  ahmed ");
        state.commit_search().unwrap();

        assert_eq!(state.search_term.as_deref(), Some("ahmed"));
        assert_eq!(state.page, 1);
        assert_eq!(state.query().search_term.as_deref(), Some("ahmed"));
    }

    #[test]
    fn test_commit_empty_clears_search() {
        let mut state = ListState::new();
        state.stage_search("ahmed");
        state.commit_search().unwrap();

        state.stage_search("   ");
        state.commit_search().unwrap();
        assert!(state.search_term.is_none());
    }

    #[test]
    fn test_commit_rejects_over_long_term() {
        let mut state = ListState::new();
        state.record_page_info(5, 220);
        state.set_page(3);

        state.stage_search("x".repeat(101));
        assert!(state.commit_search().is_err());

        // Rejection leaves the committed query untouched
        assert!(state.search_term.is_none());
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_set_filter_resets_page_and_clears_dates() {
        let mut state = ListState::with_filter(FilterType::Custom);
        state.set_custom_range(date(2024, 1, 1), date(2024, 1, 31));
        state.record_page_info(7, 320);
        state.set_page(5);

        state.set_filter(Some(FilterType::Today));

        assert_eq!(state.page, 1);
        assert!(state.start_date.is_none());
        assert!(state.end_date.is_none());
    }

    #[test]
    fn test_custom_range_applies_only_in_custom_filter() {
        let mut state = ListState::with_filter(FilterType::ThisMonth);

        // Range is ignored while the filter is not Custom
        assert!(!state.set_custom_range(date(2024, 1, 1), date(2024, 1, 31)));
        assert!(state.start_date.is_none());

        state.set_filter(Some(FilterType::Custom));
        assert!(state.set_custom_range(date(2024, 1, 1), date(2024, 1, 31)));
        assert_eq!(state.start_date, Some(date(2024, 1, 1)));

        let pairs = state.query().to_query_pairs();
        assert!(pairs.contains(&("FilterType", "3".to_string())));
        assert!(pairs.contains(&("StartDate", "2024-01-01".to_string())));
    }

    #[test]
    fn test_set_page_bounds() {
        let mut state = ListState::new();
        state.record_page_info(3, 130);

        assert!(state.set_page(3));
        assert_eq!(state.page, 3);

        assert!(!state.set_page(0));
        assert!(!state.set_page(4));
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_total_pages_floors_at_one() {
        let mut state = ListState::new();
        state.record_page_info(0, 0);
        assert_eq!(state.total_pages, 1);
        // Page 1 of an empty list stays navigable
        assert!(state.set_page(1));
    }
}
