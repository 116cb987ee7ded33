//! State of one paged list screen and the rules of its search cycle.
//!
//! Every change of keyword, filter or page size jumps back to the first page.
//! Each fetch gets a ticket; a response is applied only if its ticket is the
//! latest one issued, so an older request that finishes late never overwrites
//! newer results.

use std::collections::BTreeMap;

use super::error::ApiError;
use super::paging::{page_window, Page, PageQuery, SortSpec};

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What happened to a response handed to [`ListState::apply_page`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed(ApiError),
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub keyword: String,
    pub filters: BTreeMap<String, String>,
    /// Filters fixed by the screen itself (the customer of an address list);
    /// they survive a reset and do not count as search criteria
    pub scope: BTreeMap<String, String>,
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub is_loaded: bool,
    last_ticket: u64,
    default_sort: SortSpec,
}

impl<T> ListState<T> {
    pub fn new(sort: SortSpec, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            keyword: String::new(),
            filters: BTreeMap::new(),
            scope: BTreeMap::new(),
            sort: sort.clone(),
            page: 0,
            page_size: page_size.max(1),
            total_elements: 0,
            total_pages: 0,
            loading: false,
            error: None,
            is_loaded: false,
            last_ticket: 0,
            default_sort: sort,
        }
    }

    // ============================================================================
    // Criteria
    // ============================================================================

    /// Returns true when a refetch is needed
    pub fn set_keyword(&mut self, keyword: &str) -> bool {
        if self.keyword == keyword {
            return false;
        }
        self.keyword = keyword.to_string();
        self.page = 0;
        true
    }

    /// An empty value removes the filter
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else {
            self.filters.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        };
        if changed {
            self.page = 0;
        }
        changed
    }

    /// Returns true when a refetch is needed
    pub fn set_scope(&mut self, key: &str, value: &str) -> bool {
        if self.scope.get(key).map(String::as_str) == Some(value) {
            return false;
        }
        self.scope.insert(key.to_string(), value.to_string());
        self.page = 0;
        true
    }

    pub fn filter(&self, key: &str) -> &str {
        self.filters.get(key).map(String::as_str).unwrap_or("")
    }

    /// Clear keyword and filters, restore default sort and go to the first page
    pub fn reset_criteria(&mut self) {
        self.keyword.clear();
        self.filters.clear();
        self.sort = self.default_sort.clone();
        self.page = 0;
    }

    pub fn set_page_size(&mut self, size: usize) -> bool {
        let size = size.max(1);
        if self.page_size == size {
            return false;
        }
        self.page_size = size;
        self.page = 0;
        true
    }

    /// Flips the active field, or sorts ascending by a new one; back to page 0 either way
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = self.sort.toggled(field);
        self.page = 0;
    }

    pub fn has_criteria(&self) -> bool {
        !self.keyword.trim().is_empty() || !self.filters.is_empty()
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Out-of-range pages are ignored
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.total_pages || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }

    /// "Hiển thị 11 - 20 / 45"
    pub fn range_label(&self) -> String {
        if self.total_elements == 0 {
            return "Không có dữ liệu".to_string();
        }
        let from = self.page * self.page_size + 1;
        let to = from + self.items.len().saturating_sub(1);
        format!("Hiển thị {} - {} / {}", from, to, self.total_elements)
    }

    // ============================================================================
    // Fetch cycle
    // ============================================================================

    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.page_size,
            sort: self.sort.clone(),
            keyword: self.keyword.trim().to_string(),
            filters: self
                .scope
                .iter()
                .chain(self.filters.iter())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Issue a new ticket; any response of an earlier ticket becomes stale
    pub fn begin_fetch(&mut self) -> (FetchTicket, PageQuery) {
        self.last_ticket += 1;
        self.loading = true;
        (FetchTicket(self.last_ticket), self.query())
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.last_ticket
    }

    pub fn apply_page(&mut self, ticket: FetchTicket, result: Result<Page<T>, ApiError>) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        self.is_loaded = true;
        match result {
            Ok(page) => {
                self.items = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.items.clear();
                self.total_elements = 0;
                self.total_pages = 0;
                self.error = Some(err.to_string());
                FetchOutcome::Failed(err)
            }
        }
    }

    /// After deleting the last row of a page, step back so the next fetch is not empty
    pub fn after_delete(&mut self) {
        if self.items.len() <= 1 && self.page > 0 {
            self.page -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: &[i64], total: u64, pages: usize) -> Page<i64> {
        Page {
            content: ids.to_vec(),
            total_elements: total,
            total_pages: pages,
            number: 0,
            size: 10,
        }
    }

    fn loaded_state() -> ListState<i64> {
        let mut state = ListState::new(SortSpec::desc("id"), 10);
        let (ticket, _) = state.begin_fetch();
        state.apply_page(ticket, Ok(page_of(&[1, 2, 3], 25, 3)));
        state
    }

    #[test]
    fn test_criteria_change_resets_page() {
        let mut state = loaded_state();
        assert!(state.go_to_page(2));
        assert!(state.set_keyword("đỏ"));
        assert_eq!(state.page, 0);

        state.go_to_page(1);
        assert!(state.set_filter("trangThai", "true"));
        assert_eq!(state.page, 0);
        assert!(!state.set_filter("trangThai", "true"));

        state.go_to_page(1);
        assert!(state.set_page_size(20));
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_scope_survives_reset() {
        let mut state = loaded_state();
        assert!(state.set_scope("khachHangId", "7"));
        assert!(!state.set_scope("khachHangId", "7"));
        assert!(!state.has_criteria());
        state.set_filter("trangThai", "true");
        state.reset_criteria();
        let query = state.query();
        assert_eq!(query.filter("khachHangId"), Some("7"));
        assert_eq!(query.filter("trangThai"), None);
    }

    #[test]
    fn test_empty_filter_removed_from_query() {
        let mut state = loaded_state();
        state.set_filter("trangThai", "true");
        assert!(state.set_filter("trangThai", ""));
        assert!(state.query().filters.is_empty());
    }

    #[test]
    fn test_out_of_range_navigation_is_noop() {
        let mut state = loaded_state();
        assert!(!state.prev_page());
        assert!(!state.go_to_page(3));
        assert!(state.next_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = ListState::new(SortSpec::desc("id"), 10);
        state.set_keyword("đ");
        let (first, _) = state.begin_fetch();
        state.set_keyword("đỏ");
        let (second, query) = state.begin_fetch();
        assert_eq!(query.keyword, "đỏ");

        assert_eq!(state.apply_page(second, Ok(page_of(&[9], 1, 1))), FetchOutcome::Applied);
        assert_eq!(state.apply_page(first, Ok(page_of(&[1, 2], 2, 1))), FetchOutcome::Stale);
        assert_eq!(state.items, vec![9]);
        assert!(!state.loading);
    }

    #[test]
    fn test_error_clears_list() {
        let mut state = loaded_state();
        let (ticket, _) = state.begin_fetch();
        let outcome = state.apply_page(ticket, Err(ApiError::Transport("offline".into())));
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(state.items.is_empty());
        assert_eq!(state.total_pages, 0);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_sort_toggle_and_reset() {
        let mut state = loaded_state();
        assert!(state.go_to_page(2));
        state.toggle_sort("tenMau");
        assert_eq!(state.query().sort, SortSpec::asc("tenMau"));
        assert_eq!(state.page, 0);
        assert!(state.go_to_page(1));
        state.toggle_sort("tenMau");
        assert_eq!(state.query().sort, SortSpec::desc("tenMau"));
        assert_eq!(state.query().page, 0);
        state.set_keyword("x");
        state.reset_criteria();
        assert_eq!(state.sort, SortSpec::desc("id"));
        assert!(!state.has_criteria());
    }

    #[test]
    fn test_range_label_and_after_delete() {
        let mut state = loaded_state();
        assert_eq!(state.range_label(), "Hiển thị 1 - 3 / 25");
        state.go_to_page(2);
        state.items = vec![42];
        state.after_delete();
        assert_eq!(state.page, 1);
    }
}
