// src/pagination.rs
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A one-based page request. Construction clamps out-of-range input so the
/// derived offset is always >= 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Pagination state owned by the page controller. It is passed into and
/// returned from every load and never shared across concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageState {
    pub current_page: i64,
    pub total_count: i64,
    pub page_size: i64,
}

impl PageState {
    pub fn new(page_size: i64) -> Self {
        Self {
            current_page: 1,
            total_count: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.total_count == 0 {
            0
        } else {
            (self.total_count + self.page_size - 1) / self.page_size
        }
    }

    /// Previous is disabled exactly on the first page.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Next is disabled on the last page and on an empty listing.
    pub fn has_next(&self) -> bool {
        let total = self.total_pages();
        total != 0 && self.current_page < total
    }
}

/// Request lifecycle for one listing: Idle -> Loading -> Loaded | Errored.
/// A new request is accepted from any settled phase. In-flight requests are
/// not cancelled, so the last response to complete wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

impl LoadPhase {
    /// Fires on mount or on a pagination action.
    pub fn begin(self) -> LoadPhase {
        LoadPhase::Loading
    }

    /// Fires when the combined result arrives.
    pub fn settle(self, failed: bool) -> LoadPhase {
        if failed {
            LoadPhase::Errored
        } else {
            LoadPhase::Loaded
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

/// JSON envelope for paginated listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(state: &PageState, data: Vec<T>) -> Self {
        Self {
            total_items: state.total_count,
            total_pages: state.total_pages(),
            current_page: state.current_page,
            per_page: state.page_size,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current_page: i64, total_count: i64) -> PageState {
        PageState {
            current_page,
            total_count,
            page_size: 10,
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn offset_is_never_negative() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(-7, 10).offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(state(1, 25).total_pages(), 3);
        assert_eq!(state(1, 30).total_pages(), 3);
        assert_eq!(state(1, 31).total_pages(), 4);
        assert_eq!(state(1, 1).total_pages(), 1);
    }

    #[test]
    fn total_pages_is_zero_only_for_an_empty_listing() {
        assert_eq!(state(1, 0).total_pages(), 0);
        assert_ne!(state(1, 1).total_pages(), 0);
    }

    #[test]
    fn previous_is_disabled_only_on_the_first_page() {
        assert!(!state(1, 25).has_previous());
        assert!(state(2, 25).has_previous());
        assert!(state(3, 25).has_previous());
    }

    #[test]
    fn next_is_disabled_on_the_last_page_and_when_empty() {
        assert!(state(1, 25).has_next());
        assert!(state(2, 25).has_next());
        assert!(!state(3, 25).has_next());
        assert!(!state(1, 0).has_next());
    }

    #[test]
    fn third_page_of_twenty_five_rows() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 20);
        let state = state(3, 25);
        assert_eq!(state.total_pages(), 3);
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn load_phase_transitions() {
        assert_eq!(LoadPhase::Idle.begin(), LoadPhase::Loading);
        assert_eq!(LoadPhase::Loaded.begin(), LoadPhase::Loading);
        assert_eq!(LoadPhase::Errored.begin(), LoadPhase::Loading);
        assert_eq!(LoadPhase::Loading.settle(false), LoadPhase::Loaded);
        assert_eq!(LoadPhase::Loading.settle(true), LoadPhase::Errored);
    }

    #[test]
    fn paginated_envelope_carries_the_page_state() {
        let envelope = Paginated::new(&state(2, 25), vec!["row".to_string()]);
        assert_eq!(envelope.total_items, 25);
        assert_eq!(envelope.total_pages, 3);
        assert_eq!(envelope.current_page, 2);
        assert_eq!(envelope.per_page, 10);
        assert_eq!(envelope.data.len(), 1);
    }
}
