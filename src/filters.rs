// src/filters.rs
use serde::Deserialize;
use validator::Validate;

use crate::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

const MAX_PAGE_LIMIT: i64 = 50;

/// Pagination intent for a listing. Accessors clamp silently for the HTML
/// surface; the JSON API additionally rejects out-of-range values through
/// `validate()`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListingParams {
    #[serde(default)]
    #[validate(range(min = 1))]
    page: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 1, max = 50))]
    limit: Option<i64>,
}

impl ListingParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 && limit <= MAX_PAGE_LIMIT => limit,
            Some(_) => MAX_PAGE_LIMIT,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page(), self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, limit: Option<i64>) -> ListingParams {
        ListingParams { page, limit }
    }

    #[test]
    fn defaults_to_first_page_with_default_limit() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(params(Some(0), None).page(), 1);
        assert_eq!(params(Some(-3), None).page(), 1);
        assert_eq!(params(Some(7), None).page(), 7);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(params(None, Some(500)).limit(), MAX_PAGE_LIMIT);
        assert_eq!(params(None, Some(0)).limit(), MAX_PAGE_LIMIT);
        assert_eq!(params(None, Some(25)).limit(), 25);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        assert!(params(Some(0), None).validate().is_err());
        assert!(params(None, Some(51)).validate().is_err());
        assert!(params(Some(2), Some(10)).validate().is_ok());
        assert!(params(None, None).validate().is_ok());
    }
}
