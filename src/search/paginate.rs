// src/search/paginate.rs
// =============================================================================
// Page windows over the list of matching gists.
//
// Pages are 1-indexed. Page `p` with size `s` covers matches
// [(p-1)*s, min(p*s, total)), and is empty once it starts past the end.
// =============================================================================

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated (page, page_size) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Validates raw query values, filling in the defaults for missing ones.
    ///
    /// The page is checked before the page size, so a request that gets both
    /// wrong reports the page.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> ApiResult<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(ApiError::invalid_input("'page' should be more than 0"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ApiError::invalid_input(
                "'page_size' should be greater than 0 and less than 101",
            ));
        }

        Ok(Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            page_size: page_size as usize,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `(start, end)` indices of this page within `total` items.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        (start, end)
    }
}
