//! Pagination utilities for service layer
//!
//! `PaginationDto` is the page request accepted by the transports;
//! `Paginated<T>` is the page returned to them.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationDto {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 { 1 }
fn default_limit() -> u32 { 10 }

// Postgres LIMIT/OFFSET are BIGINT.
const MAX_OFFSET: u64 = i64::MAX as u64;

impl Default for PaginationDto {
    fn default() -> Self { Self { page: default_page(), limit: default_limit() } }
}

impl PaginationDto {
    pub fn new(page: u32, limit: u32) -> Self { Self { page, limit } }

    /// Both fields must be positive and the offset must fit a BIGINT.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.page == 0 {
            return Err(ServiceError::Validation("page must be a positive integer".into()));
        }
        if self.limit == 0 {
            return Err(ServiceError::Validation("limit must be a positive integer".into()));
        }
        if self.offset() > MAX_OFFSET {
            return Err(ServiceError::Validation("page is out of range for this limit".into()));
        }
        Ok(())
    }

    /// Rows to skip: `limit * (page - 1)`. Cannot overflow `u64`.
    pub fn offset(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page.saturating_sub(1))
    }

    /// `ceil(total / limit)`; zero rows means zero pages.
    pub fn last_page(&self, total: u64) -> u64 {
        if self.limit == 0 { return 0; }
        total.div_ceil(u64::from(self.limit))
    }
}

/// Page metadata.
///
/// `total_pages` is serialized as `totalPages` and carries the total number
/// of available rows; the page count is `last_page`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: u64,
    pub page: u64,
    pub last_page: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
