//! Page-number pagination arithmetic.

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Resolve `page`/`limit` query parameters. `limit` is clamped into
    /// `1..=max_limit`; a page below 1 is rejected.
    pub fn from_params(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: i64,
        max_limit: i64,
    ) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(ValidationError::new("page", "Page number must be at least 1"));
        }
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));
        Ok(Self { page, limit })
    }

    /// Saturates, so an absurd page number lands past any real collection
    /// and reads as out of range.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// A page past the end is invalid, except page 1 of an empty collection.
    pub fn is_out_of_range(&self, total: i64) -> bool {
        self.page > 1 && self.offset() >= total
    }

    pub fn has_next(&self, total: i64) -> bool {
        self.offset().saturating_add(self.limit) < total
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Rebuild a request-relative link to `page`, keeping every other query
/// parameter in its original order.
pub fn page_link(path: &str, query: Option<&str>, page: i64) -> String {
    let mut pairs: Vec<&str> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some("page"))
        .collect();
    let page_pair = format!("page={}", page);
    pairs.push(&page_pair);
    format!("{}?{}", path, pairs.join("&"))
}
