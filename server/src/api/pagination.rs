use axum::http::Uri;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::BigInt;
use larder_core::{page_link, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use super::ApiError;
use crate::config::Config;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size (default and maximum come from server configuration)
    pub limit: Option<i64>,
}

/// `COUNT(*) OVER()`: the size of the whole filtered set, selected alongside
/// each row of a LIMIT/OFFSET page. Diesel has no window-function DSL.
pub fn count_over() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER()")
}

pub fn resolve_page(
    page: Option<i64>,
    limit: Option<i64>,
    config: &Config,
) -> Result<PageRequest, ApiError> {
    Ok(PageRequest::from_params(
        page,
        limit,
        config.page_size,
        config.max_page_size,
    )?)
}

/// `next`/`previous` links for a page envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Build the links for `page` given the collection size. A page past the end
/// is a 404.
pub fn page_links(uri: &Uri, page: &PageRequest, total: i64) -> Result<PageLinks, ApiError> {
    if page.is_out_of_range(total) {
        return Err(ApiError::not_found("Invalid page"));
    }

    let path = uri.path();
    let query = uri.query();

    Ok(PageLinks {
        next: page
            .has_next(total)
            .then(|| page_link(path, query, page.page + 1)),
        previous: page
            .has_previous()
            .then(|| page_link(path, query, page.page - 1)),
    })
}
