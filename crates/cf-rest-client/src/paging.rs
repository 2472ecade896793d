//! Drivers built on top of a single-page fetch function
//!
//! Both take the caller's options by value, so a caller's own options are
//! never modified while pages are walked.

use std::future::Future;

use tracing::debug;

use crate::error::{RestClientError, RestClientResult};
use crate::pager::Pager;
use crate::query::ListOptions;

/// Upper bound on the number of pages [`auto_page`] will request
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Fetch every page and concatenate the results in server order.
///
/// Any error aborts the walk and the results gathered so far are dropped.
pub async fn auto_page<O, R, F, Fut>(options: Option<O>, fetch: F) -> RestClientResult<Vec<R>>
where
    O: ListOptions,
    F: FnMut(O) -> Fut,
    Fut: Future<Output = RestClientResult<(Vec<R>, Pager)>>,
{
    auto_page_with_limit(options, DEFAULT_MAX_PAGES, fetch).await
}

/// [`auto_page`] with an explicit page limit.
///
/// Fails with [`RestClientError::PageLimitExceeded`] instead of requesting
/// page `max_pages + 1`.
pub async fn auto_page_with_limit<O, R, F, Fut>(
    options: Option<O>,
    max_pages: usize,
    mut fetch: F,
) -> RestClientResult<Vec<R>>
where
    O: ListOptions,
    F: FnMut(O) -> Fut,
    Fut: Future<Output = RestClientResult<(Vec<R>, Pager)>>,
{
    let mut options = options.unwrap_or_default();
    let mut all = Vec::new();
    let mut pages = 0usize;

    loop {
        if pages >= max_pages {
            return Err(RestClientError::PageLimitExceeded(max_pages));
        }
        let (mut items, pager) = fetch(options.clone()).await?;
        pages += 1;
        debug!(
            page = options.page_options().page,
            count = items.len(),
            total = pager.total_results(),
            "Fetched page"
        );
        all.append(&mut items);

        if !pager.has_next_page() {
            return Ok(all);
        }
        pager.advance(&mut options)?;
    }
}

/// Fetch exactly one matching resource.
///
/// Requests the first page with room for two results, which is enough to
/// tell "one" from "more than one" in a single round trip.
pub async fn single<O, R, F, Fut>(options: Option<O>, fetch: F) -> RestClientResult<R>
where
    O: ListOptions,
    F: FnOnce(O) -> Fut,
    Fut: Future<Output = RestClientResult<(Vec<R>, Pager)>>,
{
    let mut options = options.unwrap_or_default();
    let page = options.page_options_mut();
    page.page = 1;
    page.per_page = 2;

    let (mut items, pager) = fetch(options).await?;
    let total = pager.total_results() as usize;
    match items.len() {
        0 => Err(RestClientError::NotFound),
        1 if total <= 1 => Ok(items.remove(0)),
        n => Err(RestClientError::AmbiguousResult(n.max(total))),
    }
}
