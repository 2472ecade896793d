//! Pagination state of a single list response

use cf_rest_api_contract::Pagination;
use url::form_urlencoded;

use crate::error::{RestClientError, RestClientResult};
use crate::query::ListOptions;

/// Wraps the pagination block of one page and knows how to move a set of
/// list options on to the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    pagination: Pagination,
}

impl Pager {
    pub fn new(pagination: Pagination) -> Self {
        Self { pagination }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn total_results(&self) -> u32 {
        self.pagination.total_results
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    /// True iff the server supplied a non-empty `next` link
    pub fn has_next_page(&self) -> bool {
        self.pagination.next_page_href().is_some()
    }

    /// The page number carried by the `next` link
    pub fn next_page_number(&self) -> RestClientResult<u32> {
        let href = self
            .pagination
            .next_page_href()
            .ok_or(RestClientError::NoNextPage)?;
        page_param(href)
    }

    /// Set `options` to request the page after this one.
    ///
    /// Fails when there is no next page, and leaves `options` untouched when
    /// the `next` link does not carry a usable page number.
    pub fn advance<O: ListOptions>(&self, options: &mut O) -> RestClientResult<()> {
        let next = self.next_page_number()?;
        let current = options.page_options().page;
        if next <= current {
            return Err(RestClientError::MalformedPaginationLink(format!(
                "next page {next} does not advance past page {current}"
            )));
        }
        options.page_options_mut().page = next;
        Ok(())
    }
}

fn page_param(href: &str) -> RestClientResult<u32> {
    let query = href
        .split('#')
        .next()
        .and_then(|without_fragment| without_fragment.split_once('?'))
        .map(|(_, query)| query)
        .ok_or_else(|| RestClientError::MalformedPaginationLink(format!("no query in {href}")))?;

    let raw = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            RestClientError::MalformedPaginationLink(format!("no page parameter in {href}"))
        })?;

    raw.parse::<u32>()
        .ok()
        .filter(|page| *page > 0)
        .ok_or_else(|| {
            RestClientError::MalformedPaginationLink(format!("invalid page '{raw}' in {href}"))
        })
}
