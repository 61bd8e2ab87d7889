use std::sync::LazyLock;

use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use super::{FetchFailure, PageFetcher};

// First wide paging button is the "oldest" link; its page number is the
// page count of the whole result set.
static OLDEST_PAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn.wide").expect("paging selector is valid"));

/// Upper bound on result pages a single search may report.
pub const MAX_PAGES: u32 = 5_000;

#[derive(Debug, Error)]
pub enum EnumerationFailure {
    #[error("could not fetch first search page: {0}")]
    FirstPage(#[from] FetchFailure),
    #[error("no pagination control on {url}")]
    MissingPagination { url: Url },
    #[error("pagination link {href} has no usable page number")]
    InvalidPageNumber { href: String },
    #[error("invalid pagination link: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Fetches the listing page for `keyword` and lists every result page URL
/// from page 1 up to, but not including, the oldest-page number.
pub async fn enumerate_pages(
    fetcher: &PageFetcher,
    keyword: &str,
) -> Result<Vec<Url>, EnumerationFailure> {
    let first_url = fetcher.search_url(keyword, None);
    let page = fetcher.fetch(&first_url).await?;
    let last_page = find_last_page_number(&page, &first_url)?;

    log::info!(
        "Search for {} reports {} pages, crawling {}",
        keyword,
        last_page,
        last_page.saturating_sub(1)
    );

    Ok((1..last_page)
        .map(|page_number| fetcher.search_url(keyword, Some(page_number)))
        .collect())
}

pub fn find_last_page_number(page: &str, page_url: &Url) -> Result<u32, EnumerationFailure> {
    let html_document = Html::parse_document(page);

    let href = html_document
        .select(&OLDEST_PAGE_SELECTOR)
        .next()
        .and_then(|a_tag| a_tag.value().attr("href"))
        .ok_or_else(|| EnumerationFailure::MissingPagination {
            url: page_url.clone(),
        })?;

    let invalid = || EnumerationFailure::InvalidPageNumber {
        href: href.to_string(),
    };

    let last_page: u32 = page_url
        .join(href)?
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(invalid)?;

    if last_page > MAX_PAGES {
        log::warn!(
            "Pagination link {} reports {} pages, over the limit of {}",
            href,
            last_page,
            MAX_PAGES
        );
        return Err(invalid());
    }

    Ok(last_page)
}
