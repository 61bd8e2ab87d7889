use std::time::Duration;

use futures::{stream, StreamExt};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{configuration::ForumSettings, domain::tag::Tag};

use super::{extract_tags, PageFetcher};

#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Pages fetched at the same time.
    pub concurrency: usize,
    /// After this long no new pages are dispatched.
    pub timeout: Duration,
}

impl From<&ForumSettings> for CrawlOptions {
    fn from(settings: &ForumSettings) -> Self {
        CrawlOptions {
            concurrency: settings.concurrency,
            timeout: settings.crawl_timeout(),
        }
    }
}

/// Fetches and parses every page with bounded concurrency and flattens the
/// tags. Failed pages contribute nothing. Cancellation or the timeout stop
/// new dispatches; pages already in flight still finish.
pub async fn crawl(
    fetcher: &PageFetcher,
    urls: Vec<Url>,
    options: CrawlOptions,
    cancel: &CancellationToken,
) -> Vec<Tag> {
    let total_pages = urls.len();

    let stop = async {
        tokio::select! {
            _ = cancel.cancelled() => log::warn!("Crawl cancelled, not dispatching more pages"),
            _ = tokio::time::sleep(options.timeout) => {
                log::warn!("Crawl timed out after {:?}, not dispatching more pages", options.timeout)
            }
        }
    };

    let pages: Vec<Option<Vec<Tag>>> = stream::iter(urls)
        .take_until(stop)
        .map(|url| async move {
            match fetcher.fetch(&url).await {
                Ok(page) => Some(extract_tags(&page)),
                Err(_) => None,
            }
        })
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    let failed = pages.iter().filter(|page| page.is_none()).count();
    let skipped = total_pages - pages.len();
    let tags: Vec<Tag> = pages.into_iter().flatten().flatten().collect();

    log::info!(
        "Crawled {} pages ({} failed, {} skipped), {} tags",
        total_pages,
        failed,
        skipped,
        tags.len()
    );

    tags
}
