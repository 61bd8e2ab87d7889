use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{
    configuration::ForumSettings,
    domain::{category_table::aggregate, report::format_report},
};

use super::{crawl, enumerate_pages, CrawlOptions, EnumerationFailure, PageFetcher, PageFetcherError};

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Setup(#[from] PageFetcherError),
    #[error(transparent)]
    Enumeration(#[from] EnumerationFailure),
    #[error("summary cancelled")]
    Cancelled,
}

/// Keyword in, spoiler-tag report out. Holds the HTTP client so it can be
/// shared across requests; each call is otherwise independent.
pub struct Summarizer {
    fetcher: PageFetcher,
    options: CrawlOptions,
}

impl Summarizer {
    pub fn new(settings: &ForumSettings) -> Result<Self, SummarizeError> {
        Ok(Summarizer {
            fetcher: PageFetcher::new(settings)?,
            options: CrawlOptions::from(settings),
        })
    }

    pub async fn summarize(&self, keyword: &str) -> Result<String, SummarizeError> {
        self.summarize_with_cancel(keyword, &CancellationToken::new())
            .await
    }

    pub async fn summarize_with_cancel(
        &self,
        keyword: &str,
        cancel: &CancellationToken,
    ) -> Result<String, SummarizeError> {
        let urls = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SummarizeError::Cancelled),
            urls = enumerate_pages(&self.fetcher, keyword) => urls?,
        };
        let tags = crawl(&self.fetcher, urls, self.options, cancel).await;
        let (table, total_count) = aggregate(&tags);

        log::info!("Summarized {} tags for {}", total_count, keyword);

        Ok(format_report(&table, total_count))
    }
}

/// One-shot variant for callers without a long-lived [`Summarizer`].
pub async fn summarize(settings: &ForumSettings, keyword: &str) -> Result<String, SummarizeError> {
    Summarizer::new(settings)?.summarize(keyword).await
}
