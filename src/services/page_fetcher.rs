use reqwest::{redirect, Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::configuration::ForumSettings;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("{url} answered with status {status}")]
    Status { url: Url, status: StatusCode },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Single-shot GET for forum pages. Redirects are not followed and every
/// request is bounded by the configured timeout.
pub struct PageFetcher {
    client: Client,
    search_url: Url,
}

impl PageFetcher {
    pub fn new(settings: &ForumSettings) -> Result<Self, PageFetcherError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(settings.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        let search_url = Url::parse(&format!(
            "{}/search",
            settings.base_url.trim_end_matches('/')
        ))?;

        Ok(PageFetcher { client, search_url })
    }

    /// `{base}/search?q=kw` for the listing page, `{base}/search?page=n&q=kw`
    /// for page `n`.
    pub fn search_url(&self, keyword: &str, page: Option<u32>) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut query = url.query_pairs_mut();
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
            query.append_pair("q", keyword);
        }
        url
    }

    pub async fn fetch(&self, url: &Url) -> Result<String, FetchFailure> {
        let result = self.try_fetch(url).await;
        if let Err(ref e) = result {
            log::error!("Failed to fetch page: {}", e);
        }
        result
    }

    async fn try_fetch(&self, url: &Url) -> Result<String, FetchFailure> {
        let transport = |source| FetchFailure::Transport {
            url: url.clone(),
            source,
        };

        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        if res.status() != StatusCode::OK {
            return Err(FetchFailure::Status {
                url: url.clone(),
                status: res.status(),
            });
        }

        res.text().await.map_err(transport)
    }
}

#[derive(Debug, Error)]
pub enum PageFetcherError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid forum base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}
