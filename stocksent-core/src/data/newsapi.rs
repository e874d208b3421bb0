//! NewsAPI headline provider.
//!
//! Issues a single `/v2/everything` search sorted by publication date and
//! keeps the first few titles. Every failure (no key, transport error,
//! non-"ok" status, undecodable body) degrades to an empty headline list.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::provider::{DataError, DataSource, NewsProvider, HEADLINE_LIMIT};
use crate::config::{HttpConfig, NewsConfig};

/// Articles requested per search; leaves room for titles filtered out below.
const PAGE_SIZE: usize = 20;

/// Placeholder title NewsAPI uses for retracted articles.
const REMOVED_TITLE: &str = "[Removed]";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

pub struct NewsApiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    language: String,
}

impl NewsApiProvider {
    pub fn new(http: &HttpConfig, news: &NewsConfig) -> Result<Self, DataError> {
        Ok(Self {
            client: super::build_client(http)?,
            endpoint: news.endpoint.clone(),
            api_key: news.api_key.clone().filter(|k| !k.trim().is_empty()),
            language: news.language.clone(),
        })
    }

    /// The fallible request behind [`NewsProvider::fetch_headlines`].
    pub fn try_fetch(&self, query: &str) -> Result<Vec<String>, DataError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| DataError::MissingApiKey {
            provider: "newsapi".into(),
        })?;

        debug!(query, "searching news");
        let page_size = PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("language", self.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .map_err(DataError::from_transport)?;

        let status = resp.status();
        let body = resp.text().map_err(DataError::from_transport)?;

        match serde_json::from_str::<EverythingResponse>(&body) {
            Ok(parsed) => headlines_from(parsed),
            Err(_) if !status.is_success() => Err(DataError::HttpStatus {
                status: status.as_u16(),
                context: "news search".into(),
            }),
            Err(e) => Err(DataError::ResponseFormatChanged(format!(
                "failed to parse news response: {e}"
            ))),
        }
    }
}

/// Titles from a decoded response, or the provider's own error.
fn headlines_from(resp: EverythingResponse) -> Result<Vec<String>, DataError> {
    if resp.status != "ok" {
        let code = resp.code.unwrap_or_else(|| resp.status.clone());
        let message = resp.message.unwrap_or_default();
        return Err(DataError::Rejected(format!("{code}: {message}")));
    }

    Ok(resp
        .articles
        .into_iter()
        .filter_map(|a| a.title)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && t != REMOVED_TITLE)
        .take(HEADLINE_LIMIT)
        .collect())
}

impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    fn source(&self) -> DataSource {
        DataSource::NewsApi
    }

    fn fetch_headlines(&self, query: &str) -> Vec<String> {
        match self.try_fetch(query) {
            Ok(headlines) => {
                info!(query, count = headlines.len(), "fetched headlines");
                headlines
            }
            Err(e) => {
                warn!(query, error = %e, "error fetching news");
                Vec::new()
            }
        }
    }
}
