use super::{ImageProvider, ProviderError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

/// Stock-photo search via Unsplash: one landscape result with the high
/// content-safety filter.
pub struct UnsplashProvider {
    http: reqwest::Client,
    access_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ResultUrls,
}

#[derive(Debug, Deserialize)]
struct ResultUrls {
    regular: String,
}

impl UnsplashProvider {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_key: access_key.into(),
            base_url: "https://api.unsplash.com".to_string(),
        }
    }
}

/// Derive a search query from alt text: lowercase, keep words longer
/// than 3 characters, take the first three.
pub(crate) fn search_query(alt_text: &str) -> String {
    alt_text
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 3)
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn resolve(&self, alt_text: &str) -> Result<String, ProviderError> {
        let query = search_query(alt_text);
        debug!("searching stock photos for: {}", query);

        let response = self
            .http
            .get(format!("{}/search/photos", self.base_url))
            .query(&[
                ("query", query.as_str()),
                ("per_page", "1"),
                ("orientation", "landscape"),
                ("content_filter", "high"),
            ])
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "search failed: {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("bad search response: {e}")))?;

        match parsed.results.into_iter().next() {
            Some(result) => {
                info!("stock photo found for: {}", query);
                Ok(result.urls.regular)
            }
            None => Err(ProviderError::Unavailable("no search results".to_string())),
        }
    }
}
