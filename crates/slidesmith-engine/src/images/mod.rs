mod replicate;
mod resolver;
mod unsplash;

pub use replicate::ReplicateProvider;
pub use resolver::ImageResolver;
pub use unsplash::UnsplashProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Why one provider in the chain could not produce an image URL.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP 402 from the paid generator. Polling or falling through to
    /// search will not fix the caller's billing, so the resolver jumps
    /// straight to the static pool.
    #[error("image provider requires billing (HTTP 402)")]
    BillingRequired,

    #[error("image provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// One source of image URLs. Providers are tried in chain order with a
/// uniform contract; the first success wins.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, alt_text: &str) -> Result<String, ProviderError>;
}
