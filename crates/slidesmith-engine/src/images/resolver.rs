use super::{ImageProvider, ProviderError, ReplicateProvider, UnsplashProvider};
use futures::future::join_all;
use slidesmith_core::{ContentPayload, SlideLayout, random_stock_url};
use tracing::{debug, info, warn};

const DEFAULT_ALT: &str = "Professional presentation image";

/// Walks finished layouts for image placeholders and replaces each with
/// a resolved URL from an ordered provider chain, degrading to the
/// static stock pool. Resolution never fails the caller.
pub struct ImageResolver {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl ImageResolver {
    pub fn new(providers: Vec<Box<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    /// Build the chain from process configuration, read once. A missing
    /// key drops that provider, so its step degrades to the next one
    /// instead of failing the batch. The static pool needs no key and
    /// is always the terminal step.
    pub fn from_env() -> Self {
        let mut providers: Vec<Box<dyn ImageProvider>> = Vec::new();
        if let Ok(token) = std::env::var("REPLICATE_API_TOKEN")
            && !token.is_empty()
        {
            providers.push(Box::new(ReplicateProvider::new(token)));
        }
        if let Ok(key) = std::env::var("UNSPLASH_ACCESS_KEY")
            && !key.is_empty()
        {
            providers.push(Box::new(UnsplashProvider::new(key)));
        }
        Self::new(providers)
    }

    /// Resolve one alt text to a URL: first provider to succeed wins,
    /// a billing signal abandons the chain, and the static pool is the
    /// answer when nothing else worked. Cannot fail.
    pub async fn resolve_url(&self, alt_text: &str) -> String {
        for provider in &self.providers {
            match provider.resolve(alt_text).await {
                Ok(url) => {
                    info!("{} resolved image for: {}", provider.name(), alt_text);
                    return url;
                }
                Err(ProviderError::BillingRequired) => {
                    warn!("{}: billing required, using the stock pool", provider.name());
                    break;
                }
                Err(e) => {
                    warn!("{} failed ({}), trying next source", provider.name(), e);
                }
            }
        }
        random_stock_url().to_string()
    }

    /// Overwrite every image placeholder in one layout, all of them
    /// concurrently. A layout without image nodes makes no calls.
    pub async fn resolve_layout(&self, layout: &mut SlideLayout) {
        let images = layout.content.image_nodes_mut();
        if images.is_empty() {
            return;
        }
        debug!("resolving {} image(s) for slide: {}", images.len(), layout.slide_name);

        join_all(images.into_iter().map(|node| async move {
            let alt = node.alt.as_deref().unwrap_or(DEFAULT_ALT);
            let url = self.resolve_url(alt).await;
            node.content = ContentPayload::Text(url);
        }))
        .await;
    }

    /// Resolve images for a whole batch concurrently. Layouts are
    /// mutated in place and never reordered; wall-clock time is bounded
    /// by the slowest image, not the sum.
    pub async fn resolve_batch(&self, layouts: &mut [SlideLayout]) {
        join_all(layouts.iter_mut().map(|layout| self.resolve_layout(layout))).await;
    }
}
