use crate::client::CompletionBackend;
use crate::prompt::outline_prompt;
use crate::repair::strip_code_fence;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use slidesmith_core::fallback_outline;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct OutlineResponse {
    #[serde(default)]
    outlines: Vec<String>,
}

/// Ask the model for a slide outline (at least 6 single-sentence
/// points). Quota exhaustion degrades to the templated fallback outline
/// rather than failing; any other error surfaces to the caller.
pub async fn generate_outline(backend: &impl CompletionBackend, topic: &str) -> Result<Vec<String>> {
    info!("generating outline for topic: {}", topic);

    let raw = match backend.complete(&outline_prompt(topic)).await {
        Ok(text) => text,
        Err(e) if e.is_quota_exhausted() => {
            warn!("quota exhausted, using templated outline for: {}", topic);
            return Ok(fallback_outline(topic));
        }
        Err(e) => return Err(e).context("outline completion failed"),
    };

    let parsed: OutlineResponse = serde_json::from_str(strip_code_fence(raw.trim()))
        .context("outline response was not valid JSON")?;

    if parsed.outlines.is_empty() {
        bail!("outline response contained no points");
    }

    info!("generated outline with {} points", parsed.outlines.len());
    Ok(parsed.outlines)
}
