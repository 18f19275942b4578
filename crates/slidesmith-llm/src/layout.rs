use crate::client::CompletionBackend;
use crate::prompt::layout_prompt;
use crate::repair::repair_json;
use slidesmith_core::{SlideLayout, is_valid_layout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Raised when the completion endpoint reports rate limiting (HTTP 429).
/// Distinguished from ordinary failure so the batch orchestrator can
/// stop calling the remote for the rest of the batch instead of
/// retrying pointlessly.
#[derive(Debug, Error)]
#[error("text-generation quota exhausted (HTTP 429)")]
pub struct QuotaExhausted;

/// Generate one slide layout from one outline point: prompt → complete
/// → repair → shallow-validate → parse → canonicalize IDs.
///
/// Returns `Ok(None)` when the model output could not be turned into a
/// usable layout; the caller retries or falls back. Only the quota
/// signal surfaces as an error.
pub async fn generate_layout(
    backend: &impl CompletionBackend,
    outline: &str,
    index: usize,
) -> Result<Option<SlideLayout>, QuotaExhausted> {
    let prompt = layout_prompt(outline, index);

    let raw = match backend.complete(&prompt).await {
        Ok(text) => text,
        Err(e) if e.is_quota_exhausted() => return Err(QuotaExhausted),
        Err(e) => {
            warn!("layout {} completion failed: {}", index + 1, e);
            return Ok(None);
        }
    };

    let repaired = repair_json(&raw);
    debug!("layout {} repaired JSON: {} chars", index + 1, repaired.len());

    if !is_valid_layout(&repaired) {
        warn!("layout {} failed structural pre-check", index + 1);
        return Ok(None);
    }

    let mut layout: SlideLayout = match serde_json::from_str(&repaired) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("layout {} did not parse after repair: {}", index + 1, e);
            return Ok(None);
        }
    };

    // Model-produced IDs repeat across calls; always replace them.
    layout.canonicalize_ids(index);

    info!("generated layout {}: {}", index + 1, layout.slide_name);
    Ok(Some(layout))
}
