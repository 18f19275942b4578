use crate::images::ImageResolver;
use slidesmith_core::{SlideLayout, fallback_layout};
use slidesmith_llm::{CompletionBackend, QuotaExhausted, generate_layout};
use std::time::Duration;
use tracing::{info, warn};

/// Pacing and retry knobs for one generation batch. The defaults are
/// the values the pipeline shipped with; callers tuning against a
/// different provider override individual fields.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Remote attempts per outline point before falling back.
    pub max_attempts: u32,
    /// Wait between attempts for the same outline point.
    pub retry_backoff: Duration,
    /// Politeness delay after each successfully generated item.
    pub throttle: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_backoff: Duration::from_secs(1),
            throttle: Duration::from_millis(500),
        }
    }
}

/// Generate one layout per outline point, in order. Never fails and
/// never leaves a gap: any point that cannot be generated remotely
/// yields a fallback layout in its slot.
///
/// The loop is deliberately sequential: a quota signal discovered on
/// item N must stop remote calls for item N+1 onward, so items cannot
/// run concurrently. The quota flag lives here, per batch — concurrent
/// batches do not share it.
pub async fn generate_all(
    backend: &impl CompletionBackend,
    outlines: &[String],
    config: &BatchConfig,
) -> Vec<SlideLayout> {
    let mut layouts = Vec::with_capacity(outlines.len());
    let mut quota_exhausted = false;

    info!("generating {} layouts, one at a time", outlines.len());

    for (index, outline) in outlines.iter().enumerate() {
        let mut layout = None;

        if quota_exhausted {
            info!("skipping remote call for layout {} (quota exhausted)", index + 1);
        } else {
            let mut attempt = 0;
            while attempt < config.max_attempts && layout.is_none() {
                if attempt > 0 {
                    info!("retry {} for layout {}", attempt, index + 1);
                    tokio::time::sleep(config.retry_backoff).await;
                }
                match generate_layout(backend, outline, index).await {
                    Ok(result) => layout = result,
                    Err(QuotaExhausted) => {
                        warn!(
                            "quota exhausted at layout {}; switching remaining items to fallback",
                            index + 1
                        );
                        quota_exhausted = true;
                        break;
                    }
                }
                attempt += 1;
            }
        }

        let generated_remotely = layout.is_some();
        let layout = layout.unwrap_or_else(|| {
            info!("using fallback layout for outline {}", index + 1);
            fallback_layout(outline, index)
        });
        layouts.push(layout);

        // Throttle only between remote successes; fallback items make
        // no calls worth pacing.
        if generated_remotely && index + 1 < outlines.len() {
            tokio::time::sleep(config.throttle).await;
        }
    }

    layouts
}

/// Full pipeline: generate every layout, then resolve the image
/// placeholders for the whole batch concurrently.
pub async fn generate_deck(
    backend: &impl CompletionBackend,
    outlines: &[String],
    config: &BatchConfig,
    resolver: &ImageResolver,
) -> Vec<SlideLayout> {
    let mut layouts = generate_all(backend, outlines, config).await;
    resolver.resolve_batch(&mut layouts).await;
    layouts
}
