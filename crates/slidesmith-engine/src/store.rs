use crate::images::ImageResolver;
use crate::orchestrator::{BatchConfig, generate_deck};
use async_trait::async_trait;
use slidesmith_core::{SlideLayout, validate_batch};
use slidesmith_llm::CompletionBackend;
use thiserror::Error;
use tracing::{info, warn};

/// Structured failure surfaced to the web layer as a status + message
/// pair. None of these are retried by the pipeline.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("project ID is required")]
    MissingProjectId,

    #[error("user not authenticated")]
    NotAuthenticated,

    #[error("user not found")]
    UserNotFound,

    #[error("project not found")]
    ProjectNotFound,

    #[error("project does not have any outlines")]
    NoOutlines,

    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    /// HTTP-style status code for the surrounding web layer.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingProjectId | Self::NoOutlines => 400,
            Self::NotAuthenticated | Self::UserNotFound => 403,
            Self::ProjectNotFound => 404,
            Self::Storage(_) => 500,
        }
    }
}

/// Narrow persistence contract the pipeline drives. Durable storage of
/// projects and slide collections is owned by the surrounding
/// application; the pipeline only reads outlines and writes decks.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Ordered outline points for a project. Lookup and authorization
    /// failures surface as the structured errors above.
    async fn fetch_outlines(&self, project_id: &str) -> Result<Vec<String>, StoreError>;

    /// Persist the finished deck together with its theme.
    async fn save_slides(
        &self,
        project_id: &str,
        theme: &str,
        slides: &[SlideLayout],
    ) -> Result<(), StoreError>;
}

/// End-to-end entry point: load a project's outlines, generate the
/// deck, resolve images, persist. Generation itself never fails —
/// only lookup and persistence errors reach the caller.
pub async fn generate_for_project(
    store: &dyn ProjectStore,
    backend: &impl CompletionBackend,
    resolver: &ImageResolver,
    config: &BatchConfig,
    project_id: &str,
    theme: &str,
) -> Result<Vec<SlideLayout>, StoreError> {
    if project_id.is_empty() {
        return Err(StoreError::MissingProjectId);
    }

    let outlines = store.fetch_outlines(project_id).await?;
    if outlines.is_empty() {
        return Err(StoreError::NoOutlines);
    }

    let layouts = generate_deck(backend, &outlines, config, resolver).await;

    if let Err(e) = validate_batch(&layouts) {
        // Canonicalized IDs make this unreachable in practice; a
        // violation here means a generator bug, not bad model output.
        warn!("generated batch violates invariants: {}", e);
    }

    store.save_slides(project_id, theme, &layouts).await?;
    info!("saved {} slides for project {}", layouts.len(), project_id);
    Ok(layouts)
}
