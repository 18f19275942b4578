use crate::types::*;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("completion response carried no text")]
    EmptyResponse,

    #[error("completion transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CompletionError {
    /// True when the endpoint is rate-limiting further requests. The
    /// orchestrator treats this differently from every other failure:
    /// it stops calling the remote for the rest of the batch.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::Http { status: 429, .. })
    }
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1".to_string(),
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

/// Abstraction over the text-completion endpoint so the generator and
/// orchestrator can run against scripted responses in tests.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

pub struct CompletionClient {
    config: CompletionConfig,
    http: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Client configured from `GEMINI_API_KEY`, read once at startup.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        Self::new(CompletionConfig {
            api_key,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

impl CompletionBackend for CompletionClient {
    /// One prompt in, raw model text out. No retries here — pacing and
    /// fallback policy belong to the caller.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!(
            "completion request to {} ({} prompt chars)",
            self.config.model,
            prompt.len()
        );

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.first_text().ok_or(CompletionError::EmptyResponse)?;
        debug!("completion response: {} chars", text.len());
        Ok(text.to_string())
    }
}
