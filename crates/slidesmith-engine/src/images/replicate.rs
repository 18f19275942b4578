use super::{ImageProvider, ProviderError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Pinned Stability AI SDXL version.
const SDXL_VERSION: &str = "7762fd07cf82c948538e41f63f77d685e02b063e37e496e96eefd46c929f9bdc";

/// Paid image generation via Replicate predictions: submit a job, then
/// poll it until it settles or the poll ceiling is hit.
pub struct ReplicateProvider {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
    /// Wait between status polls.
    pub poll_interval: Duration,
    /// Poll ceiling; with the default interval this bounds a job at
    /// roughly a minute.
    pub max_poll_attempts: u32,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    num_outputs: u32,
    scheduler: &'a str,
    num_inference_steps: u32,
    guidance_scale: f32,
    refine: &'a str,
    refine_steps: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: Option<String>,
    status: String,
    // Explicitly `null` until the job settles.
    output: Option<Vec<String>>,
    error: Option<String>,
}

impl ReplicateProvider {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token: api_token.into(),
            base_url: "https://api.replicate.com/v1".to_string(),
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 30,
        }
    }
}

/// Wrap the slide's alt text in explicit instructions for the image
/// model: photorealism, English-only text, professional register.
pub(crate) fn embellish_prompt(alt_text: &str) -> String {
    format!(
        "Create a highly realistic, professional image based on the following description. \
         The image should look as if captured in real life, with attention to detail, \
         lighting, and texture.\n\n\
         Description: {alt_text}\n\n\
         Important Notes:\n\
         - The image must be in a photorealistic style and visually compelling.\n\
         - Ensure all text, signs, or visible writing in the image are in English.\n\
         - Pay special attention to lighting, shadows, and textures to make the image as lifelike as possible.\n\
         - Avoid elements that appear abstract, cartoonish, or overly artistic. The image should be suitable for professional presentations.\n\
         - Focus on accurately depicting the concept described, including specific objects, environment, mood, and context. Maintain relevance to the description provided.\n\n\
         Example Use Cases: Business presentations, educational slides, professional designs."
    )
}

#[async_trait]
impl ImageProvider for ReplicateProvider {
    fn name(&self) -> &'static str {
        "replicate"
    }

    async fn resolve(&self, alt_text: &str) -> Result<String, ProviderError> {
        let prompt = embellish_prompt(alt_text);
        let request = PredictionRequest {
            version: SDXL_VERSION,
            input: PredictionInput {
                prompt: &prompt,
                width: 1024,
                height: 768,
                num_outputs: 1,
                scheduler: "K_EULER",
                num_inference_steps: 30,
                guidance_scale: 7.5,
                refine: "expert_ensemble_refiner",
                refine_steps: 5,
            },
        };

        let response = self
            .http
            .post(format!("{}/predictions", self.base_url))
            .header("Authorization", format!("Token {}", self.api_token))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 402 {
            return Err(ProviderError::BillingRequired);
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "prediction request failed: {status}"
            )));
        }

        let mut prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("bad prediction response: {e}")))?;
        let Some(id) = prediction.id.take() else {
            return Err(ProviderError::Unavailable("no prediction ID received".to_string()));
        };
        info!("prediction {} started", id);

        let mut attempts = 0;
        while matches!(prediction.status.as_str(), "starting" | "processing")
            && attempts < self.max_poll_attempts
        {
            attempts += 1;
            debug!(
                "polling prediction {} ({}/{}), status: {}",
                id, attempts, self.max_poll_attempts, prediction.status
            );
            tokio::time::sleep(self.poll_interval).await;

            let poll = self
                .http
                .get(format!("{}/predictions/{}", self.base_url, id))
                .header("Authorization", format!("Token {}", self.api_token))
                .send()
                .await?;
            if !poll.status().is_success() {
                return Err(ProviderError::Unavailable(format!(
                    "polling failed: {}",
                    poll.status()
                )));
            }
            prediction = poll
                .json()
                .await
                .map_err(|e| ProviderError::Unavailable(format!("bad poll response: {e}")))?;
        }

        match prediction.status.as_str() {
            "succeeded" => match prediction.output.take() {
                Some(mut output) if !output.is_empty() => {
                    info!("prediction {} produced an image", id);
                    Ok(output.remove(0))
                }
                _ => Err(ProviderError::Unavailable("prediction had no output".to_string())),
            },
            "failed" => Err(ProviderError::Unavailable(format!(
                "generation failed: {}",
                prediction.error.unwrap_or_default()
            ))),
            "starting" | "processing" => {
                Err(ProviderError::Unavailable("generation timed out".to_string()))
            }
            other => Err(ProviderError::Unavailable(format!("unknown status: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embellished_prompt_carries_alt_text_and_instructions() {
        let prompt = embellish_prompt("A team reviewing charts");
        assert!(prompt.contains("A team reviewing charts"));
        assert!(prompt.contains("photorealistic"));
        assert!(prompt.contains("English"));
    }

    #[test]
    fn fresh_prediction_carries_null_output() {
        // The create response and every in-flight poll report
        // `"output": null`, not a missing field.
        let prediction: Prediction = serde_json::from_str(
            r#"{"id":"p1","status":"starting","output":null,"error":null}"#,
        )
        .unwrap();
        assert_eq!(prediction.status, "starting");
        assert!(prediction.output.is_none());
    }

    #[test]
    fn settled_prediction_carries_its_output_urls() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"id":"p1","status":"succeeded","output":["https://img.example/out.png"],"error":null}"#,
        )
        .unwrap();
        assert_eq!(prediction.output.as_deref(), Some(&["https://img.example/out.png".to_string()][..]));
    }

    #[test]
    fn defaults_bound_polling_at_about_a_minute() {
        let provider = ReplicateProvider::new("token");
        assert_eq!(provider.poll_interval, Duration::from_secs(2));
        assert_eq!(provider.max_poll_attempts, 30);
    }
}
