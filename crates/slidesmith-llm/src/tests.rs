use crate::client::{CompletionBackend, CompletionError};
use crate::layout::generate_layout;
use crate::outline::generate_outline;
use crate::prompt::{layout_prompt, outline_prompt};
use crate::repair::repair_json;
use std::sync::Mutex;

// ── Test helpers ────────────────────────────────────────────────

/// What the mock backend should do for one call.
enum Reply {
    Text(&'static str),
    Http(u16),
    Empty,
}

/// Mock backend that plays back a scripted sequence of replies and
/// counts calls.
struct MockBackend {
    replies: Mutex<Vec<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn single(text: &'static str) -> Self {
        Self::new(vec![Reply::Text(text)])
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl CompletionBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        match replies.remove(0) {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Http(status) => Err(CompletionError::Http {
                status,
                body: String::new(),
            }),
            Reply::Empty => Err(CompletionError::EmptyResponse),
        }
    }
}

const VALID_LAYOUT: &str = r#"```json
{
  "id": "model-id",
  "slideName": "Rust Ownership",
  "type": "imageAndText",
  "slideOrder": 9,
  "className": "min-h-[300px]",
  "content": {
    "id": "model-content-id",
    "type": "column",
    "name": "Column",
    "content": [
      {"id": "a", "type": "heading1", "name": "Heading1", "content": "Ownership", "placeholder": "Heading1"},
      {"id": "a", "type": "paragraph", "name": "Paragraph", "content": "Move semantics.", "placeholder": "Content"},
      {"id": "a", "type": "image", "name": "Image", "content": "placeholder-image.jpg", "alt": "Crab moving a box", "placeholder": "Image"}
    ]
  }
}
```"#;

// ── Repair tests ────────────────────────────────────────────────

#[test]
fn repair_strips_fence_truncates_and_fixes_commas() {
    let repaired = repair_json("```json\n{\"a\":1,}\n```\njunk after");
    let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value, serde_json::json!({"a": 1}));
}

#[test]
fn repair_handles_plain_fence() {
    let repaired = repair_json("```\n{\"a\": \"b\"}\n```");
    assert_eq!(repaired, r#"{"a": "b"}"#);
}

#[test]
fn repair_leaves_unfenced_json_parseable() {
    let repaired = repair_json("  {\"x\": [1, 2,]}  trailing prose");
    let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value, serde_json::json!({"x": [1, 2]}));
}

#[test]
fn repair_collapses_internal_whitespace() {
    let repaired = repair_json("{\"a\":\t\"b\",\r\n \"c\":\n\"d\"}");
    assert_eq!(repaired, r#"{"a": "b", "c": "d"}"#);
}

#[test]
fn repair_survives_missing_closing_fence() {
    let repaired = repair_json("```json\n{\"a\": 1}");
    let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value, serde_json::json!({"a": 1}));
}

// ── Prompt tests ────────────────────────────────────────────────

#[test]
fn layout_prompt_embeds_outline_and_order() {
    let prompt = layout_prompt("Rust ownership explained", 4);
    assert!(prompt.contains("Rust ownership explained"));
    assert!(prompt.contains("\"slideOrder\": 5"));
    assert!(prompt.contains("tableLayout"));
    assert!(prompt.contains("bulletList"));
}

#[test]
fn outline_prompt_embeds_topic() {
    let prompt = outline_prompt("container orchestration");
    assert!(prompt.contains("container orchestration"));
    assert!(prompt.contains("\"outlines\""));
}

// ── Single-layout generator tests ───────────────────────────────

#[tokio::test]
async fn generate_layout_canonicalizes_model_ids() {
    let mock = MockBackend::single(VALID_LAYOUT);
    let layout = generate_layout(&mock, "Rust ownership", 2).await.unwrap().unwrap();

    assert_eq!(layout.slide_name, "Rust Ownership");
    assert_ne!(layout.id, "model-id");
    // Model said slideOrder 9; the outline position wins.
    assert_eq!(layout.slide_order, 3);
    assert!(layout.content.id.starts_with(&layout.id));
    assert_eq!(layout.content.image_node_count(), 1);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn generate_layout_returns_none_on_unparseable_output() {
    let mock = MockBackend::single("I cannot produce JSON today, sorry!");
    let result = generate_layout(&mock, "Anything", 0).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn generate_layout_returns_none_on_missing_fields() {
    let mock = MockBackend::single(r#"{"slideName": "x"}"#);
    let result = generate_layout(&mock, "Anything", 0).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn generate_layout_returns_none_on_unknown_layout_type() {
    // Passes the shallow pre-check but fails the typed parse.
    let mock = MockBackend::single(
        r#"{"slideName":"x","type":"pentagonal","slideOrder":1,"className":"c",
            "content":{"id":"i","type":"column","name":"Column","content":[]},"id":"z"}"#,
    );
    let result = generate_layout(&mock, "Anything", 0).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn generate_layout_surfaces_quota_exhaustion() {
    let mock = MockBackend::new(vec![Reply::Http(429)]);
    assert!(generate_layout(&mock, "Anything", 0).await.is_err());
}

#[tokio::test]
async fn generate_layout_treats_server_errors_as_none() {
    let mock = MockBackend::new(vec![Reply::Http(500)]);
    let result = generate_layout(&mock, "Anything", 0).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn generate_layout_treats_empty_response_as_none() {
    let mock = MockBackend::new(vec![Reply::Empty]);
    let result = generate_layout(&mock, "Anything", 0).await.unwrap();
    assert!(result.is_none());
}

// ── Outline tests ───────────────────────────────────────────────

#[tokio::test]
async fn outline_parses_fenced_response() {
    let mock = MockBackend::single("```json\n{\"outlines\": [\"One.\", \"Two.\"]}\n```");
    let points = generate_outline(&mock, "topic").await.unwrap();
    assert_eq!(points, ["One.", "Two."]);
}

#[tokio::test]
async fn outline_quota_degrades_to_template() {
    let mock = MockBackend::new(vec![Reply::Http(429)]);
    let points = generate_outline(&mock, "graph databases").await.unwrap();
    assert_eq!(points.len(), 7);
    assert!(points.iter().all(|p| p.contains("graph databases")));
}

#[tokio::test]
async fn outline_other_errors_surface() {
    let mock = MockBackend::new(vec![Reply::Http(500)]);
    assert!(generate_outline(&mock, "topic").await.is_err());
}

#[tokio::test]
async fn outline_rejects_empty_point_list() {
    let mock = MockBackend::single(r#"{"outlines": []}"#);
    assert!(generate_outline(&mock, "topic").await.is_err());
}
