use crate::content::{ContentItem, ContentPayload};
use crate::layout::SlideLayout;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Shallow structural pre-filter for repaired model output: an object
/// with a string `slideName`, a string `type`, and an object `content`.
/// Deliberately not a schema check — it only exists to avoid spending
/// a full typed parse on obviously-wrong output.
pub fn is_valid_layout(json: &str) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return false;
    };
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("slideName").is_some_and(Value::is_string)
        && obj.get("type").is_some_and(Value::is_string)
        && obj.get("content").is_some_and(Value::is_object)
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch has no slides")]
    Empty,

    #[error("duplicate slide id {0}")]
    DuplicateSlideId(String),

    #[error("slide at position {position} has order {got}, expected {expected}")]
    OrderGap { position: usize, got: u32, expected: u32 },

    #[error("duplicate content id {0}")]
    DuplicateContentId(String),
}

/// Check the cross-slide invariants of a finished batch: slide IDs are
/// pairwise distinct, `slideOrder` runs 1..N, and every content-node ID
/// is unique across the entire batch.
pub fn validate_batch(slides: &[SlideLayout]) -> Result<(), BatchError> {
    if slides.is_empty() {
        return Err(BatchError::Empty);
    }

    let mut slide_ids = HashSet::new();
    let mut content_ids = HashSet::new();

    for (position, slide) in slides.iter().enumerate() {
        if !slide_ids.insert(slide.id.as_str()) {
            return Err(BatchError::DuplicateSlideId(slide.id.clone()));
        }
        let expected = position as u32 + 1;
        if slide.slide_order != expected {
            return Err(BatchError::OrderGap { position, got: slide.slide_order, expected });
        }
        check_content_ids(&slide.content, &mut content_ids)?;
    }

    Ok(())
}

fn check_content_ids<'a>(
    node: &'a ContentItem,
    seen: &mut HashSet<&'a str>,
) -> Result<(), BatchError> {
    if !seen.insert(node.id.as_str()) {
        return Err(BatchError::DuplicateContentId(node.id.clone()));
    }
    if let ContentPayload::Items(children) = &node.content {
        for child in children {
            check_content_ids(child, seen)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_layout;

    #[test]
    fn shallow_validation_requires_all_three_fields() {
        assert!(!is_valid_layout(r#"{"slideName":"x"}"#));
        assert!(!is_valid_layout(r#"{"slideName":"x","type":"y"}"#));
        assert!(is_valid_layout(r#"{"slideName":"x","type":"y","content":{}}"#));
    }

    #[test]
    fn shallow_validation_rejects_wrong_shapes() {
        assert!(!is_valid_layout("not json"));
        assert!(!is_valid_layout("[1, 2, 3]"));
        assert!(!is_valid_layout(r#"{"slideName":1,"type":"y","content":{}}"#));
        assert!(!is_valid_layout(r#"{"slideName":"x","type":"y","content":"text"}"#));
    }

    #[test]
    fn fallback_batch_passes_invariants() {
        let slides: Vec<_> = (0..4).map(|i| fallback_layout("Point one. Detail", i)).collect();
        validate_batch(&slides).unwrap();
    }

    #[test]
    fn order_gaps_are_detected() {
        let mut slides: Vec<_> = (0..2).map(|i| fallback_layout("Point", i)).collect();
        slides[1].slide_order = 5;
        assert!(matches!(
            validate_batch(&slides),
            Err(BatchError::OrderGap { position: 1, got: 5, expected: 2 })
        ));
    }

    #[test]
    fn duplicate_content_ids_are_detected() {
        let mut slides: Vec<_> = (0..2).map(|i| fallback_layout("Point", i)).collect();
        slides[1].content.id = slides[0].content.id.clone();
        assert!(matches!(validate_batch(&slides), Err(BatchError::DuplicateContentId(_))));
    }
}
