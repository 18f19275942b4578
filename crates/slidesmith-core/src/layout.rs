use crate::content::{ContentItem, ContentPayload};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Layout-type tag for a generated slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutType {
    AccentLeft,
    AccentRight,
    ImageAndText,
    TextAndImage,
    TwoColumns,
    TwoColumnsWithHeadings,
    ThreeColumns,
    ThreeColumnsWithHeadings,
    FourColumns,
    TwoImageColumns,
    ThreeImageColumns,
    FourImageColumns,
    TableLayout,
}

/// One generated slide: type, 1-based order, style token, and the root
/// of its visible content tree (conventionally a `column` node).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideLayout {
    pub id: String,
    pub slide_name: String,
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub slide_order: u32,
    pub class_name: String,
    pub content: ContentItem,
}

impl SlideLayout {
    /// Replace every identifier in this slide with fresh ones derived
    /// from a new slide ID. Model-produced IDs are untrustworthy (they
    /// repeat across calls), so they are always overwritten: the slide
    /// gets a new UUID, and every content node gets an ID composed of
    /// the slide ID, its position in the walk, and a unique suffix.
    /// Also pins `slide_order` to the outline position.
    pub fn canonicalize_ids(&mut self, index: usize) {
        let slide_id = Uuid::new_v4().to_string();
        self.content.id = format!("{slide_id}-content-{}", Uuid::new_v4());
        let mut position = 0;
        relabel_children(&mut self.content, &slide_id, &mut position);
        self.id = slide_id;
        self.slide_order = index as u32 + 1;
    }
}

fn relabel_children(node: &mut ContentItem, slide_id: &str, position: &mut usize) {
    if let ContentPayload::Items(children) = &mut node.content {
        for child in children {
            child.id = format!("{slide_id}-item-{position}-{}", Uuid::new_v4());
            *position += 1;
            relabel_children(child, slide_id, position);
        }
    }
}
