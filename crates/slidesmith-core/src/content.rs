use serde::{Deserialize, Serialize};

/// Type tag for one node in a slide's content tree. The variants (and
/// their wire names) are the full set the editor understands; anything
/// else coming back from the model fails deserialization and sends the
/// slide through the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Title,
    Paragraph,
    Table,
    #[serde(rename = "resizable-column")]
    ResizableColumn,
    Image,
    Blockquote,
    NumberedList,
    BulletList,
    TodoList,
    CalloutBox,
    CodeBlock,
    TableOfContents,
    Divider,
    Column,
}

/// The `content` field of a node: child nodes for containers, a flat
/// list of lines for the list variants, or a text leaf (which for image
/// nodes holds the image URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Items(Vec<ContentItem>),
    Lines(Vec<String>),
    Text(String),
}

/// One node (leaf or container) inside a slide's content tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub name: String,
    pub content: ContentPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ContentItem {
    pub fn text(
        content_type: ContentType,
        name: impl Into<String>,
        content: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            content_type,
            name: name.into(),
            content: ContentPayload::Text(content.into()),
            alt: None,
            placeholder: Some(placeholder.into()),
        }
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            content_type: ContentType::Image,
            name: "Image".to_string(),
            content: ContentPayload::Text(url.into()),
            alt: Some(alt.into()),
            placeholder: Some("Image".to_string()),
        }
    }

    pub fn column(children: Vec<ContentItem>) -> Self {
        Self {
            id: String::new(),
            content_type: ContentType::Column,
            name: "Column".to_string(),
            content: ContentPayload::Items(children),
            alt: None,
            placeholder: None,
        }
    }

    /// Every image node in this subtree, depth-first. Image nodes are
    /// leaves (their `content` is the URL string), so pushing the node
    /// itself ends that branch of the walk.
    pub fn image_nodes_mut(&mut self) -> Vec<&mut ContentItem> {
        let mut found = Vec::new();
        collect_images(self, &mut found);
        found
    }

    pub fn image_node_count(&self) -> usize {
        let mut count = usize::from(self.content_type == ContentType::Image);
        if let ContentPayload::Items(children) = &self.content {
            count += children.iter().map(ContentItem::image_node_count).sum::<usize>();
        }
        count
    }
}

fn collect_images<'a>(node: &'a mut ContentItem, found: &mut Vec<&'a mut ContentItem>) {
    if node.content_type == ContentType::Image {
        found.push(node);
        return;
    }
    if let ContentPayload::Items(children) = &mut node.content {
        for child in children {
            collect_images(child, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_item_deserializes_wire_shape() {
        let json = r#"{
            "id": "c1",
            "type": "column",
            "name": "Column",
            "content": [
                {"id": "h1", "type": "heading1", "name": "Heading1", "content": "Title", "placeholder": "Heading1"},
                {"id": "i1", "type": "image", "name": "Image", "content": "placeholder.jpg", "alt": "A chart"},
                {"id": "b1", "type": "bulletList", "name": "BulletList", "content": ["one", "two"]}
            ]
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.content_type, ContentType::Column);
        let ContentPayload::Items(children) = &item.content else {
            panic!("expected child nodes");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[1].content_type, ContentType::Image);
        assert_eq!(children[1].alt.as_deref(), Some("A chart"));
        assert!(matches!(children[2].content, ContentPayload::Lines(_)));
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        let json = r#"{"id": "x", "type": "hologram", "name": "X", "content": "y"}"#;
        assert!(serde_json::from_str::<ContentItem>(json).is_err());
    }

    #[test]
    fn image_walk_finds_nested_images() {
        let mut tree = ContentItem::column(vec![
            ContentItem::text(ContentType::Heading1, "Heading1", "t", "Heading1"),
            ContentItem::column(vec![
                ContentItem::image("a.jpg", "first"),
                ContentItem::image("b.jpg", "second"),
            ]),
            ContentItem::image("c.jpg", "third"),
        ]);
        assert_eq!(tree.image_node_count(), 3);
        let alts: Vec<_> = tree
            .image_nodes_mut()
            .iter()
            .map(|n| n.alt.clone().unwrap())
            .collect();
        assert_eq!(alts, ["first", "second", "third"]);
    }
}
